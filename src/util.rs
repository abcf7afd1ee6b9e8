use core::fmt::{self, Write};
use core::sync::atomic::{AtomicU8, Ordering};

/// Heap-free buffer for Display -> &str. Safety: only write_str can write, which guarantees UTF-8.
pub(crate) struct StackBuf<const N: usize> {
    buf: [u8; N],
    pos: usize, // invariant: buf[..pos] is valid UTF-8
}

impl<const N: usize> StackBuf<N> {
    #[inline(always)]
    pub(crate) fn new() -> Self {
        Self {
            buf: [0; N],
            pos: 0,
        }
    }

    #[inline(always)]
    pub(crate) fn as_str(&self) -> &str {
        // SAFETY: write_str only accepts &str (valid UTF-8), so buf[..pos] is always valid
        debug_assert!(core::str::from_utf8(&self.buf[..self.pos]).is_ok());
        unsafe { core::str::from_utf8_unchecked(&self.buf[..self.pos]) }
    }
}

impl<const N: usize> Write for StackBuf<N> {
    #[inline(always)]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        let remaining = N - self.pos;

        // truncate at UTF-8 boundary if buffer full
        let len = if bytes.len() <= remaining {
            bytes.len()
        } else {
            let mut i = remaining;
            while i > 0 && !s.is_char_boundary(i) {
                i -= 1;
            }
            i
        };

        self.buf[self.pos..self.pos + len].copy_from_slice(&bytes[..len]);
        self.pos += len;
        Ok(())
    }
}

/// Process-wide decimal separator consulted by `Qfix::parse` and the formatter. Defaults to
/// `.`. There is no synchronization beyond the atomicity of a single-byte load/store: callers
/// that need a stable value across threads must provide their own coordination.
static DECIMAL_POINT: AtomicU8 = AtomicU8::new(b'.');

/// Returns the current process-wide decimal separator byte.
#[inline]
pub fn decimal_point() -> u8 {
    DECIMAL_POINT.load(Ordering::Relaxed)
}

/// Sets the process-wide decimal separator byte used by `parse` and the formatter.
#[inline]
pub fn set_decimal_point(c: u8) {
    DECIMAL_POINT.store(c, Ordering::Relaxed);
}
