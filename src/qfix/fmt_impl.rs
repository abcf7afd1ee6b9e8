use super::Qfix;
use crate::util::StackBuf;
use crate::wide::umul_64x64_128;
use core::fmt;

/// Sign flag for [`FormatOptions`]; has no effect on negative values, which always print `-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sign {
    /// No sign character for non-negative values.
    #[default]
    Default,
    /// A leading space for non-negative values.
    Space,
    /// A leading `+` for non-negative values.
    Plus,
}

/// Printf-style formatting flags for [`Qfix::format_into`]/[`Qfix::formatf`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Sign flag for non-negative values.
    pub sign: Sign,
    /// Minimum total output width, padded with spaces or zeros.
    pub width: usize,
    /// Fractional digits to print. `None` prints up to 20 digits with the trailing-zero
    /// suffix stripped (guarantees a value round-trips through [`Qfix::parse`]).
    pub precision: Option<usize>,
    /// Pad with `'0'` instead of spaces (between the sign and the digits).
    pub zero_pad: bool,
    /// Always print the decimal point, even with no fractional digits.
    pub force_decimal: bool,
    /// Left-align within `width`, padding with trailing spaces.
    pub left_align: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            sign: Sign::Default,
            width: 0,
            precision: None,
            zero_pad: false,
            force_decimal: false,
            left_align: false,
        }
    }
}

const MAX_FRAC_SCRATCH: usize = 64; // 2^-64 terminates within 64 decimal digits.
const DEFAULT_PRECISION_CAP: usize = 20; // round-trip-safe digit count for precision = None.

#[inline]
fn write_u64_digits(mut n: u64, out: &mut [u8; 20]) -> usize {
    if n == 0 {
        out[0] = 0;
        return 1;
    }
    let mut tmp = [0u8; 20];
    let mut count = 0;
    while n != 0 {
        tmp[count] = (n % 10) as u8;
        n /= 10;
        count += 1;
    }
    for i in 0..count {
        out[i] = tmp[count - 1 - i];
    }
    count
}

#[inline]
fn emit_digits(
    put: &mut dyn FnMut(u8),
    int_digits: &[u8; 20],
    int_count: usize,
    show_point: bool,
    frac_digits: &[u8; MAX_FRAC_SCRATCH],
    frac_count: usize,
    display_frac_count: usize,
) {
    for &d in int_digits.iter().take(int_count) {
        put(b'0' + d);
    }
    if show_point {
        put(crate::util::decimal_point());
        for i in 0..display_frac_count {
            let d = if i < frac_count { frac_digits[i] } else { 0 };
            put(b'0' + d);
        }
    }
}

fn render(value: &Qfix, opts: &FormatOptions, put: &mut dyn FnMut(u8)) {
    let is_neg = value.is_negative();
    let mag = if is_neg { value.neg() } else { *value };

    let (max_digits, strip_trailing) = match opts.precision {
        Some(p) => (p.min(MAX_FRAC_SCRATCH), false),
        None => (DEFAULT_PRECISION_CAP, true),
    };

    let mut frac_digits = [0u8; MAX_FRAC_SCRATCH];
    let mut raw_count = 0usize;
    let mut frac = mag.lo;
    while raw_count < max_digits && frac != 0 {
        let (new_lo, digit) = umul_64x64_128(frac, 10);
        frac_digits[raw_count] = digit as u8;
        frac = new_lo;
        raw_count += 1;
    }

    let mut int_word = mag.hi;
    if frac != 0 && (frac >> 63) & 1 == 1 {
        let mut i = raw_count;
        let mut carry = true;
        while carry && i > 0 {
            i -= 1;
            if frac_digits[i] == 9 {
                frac_digits[i] = 0;
            } else {
                frac_digits[i] += 1;
                carry = false;
            }
        }
        if carry {
            int_word = int_word.wrapping_add(1);
        }
    }

    let mut frac_count = raw_count;
    if strip_trailing {
        while frac_count > 0 && frac_digits[frac_count - 1] == 0 {
            frac_count -= 1;
        }
    }
    let display_frac_count = match opts.precision {
        Some(p) => p,
        None => frac_count,
    };
    let show_point = display_frac_count > 0 || opts.force_decimal;

    let mut int_digits = [0u8; 20];
    let int_count = write_u64_digits(int_word, &mut int_digits);

    let sign_byte: Option<u8> = if is_neg {
        Some(b'-')
    } else {
        match opts.sign {
            Sign::Plus => Some(b'+'),
            Sign::Space => Some(b' '),
            Sign::Default => None,
        }
    };

    let core_len = sign_byte.is_some() as usize + int_count + show_point as usize + display_frac_count;
    let pad_len = opts.width.saturating_sub(core_len);

    if opts.left_align {
        if let Some(s) = sign_byte {
            put(s);
        }
        emit_digits(
            put,
            &int_digits,
            int_count,
            show_point,
            &frac_digits,
            frac_count,
            display_frac_count,
        );
        for _ in 0..pad_len {
            put(b' ');
        }
    } else if opts.zero_pad {
        if let Some(s) = sign_byte {
            put(s);
        }
        for _ in 0..pad_len {
            put(b'0');
        }
        emit_digits(
            put,
            &int_digits,
            int_count,
            show_point,
            &frac_digits,
            frac_count,
            display_frac_count,
        );
    } else {
        for _ in 0..pad_len {
            put(b' ');
        }
        if let Some(s) = sign_byte {
            put(s);
        }
        emit_digits(
            put,
            &int_digits,
            int_count,
            show_point,
            &frac_digits,
            frac_count,
            display_frac_count,
        );
    }
}

fn parse_format_spec(spec: &str) -> FormatOptions {
    let b = spec.as_bytes();
    let mut i = 0;
    if i < b.len() && b[i] == b'%' {
        i += 1;
    }

    let mut opts = FormatOptions::default();
    while i < b.len() {
        match b[i] {
            b' ' if opts.sign == Sign::Default => opts.sign = Sign::Space,
            b'+' => opts.sign = Sign::Plus,
            b'0' => opts.zero_pad = true,
            b'-' => opts.left_align = true,
            b'#' => opts.force_decimal = true,
            _ => break,
        }
        i += 1;
    }

    let width_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    if i > width_start {
        opts.width = spec[width_start..i].parse().unwrap_or(0);
    }

    if i < b.len() && b[i] == b'.' {
        i += 1;
        let prec_start = i;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        opts.precision = Some(spec[prec_start..i].parse().unwrap_or(0));
    }

    opts
}

impl Qfix {
    /// Renders `self` into `buf` using `opts`, truncating at the buffer boundary. Returns the
    /// number of bytes written (there is no C-style null terminator in this surface).
    pub fn format_into(&self, buf: &mut [u8], opts: &FormatOptions) -> usize {
        let mut pos = 0usize;
        {
            let mut put = |byte: u8| {
                if pos < buf.len() {
                    buf[pos] = byte;
                    pos += 1;
                }
            };
            render(self, opts, &mut put);
        }
        pos
    }

    /// Renders `self` into `buf` according to a small printf-like format string, e.g.
    /// `"%+08.2f"`. Flags (`' '`, `'+'`, `'0'`, `'-'`, `'#'`), width, and `.precision` are all
    /// optional; a leading `%` and trailing `f` are optional too.
    pub fn formatf(&self, buf: &mut [u8], spec: &str) -> usize {
        let opts = parse_format_spec(spec);
        self.format_into(buf, &opts)
    }
}

impl fmt::Display for Qfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut opts = FormatOptions::default();
        if let Some(p) = f.precision() {
            opts.precision = Some(p);
        }
        if let Some(w) = f.width() {
            opts.width = w;
        }
        if f.sign_plus() {
            opts.sign = Sign::Plus;
        }
        if f.sign_aware_zero_pad() {
            opts.zero_pad = true;
        }
        if f.align() == Some(fmt::Alignment::Left) {
            opts.left_align = true;
        }
        if f.alternate() {
            opts.force_decimal = true;
        }

        let mut result: fmt::Result = Ok(());
        {
            let mut put = |byte: u8| {
                if result.is_ok() {
                    if let Err(e) = f.write_str(core::str::from_utf8(&[byte]).unwrap_or(" ")) {
                        result = Err(e);
                    }
                }
            };
            render(self, &opts, &mut put);
        }
        result
    }
}

/// Formats `self` with default options into a heap-free stack buffer and returns an owned-free
/// `&str` view via the supplied scratch. Convenience wrapper over [`fmt::Display`] for callers
/// who want a `&str` without going through an allocator.
impl Qfix {
    pub(crate) fn write_default(&self, scratch: &mut StackBuf<128>) {
        use core::fmt::Write;
        let _ = write!(scratch, "{}", self);
    }
}
