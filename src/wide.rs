// Wide arithmetic primitives (internal use only).
//
// These implement the unsigned building blocks the signed `Qfix` layer is built from: exact
// 64x64->128 multiply, 128/64 divide, the 128x128->256 multiply-high used by Q64.64
// multiplication, and the 256/128 Knuth long division used by Q64.64 division.

/// 64x64 -> 128 unsigned multiply. Returns (lo, hi) such that lo + hi*2^64 = a*b exactly.
#[inline]
pub(crate) fn umul_64x64_128(a: u64, b: u64) -> (u64, u64) {
    let p = a as u128 * b as u128;
    (p as u64, (p >> 64) as u64)
}

/// 128/64 -> 64 unsigned divide with remainder.
///
/// Precondition: `d != 0` and the quotient fits in 64 bits (`n_hi < d`).
#[inline]
pub(crate) fn udiv_128_by_64(n_lo: u64, n_hi: u64, d: u64) -> (u64, u64) {
    debug_assert!(d != 0);
    debug_assert!(n_hi < d, "udiv_128_by_64: quotient would overflow 64 bits");
    let n = ((n_hi as u128) << 64) | n_lo as u128;
    let d = d as u128;
    ((n / d) as u64, (n % d) as u64)
}

/// Count leading zeros of a 64-bit word; returns 64 for `x == 0`.
#[inline]
pub(crate) fn clz_64(x: u64) -> u32 {
    x.leading_zeros()
}

/// 128x128 -> 256 unsigned multiply. Returns (lo, hi), each a 128-bit half of the product.
///
/// Schoolbook decomposition into four 64x64->128 partial products, combined with explicit
/// carry propagation.
#[inline]
pub(crate) fn umul_128x128_to_256(a: u128, b: u128) -> (u128, u128) {
    let a_lo = a as u64 as u128;
    let a_hi = (a >> 64) as u128;
    let b_lo = b as u64 as u128;
    let b_hi = (b >> 64) as u128;

    let ll = a_lo * b_lo;
    let hl = a_hi * b_lo;
    let lh = a_lo * b_hi;
    let hh = a_hi * b_hi;

    let mid = hl.wrapping_add(lh);
    let mid_carry = (mid < hl) as u128;

    let (lo, carry) = ll.overflowing_add(mid << 64);
    let hi = hh + (mid >> 64) + (mid_carry << 64) + carry as u128;

    (lo, hi)
}

/// 128x128 -> 128 unsigned multiply-high scaled for Q64.64: the middle 128 bits of the full
/// 256-bit product, rounded to nearest on the discarded bit 63 (ties up).
#[inline]
pub(crate) fn umulh_q64_64(a: u128, b: u128) -> u128 {
    let (lo, hi) = umul_128x128_to_256(a, b);
    let mid = (lo >> 64) | (hi << 64);
    let round_bit = (lo >> 63) & 1;
    mid.wrapping_add(round_bit)
}

/// 256/64 -> 128 unsigned divide, digit at a time; used as a fast path below.
#[inline]
fn div_wide_by_u64(high: u128, low: u128, divisor: u64) -> u128 {
    let n3 = (high >> 64) as u64;
    let n2 = high as u64;
    let n1 = (low >> 64) as u64;
    let n0 = low as u64;

    let (q3, r3) = (n3 as u128 / divisor as u128, n3 as u128 % divisor as u128);
    let (q2, r2) = (
        ((r3 << 64) | n2 as u128) / divisor as u128,
        ((r3 << 64) | n2 as u128) % divisor as u128,
    );
    let (q1, r1) = (
        ((r2 << 64) | n1 as u128) / divisor as u128,
        ((r2 << 64) | n1 as u128) % divisor as u128,
    );
    let q0 = ((r1 << 64) | n0 as u128) / divisor as u128;

    debug_assert!(q3 == 0 && q2 == 0, "udiv_256_by_128: quotient overflow");
    (q1 << 64) | q0
}

/// Shift a 256-bit value (high, low) left by `shift` bits (`shift < 128`), returning the four
/// 64-bit digits (n3, n2, n1, n0) from most to least significant.
#[inline]
fn shl_u256(high: u128, low: u128, shift: u32) -> (u64, u64, u64, u64) {
    if shift == 0 {
        return (
            (high >> 64) as u64,
            high as u64,
            (low >> 64) as u64,
            low as u64,
        );
    }
    let high_shifted = (high << shift) | (low >> (128 - shift));
    let low_shifted = low << shift;
    (
        (high_shifted >> 64) as u64,
        high_shifted as u64,
        (low_shifted >> 64) as u64,
        low_shifted as u64,
    )
}

/// Divide the normalized 3-digit value (n2, n1, n0) by the normalized 2-digit divisor
/// (d1, d0), returning the quotient digit and the 128-bit remainder.
#[inline]
fn div_3by2(n2: u64, n1: u64, n0: u64, d1: u64, d0: u64) -> (u64, u128) {
    let n_hi = ((n2 as u128) << 64) | (n1 as u128);
    let mut q_hat = if n2 >= d1 {
        u64::MAX
    } else {
        (n_hi / (d1 as u128)) as u64
    };
    let mut r_hat = n_hi - (q_hat as u128) * (d1 as u128);

    // Knuth guarantees at most two refinement steps once the divisor is normalized.
    if r_hat <= u64::MAX as u128 {
        let check = (q_hat as u128) * (d0 as u128);
        let right = (r_hat << 64) | (n0 as u128);
        if check > right {
            q_hat -= 1;
            r_hat += d1 as u128;
            if r_hat <= u64::MAX as u128 {
                let check = (q_hat as u128) * (d0 as u128);
                let right = (r_hat << 64) | (n0 as u128);
                if check > right {
                    q_hat -= 1;
                }
            }
        }
    }

    let product = (q_hat as u128) * (d0 as u128);
    let product_hi = (q_hat as u128) * (d1 as u128) + (product >> 64);

    let (sub_lo, borrow1) = (n0 as u128).overflowing_sub(product & ((1u128 << 64) - 1));
    let (sub_mid, borrow2) =
        (n1 as u128).overflowing_sub((product_hi & ((1u128 << 64) - 1)) + borrow1 as u128);
    let sub_hi = (n2 as u128).wrapping_sub((product_hi >> 64) + borrow2 as u128);

    if sub_hi > n2 as u128 {
        let add_lo = sub_lo.wrapping_add(d0 as u128);
        let carry = (add_lo < sub_lo) as u128;
        let add_mid = sub_mid.wrapping_add((d1 as u128) + carry);
        (
            q_hat - 1,
            (add_mid << 64) | (add_lo & ((1u128 << 64) - 1)),
        )
    } else {
        (
            q_hat,
            ((sub_mid & ((1u128 << 64) - 1)) << 64) | (sub_lo & ((1u128 << 64) - 1)),
        )
    }
}

/// Full 4-by-2 digit division: (n3, n2, n1, n0) / (d1, d0) -> (q1, q0).
#[inline]
fn div_4by2(n3: u64, n2: u64, n1: u64, n0: u64, d1: u64, d0: u64) -> (u64, u64) {
    let (q1, rem1) = div_3by2(n3, n2, n1, d1, d0);
    let r1_hi = (rem1 >> 64) as u64;
    let r1_lo = rem1 as u64;
    let (q0, _) = div_3by2(r1_hi, r1_lo, n0, d1, d0);
    (q1, q0)
}

/// 256/128 -> 128 unsigned divide via Knuth Algorithm D (normalize, estimate, refine).
///
/// Returns `None` if the quotient would not fit in 128 bits (i.e. `high >= divisor`) or if
/// `divisor == 0`; callers at the signed layer turn this into a saturating sentinel.
#[inline]
pub(crate) fn udiv_256_by_128(high: u128, low: u128, divisor: u128) -> Option<u128> {
    if divisor == 0 || high >= divisor {
        return None;
    }
    if high == 0 {
        return Some(low / divisor);
    }

    let d_hi = (divisor >> 64) as u64;
    if d_hi == 0 {
        return Some(div_wide_by_u64(high, low, divisor as u64));
    }

    let shift = divisor.leading_zeros();
    let divisor_norm = divisor << shift;
    let d1 = (divisor_norm >> 64) as u64;
    let d0 = divisor_norm as u64;

    let (n3, n2, n1, n0) = shl_u256(high, low, shift);
    let (q1, q0) = div_4by2(n3, n2, n1, n0, d1, d0);

    Some(((q1 as u128) << 64) | (q0 as u128))
}
