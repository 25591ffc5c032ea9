//! Integer amount arithmetic.
//!
//! Amounts are raw `u128` units of the host asset. Every division truncates
//! toward zero; no floating point is ever involved.

/// Basis-point denominator: 10_000 bps = 100%.
pub const BPS_DENOMINATOR: u128 = 10_000;

/// `floor(amount * numerator / denominator)` without forming the full product.
///
/// Splits `amount = q * denominator + r` so the result is
/// `q * numerator + floor(r * numerator / denominator)`. The second term
/// cannot overflow for any `u64` operands; only the first term is checked.
/// Returns `None` on overflow or a zero denominator.
pub fn mul_div_floor(amount: u128, numerator: u64, denominator: u64) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let num = numerator as u128;
    let den = denominator as u128;
    let whole = (amount / den).checked_mul(num)?;
    let part = (amount % den) * num / den;
    whole.checked_add(part)
}

/// `floor(a * b / d)` for arbitrary `u128` operands, using a 256-bit
/// intermediate product. Returns `None` when `d == 0` or the quotient does not
/// fit in `u128`. With `b <= d` the quotient is at most `a` and always fits.
pub fn mul_div_floor_wide(a: u128, b: u128, d: u128) -> Option<u128> {
    if d == 0 {
        return None;
    }
    let (hi, lo) = widening_mul(a, b);
    if hi >= d {
        return None;
    }
    // Restoring long division of (hi, lo) by d; `rem` stays below `d`.
    let mut rem = hi;
    let mut quotient = 0u128;
    for bit in (0..128).rev() {
        let carry = rem >> 127;
        rem = (rem << 1) | ((lo >> bit) & 1);
        quotient <<= 1;
        if carry == 1 || rem >= d {
            rem = rem.wrapping_sub(d);
            quotient |= 1;
        }
    }
    Some(quotient)
}

/// Full 256-bit product of two `u128` values as `(high, low)` halves.
fn widening_mul(a: u128, b: u128) -> (u128, u128) {
    const MASK: u128 = u64::MAX as u128;
    let (a_lo, a_hi) = (a & MASK, a >> 64);
    let (b_lo, b_hi) = (b & MASK, b >> 64);
    let ll = a_lo * b_lo;
    let lh = a_lo * b_hi;
    let hl = a_hi * b_lo;
    let hh = a_hi * b_hi;
    let mid = (ll >> 64) + (lh & MASK) + (hl & MASK);
    let lo = (ll & MASK) | (mid << 64);
    let hi = hh + (lh >> 64) + (hl >> 64) + (mid >> 64);
    (hi, lo)
}

/// `floor(amount * bps / 10_000)`.
pub fn bps_of(amount: u128, bps: u32) -> Option<u128> {
    mul_div_floor(amount, bps as u64, BPS_DENOMINATOR as u64)
}
