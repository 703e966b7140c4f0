//! 128-bit multiply primitives used to scale the binary significand by a
//! power of ten.

/// Full 128-bit product of two 64-bit integers.
#[inline]
pub(crate) const fn mul128(a: u64, b: u64) -> (u64, u64) {
    let p = (a as u128) * (b as u128);
    ((p >> 64) as u64, p as u64)
}

#[inline]
const fn mul128_upper64(a: u64, b: u64) -> u64 {
    (((a as u128) * (b as u128)) >> 64) as u64
}

/// Upper 64 bits of `((ph << 64) | pl) * m`, with the low bit of the result
/// forced to the OR of all bits discarded by the implicit `>> 64` truncation
/// (a sticky "inexactness" bit).
///
/// The sticky bit is load-bearing for the round-half-to-even tie rule in
/// `schubfach.rs`; it must not be simplified away.
#[inline]
pub(crate) const fn mul192_upper_modified(ph: u64, pl: u64, m: u64) -> u64 {
    let x_hi = mul128_upper64(pl, m);
    let (y_hi, y_lo) = mul128(ph, m);
    let z = (y_lo >> 1).wrapping_add(x_hi);
    let r = y_hi.wrapping_add(z >> 63);
    const MASK: u64 = (1u64 << 63) - 1;
    r | (((z & MASK).wrapping_add(MASK)) >> 63)
}
