//! The Schubfach decomposer: given a finite, nonzero `f64`, computes
//! `(significand, exponent)` such that `significand * 10^exponent` is the
//! shortest decimal that round-trips back to the input.
//!
//! Follows `mulle_dtoa`/`mulle_dtoa_decompose` from `mulle-dtoa`, which
//! implement the same non-fast-path Schubfach algorithm, step for step.

use crate::mul128::mul192_upper_modified;
use crate::pow10::pow10_significand;

const NUM_SIG_BITS: u32 = 52;
const EXP_MASK: u64 = 0x7ff;
const IMPLICIT_BIT: u64 = 1 << NUM_SIG_BITS;

const LOG10_2_SIG: i64 = 315_653;
const LOG10_2_EXP: u32 = 20;
const LOG10_3_OVER_4_SIG: i64 = -131_008;

const LOG2_POW10_SIG: i64 = 217_707;
const LOG2_POW10_EXP: u32 = 16;

/// Bit pattern of a finite, nonzero `f64`, already reduced to an unbiased
/// binary exponent and an integer significand with the implicit bit folded
/// in.
struct Decoded {
    bin_exp: i64,
    bin_sig: u64,
    regular: bool,
}

fn decode(bits: u64) -> Decoded {
    let mut bin_exp = ((bits >> NUM_SIG_BITS) & EXP_MASK) as i64;
    let mut bin_sig = bits & (IMPLICIT_BIT - 1);
    let mut regular = bin_sig != 0;

    if bin_exp == 0 {
        // Subnormal: reconstruct as if bin_exp were 1, with the same
        // mantissa bits (there is no implicit bit to fold in yet).
        bin_sig ^= IMPLICIT_BIT;
        bin_exp = 1;
        regular = true;
    }
    bin_sig ^= IMPLICIT_BIT;
    bin_exp -= NUM_SIG_BITS as i64 + 1023;

    Decoded { bin_exp, bin_sig, regular }
}

/// The non-special-case outcome of decomposing a finite, nonzero double:
/// `significand * 10^exponent == value`, with no trailing-zero trimming
/// applied yet (that is `digits::write_significand`'s job).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Decomposed {
    pub(crate) significand: u64,
    pub(crate) exponent: i32,
}

/// Decomposes the bit pattern of a finite, nonzero `f64` (sign bit already
/// stripped off by the caller) into its shortest round-tripping decimal
/// significand and exponent.
pub(crate) fn decompose(bits: u64) -> Decomposed {
    let decoded = decode(bits);

    // Small-integer fast path: exact integers need no scaling at all.
    if decoded.bin_exp < 0 && decoded.bin_exp >= -(NUM_SIG_BITS as i64) {
        let shift = (-decoded.bin_exp) as u32;
        let f = decoded.bin_sig >> shift;
        if (f << shift) == decoded.bin_sig {
            return Decomposed { significand: f, exponent: 0 };
        }
    }

    decompose_general(decoded)
}

/// The general (non-fast-path) decomposition, shared by the small-integer
/// fast path's fallback and by `decompose_without_fast_path` (used to check
/// that the fast path never disagrees with the general algorithm it
/// shortcuts).
fn decompose_general(decoded: Decoded) -> Decomposed {
    let Decoded { bin_exp, bin_sig, regular } = decoded;

    // Rounding interval in quarter-ulp units (step 4).
    let bin_sig_shifted = bin_sig << 2;
    let lower0 = bin_sig_shifted.wrapping_sub(regular as u64 + 1);
    let upper0 = bin_sig_shifted + 2;

    // Decimal exponent estimate (step 5).
    debug_assert!(bin_exp >= -1334 && bin_exp <= 2620);
    let dec_exp = ((bin_exp * LOG10_2_SIG
        + if regular { 0 } else { LOG10_3_OVER_4_SIG })
        >> LOG10_2_EXP) as i32;

    debug_assert!(dec_exp >= -350 && dec_exp <= 350);
    let (pow10_hi, pow10_lo) = pow10_significand(dec_exp);

    // Binary shift for scaling (step 6).
    let pow10_bin_exp = ((-(dec_exp as i64)) * LOG2_POW10_SIG) >> LOG2_POW10_EXP;
    let shift = (bin_exp + pow10_bin_exp + 2) as u32;

    // Scale endpoints (step 7).
    let parity = bin_sig & 1;
    let lower = mul192_upper_modified(pow10_hi, pow10_lo, lower0 << shift) + parity;
    let upper = mul192_upper_modified(pow10_hi, pow10_lo, upper0 << shift) - parity;

    // Single shorter candidate optimization (step 8).
    let shorter = 10 * ((upper >> 2) / 10);
    if (shorter << 2) >= lower {
        return Decomposed { significand: shorter, exponent: dec_exp };
    }

    // Two-candidate selection (step 9).
    let scaled_sig = mul192_upper_modified(pow10_hi, pow10_lo, bin_sig_shifted << shift);
    let dec_sig_under = scaled_sig >> 2;
    let dec_sig_over = dec_sig_under + 1;

    let cmp = scaled_sig as i64 - ((dec_sig_under.wrapping_add(dec_sig_over) as i64) << 1);
    let under_closer = cmp < 0 || (cmp == 0 && (dec_sig_under & 1) == 0);
    let under_in = (dec_sig_under << 2) >= lower;

    let significand = if under_closer && under_in { dec_sig_under } else { dec_sig_over };
    Decomposed { significand, exponent: dec_exp }
}

/// Reinterprets `bin_exp`/`bin_sig` without going through `decompose`'s
/// small-integer fast path, matching `mulle_dtoa_decompose`'s contract that
/// every non-special double (including small integers) runs the full
/// algorithm so that the returned `(significand, exponent)` always comes
/// from the same code path regardless of the caller.
///
/// The fast path is an optimization, not a change in the decomposed value:
/// for an exact integer, the full algorithm's `(significand, exponent)` and
/// the fast path's `(f, 0)` always denote the same number, even though the
/// pairs themselves are rarely equal member-for-member (the full
/// algorithm's significand is always scaled to 16-17 digits; the fast
/// path's is the bare integer). `decompose` uses the fast path
/// unconditionally; this function exists so tests can check that numeric
/// agreement.
#[cfg(test)]
pub(crate) fn decompose_without_fast_path(bits: u64) -> Decomposed {
    decompose_general(decode(bits))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits_of(v: f64) -> u64 {
        v.to_bits()
    }

    fn value_of(d: Decomposed) -> f64 {
        // Only used in tests, where std's float parsing is available.
        std::format!("{}e{}", d.significand, d.exponent).parse().unwrap()
    }

    #[test]
    fn one_point_zero_is_one_times_ten_to_zero() {
        let d = decompose(bits_of(1.0));
        assert_eq!(d, Decomposed { significand: 1, exponent: 0 });
    }

    #[test]
    fn small_integers_use_the_fast_path_and_agree_with_the_full_algorithm() {
        for v in [2.0_f64, 10.0, 1024.0, 123.0] {
            let fast = decompose(bits_of(v));
            let full = decompose_without_fast_path(bits_of(v));
            assert_eq!(
                value_of(fast),
                value_of(full),
                "mismatch for {v}: fast={fast:?} full={full:?}"
            );
        }
    }

    #[test]
    fn round_trips_for_a_handful_of_values() {
        for v in [0.1_f64, 1.0, -1.0, 100.0, 3.141592653589793, 1e20, 1e6, 1e7] {
            let d = decompose(bits_of(v.abs()));
            assert_eq!(value_of(d), v.abs(), "round-trip failed for {v}");
        }
    }

    #[test]
    fn smallest_subnormal_round_trips() {
        let v = f64::from_bits(1);
        let d = decompose(bits_of(v));
        assert_eq!(value_of(d), v);
    }

    #[test]
    fn dbl_max_round_trips() {
        let d = decompose(bits_of(f64::MAX));
        assert_eq!(value_of(d), f64::MAX);
    }
}
