//! This crate converts `f64` values to their shortest round-tripping decimal
//! string representation, using the Schubfach algorithm.
//!
//! Unlike the standard library's `ToString`/`Display`, which impose their own
//! output grammar, this crate exposes both a ready-to-use formatter
//! (`Buffer`/`dtoa`) and a lower-level `decompose` entry point that stops
//! right after the numeric core, handing back the raw `(sign, significand,
//! exponent)` tuple so callers can build a custom string representation
//! without re-deriving the Schubfach math themselves.
//!
//! # Example
//!
//! ```
//! use schubfach_dtoa::Buffer;
//!
//! let mut buf = Buffer::new();
//! assert_eq!(buf.format(1.25e20), "1.25e+20");
//! assert_eq!(buf.format(0.1), "0.1");
//! assert_eq!(buf.format(-0.0), "-0");
//! assert_eq!(buf.format(f64::INFINITY), "inf");
//! ```
//!
//! # Minimum Rust version
//!
//! The minimum Rust version required by this crate is 1.43.

#![deny(
    rust_2018_idioms,
    trivial_numeric_casts,
    unreachable_pub,
    unused_must_use,
    unused_qualifications
)]
#![no_std]

#[cfg(test)]
extern crate std;

mod digits;
mod format;
mod mul128;
mod pow10;
mod schubfach;


pub use format::BUF_LEN;

/// Which of the four "special" outcomes a value decomposes to, if any.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Special {
    /// The value is finite and nonzero; `Decimal::significand`/`exponent`
    /// hold the decomposition.
    None,
    /// The value is `+inf` or `-inf` (see `Decimal::sign`).
    Inf,
    /// The value is NaN.
    Nan,
    /// The value is `+0.0` or `-0.0` (see `Decimal::sign`).
    Zero,
}

/// The result of decomposing an `f64`: a sign, a `special` tag, and, when
/// `special == Special::None`, a significand/exponent pair such that
/// `significand * 10^exponent == value.abs()`.
///
/// `significand` is *not* pre-trimmed of trailing zeros; formatting it takes
/// the same path `Buffer::format` does.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Decimal {
    pub sign: bool,
    pub special: Special,
    pub significand: u64,
    pub exponent: i32,
}

/// Decomposes `value` into its shortest round-tripping decimal significand
/// and exponent, without formatting it to a string.
///
/// This is a thin wrapper that stops right after the Schubfach core; most
/// callers that just want a string should use `Buffer::format` or `dtoa`
/// instead.
pub fn decompose(value: f64) -> Decimal {
    let bits = value.to_bits();
    let sign = (bits >> 63) != 0;
    let bin_exp = (bits >> 52) & 0x7ff;
    let bin_sig = bits & ((1u64 << 52) - 1);

    if bin_exp == 0x7ff {
        let special = if bin_sig == 0 { Special::Inf } else { Special::Nan };
        return Decimal { sign, special, significand: 0, exponent: 0 };
    }
    if bin_exp == 0 && bin_sig == 0 {
        return Decimal { sign, special: Special::Zero, significand: 0, exponent: 0 };
    }

    let d = schubfach::decompose(bits);
    Decimal {
        sign,
        special: Special::None,
        significand: d.significand,
        exponent: d.exponent,
    }
}

/// Writes `value` to `buf`, which must be at least `BUF_LEN` bytes long, and
/// returns the number of bytes written (not counting the NUL terminator
/// `dtoa` also writes at `buf[returned_len]`).
///
/// This is the primary entry point, with a raw-pointer contract replaced by
/// a slice. Most callers should prefer `Buffer`, which owns a correctly
/// sized buffer and returns a `&str` directly.
pub fn dtoa(value: f64, buf: &mut [u8]) -> usize {
    format::dtoa(value, buf)
}

/// An allocation-free, stack-resident buffer for formatting one `f64` at a
/// time, in the style of `itoa`/`ryu`'s `Buffer` types.
///
/// # Example
///
/// ```
/// use schubfach_dtoa::Buffer;
///
/// let mut buf = Buffer::new();
/// let s = buf.format(3.14);
/// assert_eq!(s, "3.14");
/// ```
pub struct Buffer {
    bytes: [u8; BUF_LEN],
}

impl Buffer {
    /// Creates a new, empty buffer.
    #[inline]
    pub fn new() -> Self {
        Buffer { bytes: [0u8; BUF_LEN] }
    }

    /// Formats `value`, returning a reference to the result borrowed from
    /// this buffer. Each call overwrites the previous result.
    #[inline]
    pub fn format(&mut self, value: f64) -> &str {
        let len = format::dtoa(value, &mut self.bytes);
        // `format::dtoa` only ever writes ASCII digits, '-', '.', 'e', '+'
        // and the special-value tokens, so the written prefix is always
        // valid UTF-8.
        core::str::from_utf8(&self.bytes[..len]).unwrap()
    }
}

impl Default for Buffer {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Buffer").finish_non_exhaustive()
    }
}
