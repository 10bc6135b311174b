// Copyright 2025 the Microplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Float math shared by scaling code.
//!
//! `core` has no `floor`, `ceil`, `round` or `log10` for `f64`; without `std`
//! they come from `libm` through [`FloatExt`].

/// Rounding and `log10` for `no_std` builds.
#[cfg(not(feature = "std"))]
pub(crate) trait FloatExt {
    fn floor(self) -> Self;
    fn ceil(self) -> Self;
    fn round(self) -> Self;
    fn log10(self) -> Self;
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
impl FloatExt for f64 {
    fn floor(self) -> Self {
        libm::floor(self)
    }

    fn ceil(self) -> Self {
        libm::ceil(self)
    }

    fn round(self) -> Self {
        libm::round(self)
    }

    fn log10(self) -> Self {
        libm::log10(self)
    }
}

#[cfg(all(not(feature = "std"), not(feature = "libm")))]
compile_error!("microplot_charts requires either the `std` or `libm` feature");

/// `10^k` by repeated multiplication; exact through `10^22`.
pub(crate) fn pow10(k: u32) -> f64 {
    (0..k).fold(1.0, |acc, _| acc * 10.0)
}

/// `x × 10^exponent`, dividing for negative exponents.
///
/// `3.0 * 0.1` drifts, `3.0 / 10.0` does not.
pub(crate) fn mul_pow10(x: f64, exponent: i32) -> f64 {
    if exponent >= 0 {
        x * pow10(exponent.unsigned_abs())
    } else {
        x / pow10(exponent.unsigned_abs())
    }
}

/// `x × 10^-exponent`.
pub(crate) fn div_pow10(x: f64, exponent: i32) -> f64 {
    if exponent >= 0 {
        x / pow10(exponent.unsigned_abs())
    } else {
        x * pow10(exponent.unsigned_abs())
    }
}
