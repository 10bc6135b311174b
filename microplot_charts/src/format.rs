// Copyright 2025 the Microplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Default tick label formatting.

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::float::mul_pow10;

/// Most fraction digits a label ever gets; `f64` carries no more.
const MAX_FRACTION_DIGITS: usize = 17;

/// Formats a tick value with as many fraction digits as `spacing` needs.
///
/// Integer spacings print integers, a spacing of `0.25` prints two digits, a
/// spacing of `1e-7` prints seven. Trailing zeros are trimmed, so `0.50` with a
/// spacing of `0.25` prints `0.5`. Tick values carry float noise from their
/// arithmetic (`0.30000000000000004`); rounding to the spacing's digits absorbs
/// it. Negative zero prints as `0`.
///
/// A zero or non-finite `spacing` falls back to six digits.
pub fn format_tick(v: f64, spacing: f64) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    let digits = fraction_digits(spacing);
    let s = format!("{v:.digits$}");
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s.as_str()
    };
    if s == "-0" {
        String::from("0")
    } else {
        String::from(s)
    }
}

/// Fraction digits needed to tell multiples of `spacing` apart.
fn fraction_digits(spacing: f64) -> usize {
    let spacing = spacing.abs();
    if !spacing.is_finite() || spacing == 0.0 {
        return 6;
    }
    let magnitude = -spacing.log10().floor();
    if magnitude <= 0.0 {
        return 0;
    }
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "positive and clamped to the digit limit"
    )]
    let mut digits = magnitude.min(MAX_FRACTION_DIGITS as f64) as usize;
    // Spacings like `0.25` need one more digit than their magnitude.
    while digits < MAX_FRACTION_DIGITS {
        #[allow(clippy::cast_possible_wrap, reason = "at most 17")]
        let scaled = mul_pow10(spacing, digits as i32);
        if (scaled - scaled.round()).abs() <= 1e-6 * scaled {
            break;
        }
        digits += 1;
    }
    digits
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn integer_spacing_prints_integers() {
        assert_eq!(format_tick(400.0, 200.0), "400");
        assert_eq!(format_tick(-200.0, 200.0), "-200");
        assert_eq!(format_tick(0.0, 1.0), "0");
        assert_eq!(format_tick(1234.6, 1.0), "1235");
    }

    #[test]
    fn fraction_digits_follow_the_spacing() {
        assert_eq!(format_tick(0.1 + 0.2, 0.1), "0.3");
        assert_eq!(format_tick(0.25, 0.25), "0.25");
        assert_eq!(format_tick(0.5, 0.25), "0.5");
        assert_eq!(format_tick(-1.0e-12, 0.1), "0");
    }

    #[test]
    fn tiny_spacings_keep_ticks_apart() {
        assert_eq!(format_tick(3.0e-7, 1.0e-7), "0.0000003");
        assert_eq!(format_tick(2.5e-9, 2.5e-9), "0.0000000025");
        assert_ne!(format_tick(4.0e-7, 1.0e-7), format_tick(5.0e-7, 1.0e-7));
    }

    #[test]
    fn unusable_spacing_falls_back_to_six_digits() {
        assert_eq!(format_tick(0.1234567, 0.0), "0.123457");
        assert_eq!(format_tick(2.0, f64::NAN), "2");
    }
}
