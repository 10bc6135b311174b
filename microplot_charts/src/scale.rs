// Copyright 2025 the Microplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! "Nice number" scaling.
//!
//! Rounds an arbitrary data range outward to bounds and a tick step drawn from
//! `{1, 2, 2.5, 5, 10} × 10^k`, so tick labels read as round numbers whatever
//! the data scale (cents, thousands, or fractions).

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::float::{div_pow10, mul_pow10};

/// Result of nice-number scaling over a raw `[min, max]` range.
///
/// The number of ticks this produces may differ from the number requested:
/// [`NiceScale::tick_count`] follows the rounded range and spacing rather than
/// forcing the requested count. Charts depend on that, so it is not corrected.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NiceScale {
    /// The raw span rounded up to a nice number.
    pub range: f64,
    /// Distance between adjacent ticks.
    pub tick_spacing: f64,
    /// Lower bound, rounded down to a multiple of `tick_spacing`.
    pub nice_min: f64,
    /// Upper bound, rounded up to a multiple of `tick_spacing`.
    pub nice_max: f64,
}

impl NiceScale {
    /// Scales `[min, max]` for roughly `desired_ticks` ticks.
    ///
    /// `max` must be greater than `min`; callers resolve zero-width ranges first
    /// (see [`crate::ValueRange::normalize_degenerate`]). A `desired_ticks` below 2
    /// is treated as 2.
    ///
    /// Finite bounds always give finite results. When the span or its rounding
    /// overflows, scaling runs a decade down and the bounds saturate at
    /// `±f64::MAX`.
    pub fn calculate(min: f64, max: f64, desired_ticks: usize) -> Self {
        debug_assert!(max > min, "nice scaling needs a non-empty range");
        let direct = Self::calculate_direct(min, max, desired_ticks);
        if direct.is_finite() {
            return direct;
        }

        let down = Self::calculate_direct(min / 10.0, max / 10.0, desired_ticks);
        let tick_spacing = (down.tick_spacing * 10.0).min(f64::MAX);
        let mut nice_min = down.nice_min * 10.0;
        let mut nice_max = down.nice_max * 10.0;
        if nice_min > min {
            nice_min -= tick_spacing;
        }
        if nice_max < max {
            nice_max += tick_spacing;
        }
        Self {
            range: (down.range * 10.0).min(f64::MAX),
            tick_spacing,
            nice_min: nice_min.max(-f64::MAX),
            nice_max: nice_max.min(f64::MAX),
        }
    }

    fn is_finite(&self) -> bool {
        self.tick_spacing > 0.0
            && self.range.is_finite()
            && self.tick_spacing.is_finite()
            && self.nice_min.is_finite()
            && self.nice_max.is_finite()
    }

    fn calculate_direct(min: f64, max: f64, desired_ticks: usize) -> Self {
        let intervals = desired_ticks.max(2) - 1;

        let range = nice_num(max - min, false);
        let tick_spacing = nice_num(range / intervals as f64, true);

        let mut nice_min = (min / tick_spacing).floor() * tick_spacing;
        let mut nice_max = (max / tick_spacing).ceil() * tick_spacing;
        // `floor`/`ceil` of a quotient that rounded onto an integer can land a
        // hair inside the data.
        if nice_min > min {
            nice_min -= tick_spacing;
        }
        if nice_max < max {
            nice_max += tick_spacing;
        }

        Self {
            range,
            tick_spacing,
            nice_min,
            nice_max,
        }
    }

    /// Number of whole tick steps in [`NiceScale::range`], capped so the last
    /// tick never falls below [`NiceScale::nice_min`].
    pub fn intervals(&self) -> usize {
        let s = self.tick_spacing;
        let over_range = self.range / s;
        // Divided separately so a saturated span does not overflow.
        let over_span = self.nice_max / s - self.nice_min / s;
        let n = (over_range.min(over_span) + 1.0e-9).floor();
        if n.is_finite() && n >= 0.0 {
            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                reason = "guarded by finite/non-negative checks and capped at 10k"
            )]
            {
                n.min(10_000.0) as usize
            }
        } else {
            0
        }
    }

    /// Number of ticks, counting both ends.
    ///
    /// Always at least 1. Every tick `nice_max - i * tick_spacing` lies within
    /// `[nice_min, nice_max]`.
    pub fn tick_count(&self) -> usize {
        self.intervals() + 1
    }
}

/// Rounds `x` to a nice number.
///
/// `x` is split into `f × 10^k` with `1 <= f < 10`, and `f` is replaced by a
/// member of `{1, 2, 2.5, 5, 10}`: the next one up when `round` is `false`, or
/// the nearest one when `round` is `true`.
///
/// Non-finite or non-positive inputs yield `0`.
pub fn nice_num(x: f64, round: bool) -> f64 {
    if !x.is_finite() || x <= 0.0 {
        return 0.0;
    }
    let exponent = {
        let e = x.log10().floor().clamp(-307.0, 308.0);
        #[allow(clippy::cast_possible_truncation, reason = "clamped to [-307, 308]")]
        {
            e as i32
        }
    };
    let fraction = div_pow10(x, exponent);

    let nice_fraction = if round {
        if fraction < 1.5 {
            1.0
        } else if fraction < 3.0 {
            2.0
        } else if fraction < 3.75 {
            2.5
        } else if fraction < 7.0 {
            5.0
        } else {
            10.0
        }
    } else if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 2.5 {
        2.5
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };

    mul_pow10(nice_fraction, exponent)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn nice_num_rounds_up_without_round() {
        assert!(close(nice_num(350.0, false), 500.0));
        assert!(close(nice_num(100.0, false), 100.0));
        assert!(close(nice_num(101.0, false), 200.0));
        assert!(close(nice_num(0.24, false), 0.25));
        assert!(close(nice_num(6.0, false), 10.0));
    }

    #[test]
    fn nice_num_rounds_to_nearest_with_round() {
        assert!(close(nice_num(250.0, true), 200.0));
        assert!(close(nice_num(3.5, true), 2.5));
        assert!(close(nice_num(0.14, true), 0.1));
        assert!(close(nice_num(4.5, true), 5.0));
        assert!(close(nice_num(80.0, true), 100.0));
    }

    #[test]
    fn nice_num_rejects_non_positive() {
        assert_eq!(nice_num(0.0, true), 0.0);
        assert_eq!(nice_num(-3.0, false), 0.0);
        assert_eq!(nice_num(f64::NAN, false), 0.0);
    }

    #[test]
    fn mixed_sign_range_scales_outward() {
        let s = NiceScale::calculate(-50.0, 300.0, 3);
        assert!(close(s.range, 500.0));
        assert!(close(s.tick_spacing, 200.0));
        assert!(close(s.nice_min, -200.0));
        assert!(close(s.nice_max, 400.0));
        assert_eq!(s.intervals(), 2);
        assert_eq!(s.tick_count(), 3);
    }

    #[test]
    fn fractional_range_uses_fractional_steps() {
        let s = NiceScale::calculate(0.12, 0.87, 5);
        assert!(s.nice_min <= 0.12);
        assert!(s.nice_max >= 0.87);
        assert!(close(s.tick_spacing, 0.2));
    }

    #[test]
    fn tick_count_may_differ_from_request() {
        let s = NiceScale::calculate(0.0, 100.0, 10);
        // 100 / 9 = 11.1 rounds to a spacing of 10 -> 11 ticks, not 10.
        assert!(close(s.tick_spacing, 10.0));
        assert_eq!(s.tick_count(), 11);
    }

    #[test]
    fn ticks_never_pass_nice_min() {
        let cases = [
            (-50.0, 300.0, 5),
            (0.0, 110.0, 5),
            (-50.0, 300.0, 3),
            (0.12, 0.87, 7),
        ];
        for (min, max, n) in cases {
            let s = NiceScale::calculate(min, max, n);
            let last = s.nice_max - (s.tick_count() - 1) as f64 * s.tick_spacing;
            assert!(last >= s.nice_min - 1e-9, "{s:?} ends at {last}");
        }
        // The rounded range allows 5 steps but the scaled span only holds 4.
        let s = NiceScale::calculate(-50.0, 300.0, 5);
        assert!(close(s.nice_min, -100.0));
        assert_eq!(s.tick_count(), 5);
        assert_eq!(NiceScale::calculate(0.0, 110.0, 5).tick_count(), 4);
    }

    #[test]
    fn overflowing_span_stays_finite() {
        let s = NiceScale::calculate(-1.0e308, 1.0e308, 5);
        assert!(s.range.is_finite() && s.tick_spacing.is_finite());
        assert!(s.tick_spacing > 0.0);
        assert!(s.nice_min.is_finite() && s.nice_min <= -1.0e308);
        assert!(s.nice_max.is_finite() && s.nice_max >= 1.0e308);
        assert!(s.tick_count() >= 2);
    }

    #[test]
    fn rounding_past_f64_max_stays_finite() {
        // The span fits but rounds up to 2e308.
        let s = NiceScale::calculate(-0.8e308, 0.8e308, 5);
        assert!(s.is_finite(), "{s:?}");
        assert!(s.nice_min <= -0.8e308 && s.nice_max >= 0.8e308);
    }

    #[test]
    fn nice_num_handles_extreme_magnitudes() {
        assert!(close(nice_num(3.0e306, false), 5.0e306));
        let tiny = nice_num(2.2e-306, true);
        assert!((tiny / 2.0e-306 - 1.0).abs() < 1e-9, "{tiny}");
    }

    #[test]
    fn fewer_than_two_ticks_behaves_like_two() {
        assert_eq!(
            NiceScale::calculate(0.0, 7.0, 0),
            NiceScale::calculate(0.0, 7.0, 2)
        );
    }
}
