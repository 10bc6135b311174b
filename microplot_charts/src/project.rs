// Copyright 2025 the Microplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value-to-pixel projection with grow-from-baseline animation.

use kurbo::{Point, Size};

use crate::data::ValueRange;
use crate::error::{LayoutError, LayoutResult};

/// Maps `(index, value)` pairs to pixel positions for one frame.
///
/// X is purely positional: slot centers separated by a uniform margin. Y blends
/// between the origin baseline (at progress `0`) and the value's scaled row (at
/// progress `1`). Pixel rows grow downward, so larger values sit higher.
///
/// Projection is pure; a projector can be shared across every entry of a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointProjector {
    margin: f64,
    progress: f64,
    range: ValueRange,
    slot: Size,
    origin_baseline: f64,
    header_top: f64,
    origin_x: f64,
}

impl PointProjector {
    /// Creates a projector over a scaled `range`.
    ///
    /// `header_top` is the row of `range.max`; `slot.height` is the distance
    /// from there to the row of `range.min`. `animation_progress` is clamped to
    /// `[0, 1]`.
    ///
    /// Fails if `range` has zero or non-finite width, which happens when raw
    /// data bounds are passed instead of the range returned by axis layout.
    pub fn new(
        range: ValueRange,
        slot: Size,
        margin: f64,
        origin_baseline: f64,
        header_top: f64,
        animation_progress: f64,
    ) -> LayoutResult<Self> {
        let half = range.max / 2.0 - range.min / 2.0;
        if !half.is_finite() || half == 0.0 {
            return Err(LayoutError::ZeroValueRange {
                value_range: range.span(),
            });
        }
        let progress = if animation_progress.is_nan() {
            1.0
        } else {
            animation_progress.clamp(0.0, 1.0)
        };
        Ok(Self {
            margin,
            progress,
            range,
            slot,
            origin_baseline,
            header_top,
            origin_x: 0.0,
        })
    }

    /// Shifts every x coordinate, e.g. past labels on the leading edge.
    pub fn with_origin_x(mut self, origin_x: f64) -> Self {
        self.origin_x = origin_x;
        self
    }

    /// The clamped animation progress.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Center of slot `index`.
    pub fn slot_center_x(&self, index: usize) -> f64 {
        self.origin_x
            + self.margin
            + self.slot.width / 2.0
            + index as f64 * (self.slot.width + self.margin)
    }

    /// Row of `value` at full progress.
    pub fn value_y(&self, value: f64) -> f64 {
        self.header_top + self.range.fraction_from_max(value) * self.slot.height
    }

    /// Projects `value` in slot `index` at the current progress.
    pub fn project(&self, index: usize, value: f64) -> Point {
        let t = self.progress;
        let from_baseline = (1.0 - t) * (self.origin_baseline - self.header_top);
        let to_value = t * self.range.fraction_from_max(value) * self.slot.height;
        Point::new(
            self.slot_center_x(index),
            self.header_top + from_baseline + to_value,
        )
    }
}
