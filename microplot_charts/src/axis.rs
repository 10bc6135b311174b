// Copyright 2025 the Microplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis layout: tick computation plus label-driven sizing.
//!
//! The plot rectangle depends on how much room the tick labels take, and the
//! tick labels depend on the scaled range. [`AxisConfig::compute`] resolves
//! both in one pass: it nice-scales the range, formats every tick, measures the
//! labels, and reports how much of the available extent is left for the plot.
//!
//! The same computation serves both orientations. A [`AxisKind::Value`] axis
//! stands beside the plot and consumes width; a [`AxisKind::Category`] axis
//! runs along it and consumes height.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use microplot_text::{TextMeasurer, TextStyle};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::data::ValueRange;
use crate::error::{LayoutError, LayoutResult};
use crate::format::format_tick;
use crate::scale::NiceScale;

/// Appended to every tick label before measuring.
///
/// Text engines tend to under-report the extent of the final glyph, so the
/// measured width is deliberately one character wider than the label.
pub const MEASURE_SENTINEL: char = '0';

/// A caller-supplied tick label formatter.
///
/// Called once per tick per layout pass; it must be deterministic. Shareable
/// across threads so configured charts can lay out on any thread.
pub type LabelFormatter = Arc<dyn Fn(f64) -> String + Send + Sync>;

/// Which edge of the plot an axis' labels are drawn on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisPosition {
    /// Left of the plot for a value axis, above it for a category axis.
    ///
    /// Labels here push the plot origin away from the edge.
    Leading,
    /// Right of the plot for a value axis, below it for a category axis.
    Trailing,
}

/// The measured dimension of an axis' labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisKind {
    /// A vertical axis beside the plot; labels consume width.
    Value,
    /// A horizontal axis along the plot; labels consume height.
    Category,
}

/// Axis configuration supplied by the widget layer.
#[derive(Clone)]
pub struct AxisConfig {
    /// Orientation of the axis.
    pub kind: AxisKind,
    /// Whether tick labels are drawn (and therefore measured).
    pub show_text: bool,
    /// Whether gridlines are drawn at each tick.
    pub show_lines: bool,
    /// Requested number of ticks.
    ///
    /// Exact for a fixed range; a hint for an auto-scaled one.
    pub max_ticks: usize,
    /// Tick label formatter. `None` uses [`format_tick`].
    pub label_formatter: Option<LabelFormatter>,
    /// Style used to measure tick labels.
    pub text_style: TextStyle,
    /// Edge the labels are drawn on.
    pub position: AxisPosition,
    /// A range to use verbatim instead of the data range.
    pub fixed_range: Option<ValueRange>,
}

impl core::fmt::Debug for AxisConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AxisConfig")
            .field("kind", &self.kind)
            .field("show_text", &self.show_text)
            .field("show_lines", &self.show_lines)
            .field("max_ticks", &self.max_ticks)
            .field("label_formatter", &self.label_formatter.is_some())
            .field("text_style", &self.text_style)
            .field("position", &self.position)
            .field("fixed_range", &self.fixed_range)
            .finish()
    }
}

impl AxisConfig {
    /// Creates an axis with labels and gridlines shown, 5 ticks, auto range.
    ///
    /// Labels are drawn on the leading edge of a value axis and the trailing
    /// edge of a category axis.
    pub fn new(kind: AxisKind) -> Self {
        let position = match kind {
            AxisKind::Value => AxisPosition::Leading,
            AxisKind::Category => AxisPosition::Trailing,
        };
        Self {
            kind,
            show_text: true,
            show_lines: true,
            max_ticks: 5,
            label_formatter: None,
            text_style: TextStyle::new(12.0),
            position,
            fixed_range: None,
        }
    }

    /// Convenience constructor for a value axis.
    pub fn value() -> Self {
        Self::new(AxisKind::Value)
    }

    /// Convenience constructor for a category axis.
    pub fn category() -> Self {
        Self::new(AxisKind::Category)
    }

    /// Enable or disable tick labels.
    pub fn with_text(mut self, show_text: bool) -> Self {
        self.show_text = show_text;
        self
    }

    /// Enable or disable gridlines.
    pub fn with_lines(mut self, show_lines: bool) -> Self {
        self.show_lines = show_lines;
        self
    }

    /// Set the requested tick count.
    pub fn with_max_ticks(mut self, max_ticks: usize) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    /// Set a custom tick label formatter.
    pub fn with_label_formatter(
        mut self,
        f: impl Fn(f64) -> String + Send + Sync + 'static,
    ) -> Self {
        self.label_formatter = Some(Arc::new(f));
        self
    }

    /// Set the label text style.
    pub fn with_text_style(mut self, text_style: TextStyle) -> Self {
        self.text_style = text_style;
        self
    }

    /// Set the label edge.
    pub fn with_position(mut self, position: AxisPosition) -> Self {
        self.position = position;
        self
    }

    /// Use `[min, max]` verbatim, with exactly `max_ticks` evenly spaced ticks.
    pub fn with_fixed_range(mut self, min: f64, max: f64) -> Self {
        self.fixed_range = Some(ValueRange::new(min, max));
        self
    }

    /// Go back to deriving the range from data.
    pub fn with_auto_range(mut self) -> Self {
        self.fixed_range = None;
        self
    }

    fn format_label(&self, v: f64, spacing: f64) -> String {
        match &self.label_formatter {
            Some(f) => (f)(v),
            None => format_tick(v, spacing),
        }
    }

    /// Computes ticks, labels, and the space left over for the plot.
    ///
    /// `data_range` is the raw range of the data (ignored when a fixed range is
    /// configured); `available_extent` is the plot width for a value axis or
    /// height for a category axis.
    ///
    /// The returned [`AxisLayout::range`] supersedes `data_range`: points must be
    /// projected against it.
    ///
    /// A hidden axis (neither labels nor lines) and an axis with no data both
    /// leave the extent untouched and produce no ticks. Errors only for a fixed
    /// range with fewer than 2 ticks or non-finite bounds.
    pub fn compute(
        &self,
        measurer: &dyn TextMeasurer,
        data_range: Option<ValueRange>,
        available_extent: f64,
    ) -> LayoutResult<AxisLayout> {
        if !self.show_text && !self.show_lines {
            return Ok(AxisLayout::untouched(data_range, available_extent));
        }

        let raw = match self.fixed_range {
            Some(fixed) => {
                if !fixed.is_finite() {
                    return Err(LayoutError::NonFiniteRange {
                        min: fixed.min,
                        max: fixed.max,
                    });
                }
                if self.max_ticks < 2 {
                    return Err(LayoutError::FixedRangeTickCount {
                        max_ticks: self.max_ticks,
                    });
                }
                fixed
            }
            None => match data_range {
                Some(range) => range,
                None => return Ok(AxisLayout::untouched(None, available_extent)),
            },
        };
        let raw = raw.normalize_degenerate();

        // Steps are kept halved so spans wider than `f64::MAX` stay finite.
        let (range, half_step, count) = if self.fixed_range.is_some() {
            let half_step = (raw.max / 2.0 - raw.min / 2.0) / (self.max_ticks - 1) as f64;
            (raw, half_step, self.max_ticks)
        } else {
            let nice = NiceScale::calculate(raw.min, raw.max, self.max_ticks);
            let count = nice.tick_count();
            if count != self.max_ticks {
                debug!(
                    requested = self.max_ticks,
                    actual = count,
                    "nice scaling changed the tick count"
                );
            }
            (
                ValueRange::new(nice.nice_min, nice.nice_max),
                nice.tick_spacing / 2.0,
                count,
            )
        };
        let spacing = (half_step * 2.0).min(f64::MAX);

        let values: SmallVec<[f64; 8]> = (0..count)
            .map(|i| 2.0 * (range.max / 2.0 - i as f64 * half_step))
            .collect();
        let labels: Vec<String> = values
            .iter()
            .map(|v| self.format_label(*v, spacing))
            .collect();

        let label_extent = if self.show_text {
            self.measure_labels(measurer, &labels)
        } else {
            0.0
        };
        let leading_shift = match self.position {
            AxisPosition::Leading => label_extent,
            AxisPosition::Trailing => 0.0,
        };

        trace!(
            kind = ?self.kind,
            min = range.min,
            max = range.max,
            spacing,
            ticks = count,
            label_extent,
            "computed axis"
        );

        Ok(AxisLayout {
            range: Some(range),
            ticks: TickSet { values, spacing },
            labels,
            label_extent,
            consumed_extent: available_extent - label_extent,
            leading_shift,
        })
    }

    /// Largest label width (value axis) or height (category axis).
    fn measure_labels(&self, measurer: &dyn TextMeasurer, labels: &[String]) -> f64 {
        let padded: Vec<String> = labels
            .iter()
            .filter(|label| !label.is_empty())
            .map(|label| {
                let mut s = label.clone();
                s.push(MEASURE_SENTINEL);
                s
            })
            .collect();
        let texts: Vec<&str> = padded.iter().map(String::as_str).collect();

        measurer
            .measure_batch(&texts, &self.text_style)
            .iter()
            .map(|m| match self.kind {
                AxisKind::Value => m.width(),
                AxisKind::Category => m.height(),
            })
            .fold(0.0, f64::max)
    }
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self::value()
    }
}

/// Tick values, descending from the top of the scaled range.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickSet {
    /// Tick values, largest first.
    pub values: SmallVec<[f64; 8]>,
    /// Distance between adjacent ticks.
    pub spacing: f64,
}

impl TickSet {
    /// Number of ticks.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if there are no ticks.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates tick values, largest first.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }
}

/// Output of [`AxisConfig::compute`].
#[derive(Clone, Debug, PartialEq)]
pub struct AxisLayout {
    /// The scaled range to project against.
    ///
    /// For a hidden axis this is the data range as given; `None` without data.
    pub range: Option<ValueRange>,
    /// Tick values, for gridlines.
    pub ticks: TickSet,
    /// Formatted tick labels, parallel to `ticks`.
    pub labels: Vec<String>,
    /// Largest measured label dimension (zero when labels are hidden).
    pub label_extent: f64,
    /// What remains of the available extent: `available - label_extent`.
    pub consumed_extent: f64,
    /// Offset of the plot origin caused by labels on the leading edge.
    pub leading_shift: f64,
}

impl AxisLayout {
    fn untouched(range: Option<ValueRange>, available_extent: f64) -> Self {
        Self {
            range,
            ticks: TickSet::default(),
            labels: Vec::new(),
            label_extent: 0.0,
            consumed_extent: available_extent,
            leading_shift: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;
    use alloc::vec;

    use microplot_text::TextMetrics;

    use super::*;
    use crate::data::Entry;

    /// 10 units per char, 12 units tall.
    struct GridMeasurer;

    impl TextMeasurer for GridMeasurer {
        fn measure(&self, text: &str, _style: &TextStyle) -> TextMetrics {
            TextMetrics {
                advance_width: 10.0 * text.chars().count() as f64,
                ascent: 9.0,
                descent: 3.0,
                leading: 0.0,
            }
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn hidden_axis_leaves_layout_alone() {
        let axis = AxisConfig::value().with_text(false).with_lines(false);
        let data = ValueRange::new(3.0, 3.0);
        let out = axis.compute(&GridMeasurer, Some(data), 320.0).unwrap();
        assert_eq!(out.consumed_extent, 320.0);
        assert_eq!(out.leading_shift, 0.0);
        assert!(out.ticks.is_empty());
        assert!(out.labels.is_empty());
        assert_eq!(out.range, Some(data));
    }

    #[test]
    fn empty_data_leaves_layout_alone() {
        let out = AxisConfig::value()
            .compute(&GridMeasurer, None, 200.0)
            .unwrap();
        assert_eq!(out.consumed_extent, 200.0);
        assert!(out.ticks.is_empty());
        assert_eq!(out.range, None);
    }

    #[test]
    fn all_zero_data_expands_upward() {
        let out = AxisConfig::value()
            .compute(&GridMeasurer, Some(ValueRange::new(0.0, 0.0)), 200.0)
            .unwrap();
        let range = out.range.unwrap();
        assert!(range.max >= 100.0, "got {range:?}");
        assert!(range.min <= 0.0);
    }

    #[test]
    fn all_negative_point_collapses_to_zero() {
        let out = AxisConfig::value()
            .compute(&GridMeasurer, Some(ValueRange::new(-50.0, -50.0)), 200.0)
            .unwrap();
        let range = out.range.unwrap();
        assert_eq!(range.max, 0.0);
        assert!(range.min <= -50.0);
        assert_eq!(out.labels.first().map(String::as_str), Some("0"));
    }

    #[test]
    fn fixed_range_is_used_verbatim() {
        let axis = AxisConfig::value()
            .with_fixed_range(-1.0, 7.3)
            .with_max_ticks(5)
            .with_label_formatter(|_| "x".to_string());
        let out = axis
            .compute(&GridMeasurer, Some(ValueRange::new(0.0, 1000.0)), 200.0)
            .unwrap();
        assert_eq!(out.range, Some(ValueRange::new(-1.0, 7.3)));
        assert_eq!(out.labels.len(), 5);
        assert_eq!(out.ticks.len(), 5);
        assert!(close(out.ticks.values[0], 7.3));
        assert!(close(out.ticks.values[4], -1.0));
        assert!(close(out.ticks.spacing, 8.3 / 4.0));
    }

    #[test]
    fn fixed_range_without_data_still_lays_out() {
        let out = AxisConfig::value()
            .with_fixed_range(0.0, 10.0)
            .with_max_ticks(3)
            .compute(&GridMeasurer, None, 100.0)
            .unwrap();
        assert_eq!(out.labels, vec!["10", "5", "0"]);
    }

    #[test]
    fn fixed_range_needs_two_ticks() {
        let axis = AxisConfig::value()
            .with_fixed_range(0.0, 10.0)
            .with_max_ticks(1);
        assert_eq!(
            axis.compute(&GridMeasurer, None, 100.0),
            Err(LayoutError::FixedRangeTickCount { max_ticks: 1 })
        );
    }

    #[test]
    fn fixed_range_rejects_nan() {
        let axis = AxisConfig::value().with_fixed_range(f64::NAN, 10.0);
        assert!(matches!(
            axis.compute(&GridMeasurer, None, 100.0),
            Err(LayoutError::NonFiniteRange { .. })
        ));
    }

    #[test]
    fn mixed_sign_entries_produce_descending_labels() {
        let entries = [Entry::new(100.0), Entry::new(300.0), Entry::new(-50.0)];
        let data = ValueRange::from_entries(&entries);
        assert_eq!(data, Some(ValueRange::new(-50.0, 300.0)));

        let out = AxisConfig::value()
            .with_max_ticks(3)
            .compute(&GridMeasurer, data, 300.0)
            .unwrap();
        assert_eq!(out.labels, vec!["400", "200", "0"]);
        assert_eq!(out.range, Some(ValueRange::new(-200.0, 400.0)));
        assert!(close(out.ticks.spacing, 200.0));
    }

    #[test]
    fn consumed_plus_label_width_is_available() {
        let out = AxisConfig::value()
            .with_max_ticks(3)
            .compute(&GridMeasurer, Some(ValueRange::new(-50.0, 300.0)), 300.0)
            .unwrap();
        // "400" plus the sentinel is four chars.
        assert_eq!(out.label_extent, 40.0);
        assert_eq!(out.consumed_extent + out.label_extent, 300.0);
    }

    #[test]
    fn only_leading_labels_shift_the_origin() {
        let data = Some(ValueRange::new(0.0, 50.0));
        let leading = AxisConfig::value()
            .with_position(AxisPosition::Leading)
            .compute(&GridMeasurer, data, 300.0)
            .unwrap();
        let trailing = AxisConfig::value()
            .with_position(AxisPosition::Trailing)
            .compute(&GridMeasurer, data, 300.0)
            .unwrap();
        assert!(leading.leading_shift > 0.0);
        assert_eq!(leading.leading_shift, leading.label_extent);
        assert_eq!(trailing.leading_shift, 0.0);
        assert_eq!(leading.consumed_extent, trailing.consumed_extent);
    }

    #[test]
    fn category_axis_consumes_label_height() {
        let out = AxisConfig::category()
            .compute(&GridMeasurer, Some(ValueRange::new(0.0, 4.0)), 200.0)
            .unwrap();
        assert_eq!(out.label_extent, 12.0);
        assert_eq!(out.consumed_extent, 188.0);
    }

    #[test]
    fn lines_only_axis_has_ticks_but_takes_no_space() {
        let out = AxisConfig::value()
            .with_text(false)
            .compute(&GridMeasurer, Some(ValueRange::new(0.0, 50.0)), 300.0)
            .unwrap();
        assert!(!out.ticks.is_empty());
        assert_eq!(out.consumed_extent, 300.0);
        assert_eq!(out.leading_shift, 0.0);
    }

    #[test]
    fn auto_ticks_stay_within_the_scaled_range() {
        for data in [ValueRange::new(-50.0, 300.0), ValueRange::new(0.0, 110.0)] {
            let out = AxisConfig::value()
                .compute(&GridMeasurer, Some(data), 300.0)
                .unwrap();
            let range = out.range.unwrap();
            for tick in out.ticks.iter() {
                assert!(range.contains(tick), "{tick} outside {range:?}");
            }
            assert!(close(out.ticks.values[out.ticks.len() - 1], range.min));
        }
        let out = AxisConfig::value()
            .compute(&GridMeasurer, Some(ValueRange::new(-50.0, 300.0)), 300.0)
            .unwrap();
        assert_eq!(out.labels, vec!["300", "200", "100", "0", "-100"]);
    }

    #[test]
    fn tiny_scale_labels_stay_distinct() {
        let out = AxisConfig::value()
            .compute(&GridMeasurer, Some(ValueRange::new(1.0e-7, 5.0e-7)), 300.0)
            .unwrap();
        assert!(close(out.ticks.spacing, 1.0e-7));
        assert_eq!(out.labels.last().map(String::as_str), Some("0.0000001"));
        let mut distinct = out.labels.clone();
        distinct.sort();
        distinct.dedup();
        assert_eq!(distinct.len(), out.labels.len(), "{:?}", out.labels);
    }

    #[test]
    fn overflowing_span_lays_out_finitely() {
        let out = AxisConfig::value()
            .with_label_formatter(|_| "x".to_string())
            .compute(&GridMeasurer, Some(ValueRange::new(-1.0e308, 1.0e308)), 300.0)
            .unwrap();
        let range = out.range.unwrap();
        assert!(range.is_finite());
        assert!(out.ticks.spacing.is_finite() && out.ticks.spacing > 0.0);
        assert!(out.ticks.len() >= 2);
        assert!(out.ticks.iter().all(f64::is_finite));

        let fixed = AxisConfig::value()
            .with_fixed_range(-f64::MAX, f64::MAX)
            .with_max_ticks(3)
            .compute(&GridMeasurer, None, 300.0)
            .unwrap();
        assert_eq!(fixed.ticks.values[1], 0.0);
        assert_eq!(fixed.ticks.values[2], -f64::MAX);
    }

    #[test]
    fn config_can_cross_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AxisConfig>();
        assert_send_sync::<crate::ChartSpec>();
    }

    #[test]
    fn empty_labels_are_not_measured() {
        let out = AxisConfig::value()
            .with_label_formatter(|_| String::new())
            .compute(&GridMeasurer, Some(ValueRange::new(0.0, 50.0)), 300.0)
            .unwrap();
        assert_eq!(out.label_extent, 0.0);
        assert_eq!(out.consumed_extent, 300.0);
    }
}
