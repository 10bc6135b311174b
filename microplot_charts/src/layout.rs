// Copyright 2025 the Microplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Header, footer, and slot geometry for axis-based charts.
//!
//! This follows a measure/arrange split:
//! - **Measure**: the header (value labels above the plot) and footer (entry
//!   labels below it) take whatever their tallest label needs.
//! - **Arrange**: the rest of the plot is divided into one slot per entry,
//!   separated by a uniform margin, and the zero line is located within it.

use kurbo::{Rect, Size};
use microplot_text::{TextMeasurer, TextStyle};

use crate::data::ValueRange;

/// How entry and value labels are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LabelOrientation {
    /// Left to right; the label's height is what it takes vertically.
    #[default]
    Horizontal,
    /// Rotated a quarter turn; the label's width is what it takes vertically.
    Vertical,
}

/// Where value labels are placed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueLabelOption {
    /// No value labels.
    None,
    /// In a strip above the plot. This is the only option that reserves header space.
    #[default]
    TopOfChart,
    /// Just above each element.
    TopOfElement,
    /// On top of each element.
    OverElement,
}

/// Largest vertical extent of `texts` when drawn with `orientation`.
///
/// Empty strings measure as nothing.
pub fn label_extent(
    measurer: &dyn TextMeasurer,
    texts: &[&str],
    style: &TextStyle,
    orientation: LabelOrientation,
) -> f64 {
    measurer
        .measure_batch(texts, style)
        .iter()
        .map(|m| match orientation {
            LabelOrientation::Horizontal => m.height(),
            LabelOrientation::Vertical => m.width(),
        })
        .fold(0.0, f64::max)
}

/// Resolved per-entry geometry inside a plot rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotLayout {
    /// Absolute row where the value area starts (plot top plus header).
    pub header_top: f64,
    /// Height reserved above the value area.
    pub header_height: f64,
    /// Height reserved below the value area.
    pub footer_height: f64,
    /// Size of one entry's slot: its width along x, the value area's height along y.
    pub slot: Size,
    /// Absolute row of the value `0`, clamped into the value area.
    pub origin_baseline: f64,
}

impl SlotLayout {
    /// Height of the header strip: the margin, plus the tallest value label and
    /// another margin when value labels sit on top of the chart.
    pub fn measure_header(
        measurer: &dyn TextMeasurer,
        value_labels: &[&str],
        style: &TextStyle,
        orientation: LabelOrientation,
        option: ValueLabelOption,
        margin: f64,
    ) -> f64 {
        let margin = margin.max(0.0);
        if option != ValueLabelOption::TopOfChart {
            return margin;
        }
        let extent = label_extent(measurer, value_labels, style, orientation);
        if extent > 0.0 {
            margin + extent + margin
        } else {
            margin
        }
    }

    /// Height of the footer strip: the margin, plus the tallest entry label and
    /// another margin if any label is non-empty.
    pub fn measure_footer(
        measurer: &dyn TextMeasurer,
        labels: &[&str],
        style: &TextStyle,
        orientation: LabelOrientation,
        margin: f64,
    ) -> f64 {
        let margin = margin.max(0.0);
        let extent = label_extent(measurer, labels, style, orientation);
        if extent > 0.0 {
            margin + extent + margin
        } else {
            margin
        }
    }

    /// Divides `plot` into `count` slots and places the zero line.
    ///
    /// `range` must be the scaled range returned by axis layout.
    pub fn arrange(
        plot: Rect,
        count: usize,
        margin: f64,
        header_height: f64,
        footer_height: f64,
        range: ValueRange,
    ) -> Self {
        let margin = margin.max(0.0);
        let slot = if count == 0 {
            Size::ZERO
        } else {
            let n = count as f64;
            Size::new(
                ((plot.width() - (n + 1.0) * margin) / n).max(0.0),
                (plot.height() - margin - footer_height - header_height).max(0.0),
            )
        };
        let header_top = plot.y0 + header_height;
        Self {
            header_top,
            header_height,
            footer_height,
            slot,
            origin_baseline: origin_baseline(range, slot.height, header_top),
        }
    }
}

/// Row of the value `0` in a value area starting at `header_top`.
///
/// All-negative data anchors at the top, all-positive data at the bottom.
pub fn origin_baseline(range: ValueRange, value_area_height: f64, header_top: f64) -> f64 {
    if range.max <= 0.0 {
        header_top
    } else if range.min > 0.0 {
        header_top + value_area_height
    } else {
        header_top + range.fraction_from_max(0.0) * value_area_height
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use microplot_text::HeuristicTextMeasurer;

    use super::*;

    #[test]
    fn footer_grows_with_labels() {
        let measurer = HeuristicTextMeasurer;
        let style = TextStyle::new(10.0);
        let bare = SlotLayout::measure_footer(
            &measurer,
            &["", ""],
            &style,
            LabelOrientation::Horizontal,
            4.0,
        );
        assert_eq!(bare, 4.0);

        let labeled = SlotLayout::measure_footer(
            &measurer,
            &["Jan", "February"],
            &style,
            LabelOrientation::Horizontal,
            4.0,
        );
        assert!((labeled - 18.0).abs() < 1e-9);

        let vertical = SlotLayout::measure_footer(
            &measurer,
            &["Jan", "February"],
            &style,
            LabelOrientation::Vertical,
            4.0,
        );
        // Eight chars at 6 units each.
        assert!((vertical - 56.0).abs() < 1e-9);
    }

    #[test]
    fn header_only_reserved_for_top_of_chart() {
        let measurer = HeuristicTextMeasurer;
        let style = TextStyle::new(10.0);
        let labels = ["12", "7"];
        let top = SlotLayout::measure_header(
            &measurer,
            &labels,
            &style,
            LabelOrientation::Horizontal,
            ValueLabelOption::TopOfChart,
            5.0,
        );
        let over = SlotLayout::measure_header(
            &measurer,
            &labels,
            &style,
            LabelOrientation::Horizontal,
            ValueLabelOption::OverElement,
            5.0,
        );
        assert!((top - 20.0).abs() < 1e-9);
        assert_eq!(over, 5.0);
    }

    #[test]
    fn slots_are_evenly_spaced() {
        let plot = Rect::new(0.0, 0.0, 100.0, 200.0);
        let layout = SlotLayout::arrange(plot, 4, 4.0, 10.0, 20.0, ValueRange::new(0.0, 10.0));
        // (100 - 5 * 4) / 4
        assert!((layout.slot.width - 20.0).abs() < 1e-9);
        assert!((layout.slot.height - 166.0).abs() < 1e-9);
        assert!((layout.header_top - 10.0).abs() < 1e-9);
    }

    #[test]
    fn no_entries_means_empty_slots() {
        let plot = Rect::new(0.0, 0.0, 100.0, 200.0);
        let layout = SlotLayout::arrange(plot, 0, 4.0, 10.0, 20.0, ValueRange::new(0.0, 10.0));
        assert_eq!(layout.slot, Size::ZERO);
    }

    #[test]
    fn origin_tracks_the_zero_line() {
        let top = 10.0;
        let h = 100.0;
        assert_eq!(origin_baseline(ValueRange::new(-5.0, -1.0), h, top), top);
        assert_eq!(origin_baseline(ValueRange::new(1.0, 5.0), h, top), top + h);
        let mid = origin_baseline(ValueRange::new(-100.0, 300.0), h, top);
        assert!((mid - (top + 75.0)).abs() < 1e-9);
        assert_eq!(origin_baseline(ValueRange::new(0.0, 5.0), h, top), top + h);
    }
}
