// Copyright 2025 the Microplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-frame render pass.
//!
//! [`ChartSpec::layout`] turns data plus a frame size into everything a drawing
//! layer needs: the plot rectangle, axis ticks and labels, slot geometry, and
//! one projected point per entry. It runs in a fixed order because each step
//! feeds the next:
//! - the value axis is scaled and its labels measured, which fixes the plot width;
//! - the category axis does the same along the height;
//! - header and footer strips are measured out of what remains;
//! - the scaled range, not the raw data range, drives projection.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};
use microplot_text::{TextMeasurer, TextStyle};
use peniko::Color;
use tracing::debug;

use crate::axis::{AxisConfig, AxisLayout};
use crate::data::{Series, ValueRange};
use crate::error::LayoutResult;
use crate::layout::{LabelOrientation, SlotLayout, ValueLabelOption};
use crate::project::PointProjector;

/// A chart description: data, label styling, axes, and animation state.
#[derive(Clone, Debug)]
pub struct ChartSpec {
    /// Data series. All series share slots; slot `i` holds entry `i` of each.
    pub series: Vec<Series>,
    /// Gap around and between slots.
    pub margin: f64,
    /// Style of entry labels (footer).
    pub label_style: TextStyle,
    /// Orientation of entry labels.
    pub label_orientation: LabelOrientation,
    /// Style of value labels (header).
    pub value_label_style: TextStyle,
    /// Orientation of value labels.
    pub value_label_orientation: LabelOrientation,
    /// Where value labels go.
    pub value_label_option: ValueLabelOption,
    /// Value axis, beside the plot.
    pub y_axis: Option<AxisConfig>,
    /// Category axis, along the plot.
    pub x_axis: Option<AxisConfig>,
    /// Grow-from-baseline progress in `[0, 1]`.
    pub animation_progress: f64,
}

impl Default for ChartSpec {
    fn default() -> Self {
        Self {
            series: Vec::new(),
            margin: 12.0,
            label_style: TextStyle::default(),
            label_orientation: LabelOrientation::Horizontal,
            value_label_style: TextStyle::default(),
            value_label_orientation: LabelOrientation::Horizontal,
            value_label_option: ValueLabelOption::default(),
            y_axis: Some(AxisConfig::value()),
            x_axis: None,
            animation_progress: 1.0,
        }
    }
}

impl ChartSpec {
    /// Creates a chart over `series` with a value axis and no category axis.
    pub fn new(series: Vec<Series>) -> Self {
        Self {
            series,
            ..Self::default()
        }
    }

    /// Set the slot margin.
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Set the entry label style.
    pub fn with_label_style(mut self, style: TextStyle) -> Self {
        self.label_style = style;
        self
    }

    /// Set the entry label orientation.
    pub fn with_label_orientation(mut self, orientation: LabelOrientation) -> Self {
        self.label_orientation = orientation;
        self
    }

    /// Set the value label style.
    pub fn with_value_label_style(mut self, style: TextStyle) -> Self {
        self.value_label_style = style;
        self
    }

    /// Set the value label orientation.
    pub fn with_value_label_orientation(mut self, orientation: LabelOrientation) -> Self {
        self.value_label_orientation = orientation;
        self
    }

    /// Set where value labels are placed.
    pub fn with_value_label_option(mut self, option: ValueLabelOption) -> Self {
        self.value_label_option = option;
        self
    }

    /// Set or clear the value axis.
    pub fn with_y_axis(mut self, axis: Option<AxisConfig>) -> Self {
        self.y_axis = axis;
        self
    }

    /// Set or clear the category axis.
    pub fn with_x_axis(mut self, axis: Option<AxisConfig>) -> Self {
        self.x_axis = axis;
        self
    }

    /// Set the animation progress.
    pub fn with_animation_progress(mut self, progress: f64) -> Self {
        self.animation_progress = progress;
        self
    }

    /// Number of slots: the length of the longest series.
    pub fn entry_count(&self) -> usize {
        self.series
            .iter()
            .map(|s| s.entries.len())
            .max()
            .unwrap_or(0)
    }

    /// Lays out one frame of size `size`.
    pub fn layout(&self, measurer: &dyn TextMeasurer, size: Size) -> LayoutResult<ChartFrame> {
        let count = self.entry_count();
        let raw = ValueRange::from_series(&self.series);

        let y_axis = self
            .y_axis
            .as_ref()
            .map(|axis| axis.compute(measurer, raw, size.width))
            .transpose()?;
        let index_domain = (count > 0).then(|| ValueRange::new(0.0, (count - 1) as f64));
        let x_axis = self
            .x_axis
            .as_ref()
            .map(|axis| axis.compute(measurer, index_domain, size.height))
            .transpose()?;

        let (x0, width) = y_axis
            .as_ref()
            .map_or((0.0, size.width), |a| (a.leading_shift, a.consumed_extent));
        let (y0, height) = x_axis
            .as_ref()
            .map_or((0.0, size.height), |a| (a.leading_shift, a.consumed_extent));
        let plot = Rect::new(x0, y0, x0 + width.max(0.0), y0 + height.max(0.0));

        // Without a value axis the raw range still has to be safe to divide by.
        let range = match &y_axis {
            Some(axis) => axis.range.map(ValueRange::normalize_degenerate),
            None => raw.map(ValueRange::normalize_degenerate),
        };

        let value_labels: Vec<&str> = self
            .series
            .iter()
            .flat_map(|s| s.entries.iter())
            .filter_map(|e| e.value_label.as_deref())
            .collect();
        let header_height = SlotLayout::measure_header(
            measurer,
            &value_labels,
            &self.value_label_style,
            self.value_label_orientation,
            self.value_label_option,
            self.margin,
        );
        let labels: Vec<&str> = self
            .series
            .iter()
            .flat_map(|s| s.entries.iter())
            .filter_map(|e| e.label.as_deref())
            .collect();
        let footer_height = SlotLayout::measure_footer(
            measurer,
            &labels,
            &self.label_style,
            self.label_orientation,
            self.margin,
        );

        let slots = SlotLayout::arrange(
            plot,
            count,
            self.margin,
            header_height,
            footer_height,
            range.unwrap_or(ValueRange::new(0.0, 0.0)),
        );

        let projector = match range {
            Some(range) => Some(
                PointProjector::new(
                    range,
                    slots.slot,
                    self.margin.max(0.0),
                    slots.origin_baseline,
                    slots.header_top,
                    self.animation_progress,
                )?
                .with_origin_x(plot.x0),
            ),
            None => None,
        };

        let series = self
            .series
            .iter()
            .map(|s| SeriesPoints {
                name: s.name.clone(),
                color: s.color,
                points: match &projector {
                    Some(p) => s
                        .entries
                        .iter()
                        .enumerate()
                        .map(|(i, e)| e.finite_value().map(|v| p.project(i, v)))
                        .collect(),
                    None => Vec::new(),
                },
            })
            .collect();

        debug!(
            x0 = plot.x0,
            y0 = plot.y0,
            x1 = plot.x1,
            y1 = plot.y1,
            min = range.map(|r| r.min),
            max = range.map(|r| r.max),
            entries = count,
            "laid out chart frame"
        );

        Ok(ChartFrame {
            plot,
            slots,
            range,
            y_axis,
            x_axis,
            projector,
            series,
        })
    }
}

/// Projected points of one series.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesPoints {
    /// Series name.
    pub name: String,
    /// Series color.
    pub color: Color,
    /// One point per entry; `None` where the entry has no value.
    pub points: Vec<Option<Point>>,
}

/// Output of one render pass.
#[derive(Clone, Debug)]
pub struct ChartFrame {
    /// The plot rectangle left after axis labels.
    pub plot: Rect,
    /// Header, footer, and slot geometry inside `plot`.
    pub slots: SlotLayout,
    /// The range points were projected against; `None` without data.
    pub range: Option<ValueRange>,
    /// Value axis layout, if configured.
    pub y_axis: Option<AxisLayout>,
    /// Category axis layout, if configured.
    pub x_axis: Option<AxisLayout>,
    /// The frame's projector; `None` without data.
    pub projector: Option<PointProjector>,
    /// Projected series, in input order.
    pub series: Vec<SeriesPoints>,
}
