// Copyright 2025 the Microplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis scaling and layout for small statistical charts.
//!
//! The crate computes geometry only; drawing is left to the caller:
//! - **Scaling** picks human-friendly axis bounds and tick spacing ([`NiceScale`]).
//! - **Axis layout** measures tick labels and reports the space they take
//!   ([`AxisConfig::compute`]).
//! - **Slot layout** reserves header and footer strips and divides the plot
//!   into one slot per entry ([`SlotLayout`]).
//! - **Projection** maps values to pixels, animating from the zero line
//!   ([`PointProjector`]).
//!
//! [`ChartSpec::layout`] runs all of the above for one frame.
//!
//! Text is measured through [`TextMeasurer`], so the same layout runs against a
//! shaping engine in an application and a deterministic stub in tests.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod axis;
mod chart;
mod data;
mod error;
mod float;
mod format;
mod layout;
mod project;
mod scale;

pub use axis::{
    AxisConfig, AxisKind, AxisLayout, AxisPosition, LabelFormatter, MEASURE_SENTINEL, TickSet,
};
pub use chart::{ChartFrame, ChartSpec, SeriesPoints};
pub use data::{Entry, Series, ValueRange};
pub use error::{LayoutError, LayoutResult};
pub use format::format_tick;
pub use layout::{LabelOrientation, SlotLayout, ValueLabelOption, label_extent, origin_baseline};
pub use project::PointProjector;
pub use scale::{NiceScale, nice_num};

pub use microplot_text::{
    FontFamily, FontStyle, FontWeight, HeuristicTextMeasurer, TextMeasurer, TextMetrics, TextStyle,
};
