// Copyright 2025 the Microplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart data: entries, series, and the value range threaded through layout.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use peniko::Color;
use peniko::color::palette::css;
use tracing::warn;

/// A single labeled, colored data point.
///
/// A missing value is meaningful: the entry occupies a slot but yields no point.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    /// The numeric value, if any.
    pub value: Option<f64>,
    /// Display label (typically drawn in the footer).
    pub label: Option<String>,
    /// Preformatted value label (typically drawn in the header or over the element).
    pub value_label: Option<String>,
    /// Fill/stroke color.
    pub color: Color,
    /// Color for the entry's label text.
    pub text_color: Color,
}

impl Entry {
    /// Creates an entry with a value and black colors.
    pub fn new(value: f64) -> Self {
        Self {
            value: Some(value),
            ..Self::empty()
        }
    }

    /// Creates an entry without a value.
    pub fn empty() -> Self {
        Self {
            value: None,
            label: None,
            value_label: None,
            color: css::BLACK,
            text_color: css::BLACK,
        }
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the value label.
    pub fn with_value_label(mut self, value_label: impl Into<String>) -> Self {
        self.value_label = Some(value_label.into());
        self
    }

    /// Sets the entry color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Sets the label text color.
    pub fn with_text_color(mut self, text_color: Color) -> Self {
        self.text_color = text_color;
        self
    }

    /// Returns the value if it is present and finite.
    pub fn finite_value(&self) -> Option<f64> {
        self.value.filter(|v| v.is_finite())
    }
}

/// An ordered, named collection of entries sharing one render style.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    /// Series name (for legends).
    pub name: String,
    /// Series color.
    pub color: Color,
    /// The entries, in slot order.
    pub entries: Vec<Entry>,
}

impl Series {
    /// Creates a series from entries.
    pub fn new(name: impl Into<String>, entries: Vec<Entry>) -> Self {
        Self {
            name: name.into(),
            color: css::BLACK,
            entries,
        }
    }

    /// Creates a series from plain values, one entry per value.
    pub fn from_values(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self::new(name, values.into_iter().map(Entry::new).collect())
    }

    /// Sets the series color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// A `(min, max)` pair in data units.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueRange {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl ValueRange {
    /// Creates a range, swapping the bounds if they are reversed.
    pub fn new(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Computes the range covered by the finite values of `entries`.
    ///
    /// Returns `None` if no entry has a finite value.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> Option<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut skipped = 0_usize;
        for entry in entries {
            let Some(v) = entry.value else {
                continue;
            };
            if !v.is_finite() {
                skipped += 1;
                continue;
            }
            min = min.min(v);
            max = max.max(v);
        }
        if skipped > 0 {
            warn!(skipped, "ignoring non-finite entry values");
        }
        (min <= max).then_some(Self { min, max })
    }

    /// Computes the shared range of several series.
    pub fn from_series(series: &[Series]) -> Option<Self> {
        Self::from_entries(series.iter().flat_map(|s| s.entries.iter()))
    }

    /// Returns `max - min`.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Where `v` sits between `max` (`0`) and `min` (`1`).
    ///
    /// Computed on halved bounds, so it stays finite for any finite range, even
    /// one whose width overflows `f64`. Zero-width ranges yield a non-finite result.
    pub fn fraction_from_max(&self, v: f64) -> f64 {
        (self.max / 2.0 - v / 2.0) / (self.max / 2.0 - self.min / 2.0)
    }

    /// Returns `true` if `v` lies within the range (inclusive).
    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    /// Returns `true` if both bounds are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Widens a zero-width range so tick generation has something to divide.
    ///
    /// A non-negative point grows upward by 100 (or, when it is too large for
    /// that to change it, is anchored at zero below). A negative point keeps its
    /// value as the minimum and is anchored at zero above. Non-degenerate ranges
    /// are returned unchanged.
    pub fn normalize_degenerate(self) -> Self {
        if self.min != self.max {
            return self;
        }
        if self.min >= 0.0 {
            let grown = self.max + 100.0;
            if grown > self.max {
                Self {
                    min: self.min,
                    max: grown,
                }
            } else {
                // Too large for `+ 100` to register; anchor at zero instead.
                Self {
                    min: 0.0,
                    max: self.max,
                }
            }
        } else {
            Self {
                min: self.min,
                max: 0.0,
            }
        }
    }
}
