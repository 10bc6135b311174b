// Copyright 2025 the Microplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for axis, header, and footer layout.
//!
//! Chart layout has a circular dependency: the plot rectangle depends on how
//! much room tick labels take, and the labels depend on the scale computed for
//! that rectangle. `microplot` breaks the cycle by measuring labels through a
//! tiny interface, and keeps shaping and glyph layout downstream.
//!
//! This crate is intentionally:
//! - small and dependency-light,
//! - `no_std`-friendly (it uses `alloc` for owned font family names), and
//! - renderer-agnostic (shaping engines, canvas measurement, and deterministic
//!   test stubs all implement the same trait).

#![no_std]

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;

use kurbo::Rect;

/// A minimal text measurement interface used by the layout engine.
///
/// Implementations can be:
/// - heuristic (fast, but inaccurate),
/// - backed by a shaping engine (e.g. Parley), or
/// - a stub returning synthetic widths, for tests.
pub trait TextMeasurer {
    /// Measure a single line of text.
    ///
    /// `text` is treated as a single line; callers should split on `\n` if they
    /// want multi-line layout. Implementations should return
    /// [`TextMetrics::EMPTY`] for an empty string.
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;

    /// Measure several lines sharing one style.
    ///
    /// The output has one entry per input, in order. Empty strings map to
    /// [`TextMetrics::EMPTY`] without reaching [`TextMeasurer::measure`].
    ///
    /// Shaping backends can override this to amortize setup across a whole tick
    /// label set.
    fn measure_batch(&self, texts: &[&str], style: &TextStyle) -> Vec<TextMetrics> {
        texts
            .iter()
            .map(|text| {
                if text.is_empty() {
                    TextMetrics::EMPTY
                } else {
                    self.measure(text, style)
                }
            })
            .collect()
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        (**self).measure(text, style)
    }

    fn measure_batch(&self, texts: &[&str], style: &TextStyle) -> Vec<TextMetrics> {
        (**self).measure_batch(texts, style)
    }
}

/// Text styling inputs relevant to measurement.
///
/// This is intentionally minimal: it’s just enough to make chart layout
/// consistent.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in the chart’s coordinate system (typically pixels).
    pub font_size: f64,
    /// The preferred font family.
    pub font_family: FontFamily,
    /// Font weight (e.g. `400` for normal, `700` for bold).
    pub font_weight: FontWeight,
    /// Font style (normal/italic/oblique).
    pub font_style: FontStyle,
}

impl TextStyle {
    /// Creates a default `TextStyle` with the given `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            font_family: FontFamily::SansSerif,
            font_weight: FontWeight::NORMAL,
            font_style: FontStyle::Normal,
        }
    }

    /// Sets the font family.
    #[must_use]
    pub fn with_family(mut self, font_family: FontFamily) -> Self {
        self.font_family = font_family;
        self
    }

    /// Sets the font weight.
    #[must_use]
    pub fn with_weight(mut self, font_weight: FontWeight) -> Self {
        self.font_weight = font_weight;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(12.0)
    }
}

/// Font family selection for measurement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// A generic serif family (CSS `serif`).
    Serif,
    /// A generic sans-serif family (CSS `sans-serif`).
    SansSerif,
    /// A generic monospace family (CSS `monospace`).
    Monospace,
    /// A named family (e.g. `"Inter"`, `"Helvetica Neue"`).
    Named(Arc<str>),
}

impl FontFamily {
    /// Returns the font family string for CSS-style font declarations.
    #[must_use]
    pub fn as_css_family(&self) -> &str {
        match self {
            Self::Serif => "serif",
            Self::SansSerif => "sans-serif",
            Self::Monospace => "monospace",
            Self::Named(name) => name,
        }
    }
}

/// CSS-style font weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Normal weight (`400`).
    pub const NORMAL: Self = Self(400);
    /// Bold weight (`700`).
    pub const BOLD: Self = Self(700);
}

/// CSS-style font styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Normal style.
    Normal,
    /// Italic style.
    Italic,
    /// Oblique style.
    Oblique,
}

/// Measured metrics for a single line of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// The advance width (useful for horizontal layout).
    pub advance_width: f64,
    /// Distance from baseline to the top of typical glyphs.
    pub ascent: f64,
    /// Distance from baseline to the bottom of typical glyphs.
    pub descent: f64,
    /// Additional line spacing beyond ascent+descent.
    pub leading: f64,
}

impl TextMetrics {
    /// Metrics of an empty string: a zero-sized rectangle.
    pub const EMPTY: Self = Self {
        advance_width: 0.0,
        ascent: 0.0,
        descent: 0.0,
        leading: 0.0,
    };

    /// Returns `ascent + descent + leading`.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        self.ascent + self.descent + self.leading
    }

    /// Width of the bounding rectangle.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.advance_width
    }

    /// Height of the bounding rectangle.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.line_height()
    }

    /// Returns `true` if both dimensions are zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width() == 0.0 && self.height() == 0.0
    }

    /// Bounding rectangle relative to the pen position on the baseline.
    ///
    /// `y0` is `-ascent`, so the rectangle sits above the baseline the way
    /// glyphs do in a y-down coordinate system.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(
            0.0,
            -self.ascent,
            self.advance_width,
            self.descent + self.leading,
        )
    }
}

/// A tiny heuristic text measurer suitable for demos and early layout.
///
/// It assumes an average glyph width of ~0.6em and a baseline at ~0.8em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        if text.is_empty() {
            return TextMetrics::EMPTY;
        }
        let advance_width = 0.6 * style.font_size * text.chars().count() as f64;
        let ascent = 0.8 * style.font_size;
        let descent = 0.2 * style.font_size;
        TextMetrics {
            advance_width,
            ascent,
            descent,
            leading: 0.0,
        }
    }
}
