// Copyright 2025 the Microplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parley-backed text measurement adapter.
//!
//! This crate implements [`microplot_text::TextMeasurer`] using Parley, enabling
//! shaping-aware metrics for tick labels, value labels, and entry labels.

#![no_std]

extern crate alloc;

use alloc::borrow::Cow;
use alloc::vec::Vec;
use core::cell::RefCell;

use microplot_text::{FontFamily, FontStyle, TextMeasurer, TextMetrics, TextStyle};
use parley::style::{FontFamily as ParleyFontFamily, FontStack, GenericFamily, StyleProperty};
use parley::{
    Alignment, AlignmentOptions, FontContext, FontStyle as ParleyFontStyle, FontWeight,
    LayoutContext,
};

/// A [`TextMeasurer`] backed by Parley.
///
/// Measures single lines only; anything after the first `\n` is ignored.
pub struct ParleyTextMeasurer {
    font_cx: RefCell<FontContext>,
    layout_cx: RefCell<LayoutContext<()>>,
    display_scale: f32,
    quantize: bool,
}

impl core::fmt::Debug for ParleyTextMeasurer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ParleyTextMeasurer")
            .field("display_scale", &self.display_scale)
            .field("quantize", &self.quantize)
            .finish_non_exhaustive()
    }
}

impl ParleyTextMeasurer {
    /// Creates a new Parley-backed text measurer using the system font configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            font_cx: RefCell::new(FontContext::new()),
            layout_cx: RefCell::new(LayoutContext::new()),
            display_scale: 1.0,
            quantize: true,
        }
    }

    /// Sets the display scale passed to Parley.
    ///
    /// This is typically a device pixel ratio. Measurements returned by this
    /// measurer are scaled back into logical coordinates (divide by scale).
    #[must_use]
    pub fn with_display_scale(mut self, display_scale: f32) -> Self {
        self.display_scale = display_scale.max(0.0);
        self
    }

    /// Sets whether Parley should quantize layout coordinates to pixel boundaries.
    #[must_use]
    pub fn with_quantize(mut self, quantize: bool) -> Self {
        self.quantize = quantize;
        self
    }

    fn measure_line(
        &self,
        font_cx: &mut FontContext,
        layout_cx: &mut LayoutContext<()>,
        text: &str,
        style: &TextStyle,
    ) -> TextMetrics {
        let text = text.split('\n').next().unwrap_or("");
        if text.is_empty() {
            return TextMetrics::EMPTY;
        }

        let scale = self.display_scale.max(1.0e-6);
        let mut builder = layout_cx.ranged_builder(font_cx, text, scale, self.quantize);
        for property in style_properties(style) {
            builder.push_default(property);
        }
        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout.align(None, Alignment::Start, AlignmentOptions::default());

        layout.lines().next().map_or(TextMetrics::EMPTY, |line| {
            let m = line.metrics();
            let unscale = |v: f32| f64::from(v) / f64::from(scale);
            TextMetrics {
                advance_width: unscale(m.advance),
                ascent: unscale(m.ascent),
                descent: unscale(m.descent),
                leading: unscale(m.leading),
            }
        })
    }
}

/// Parley style properties for one label style.
fn style_properties(style: &TextStyle) -> [StyleProperty<'_, ()>; 4] {
    let family = match &style.font_family {
        FontFamily::Serif => ParleyFontFamily::Generic(GenericFamily::Serif),
        FontFamily::SansSerif => ParleyFontFamily::Generic(GenericFamily::SansSerif),
        FontFamily::Monospace => ParleyFontFamily::Generic(GenericFamily::Monospace),
        FontFamily::Named(name) => ParleyFontFamily::Named(Cow::Borrowed(name.as_ref())),
    };
    let font_style = match style.font_style {
        FontStyle::Normal => ParleyFontStyle::Normal,
        FontStyle::Italic => ParleyFontStyle::Italic,
        FontStyle::Oblique => ParleyFontStyle::Oblique(None),
    };
    [
        StyleProperty::FontSize(font_size_f32(style.font_size)),
        StyleProperty::FontStack(FontStack::from(family)),
        StyleProperty::FontStyle(font_style),
        StyleProperty::FontWeight(FontWeight::new(f32::from(style.font_weight.0))),
    ]
}

/// Non-finite and negative sizes measure as zero; huge ones saturate.
fn font_size_f32(font_size: f64) -> f32 {
    if !font_size.is_finite() || font_size <= 0.0 {
        return 0.0;
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "saturating float conversion is the intent"
    )]
    {
        font_size.min(f64::from(f32::MAX)) as f32
    }
}

impl Default for ParleyTextMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasurer for ParleyTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let mut font_cx = self.font_cx.borrow_mut();
        let mut layout_cx = self.layout_cx.borrow_mut();
        self.measure_line(&mut font_cx, &mut layout_cx, text, style)
    }

    fn measure_batch(&self, texts: &[&str], style: &TextStyle) -> Vec<TextMetrics> {
        // One borrow for the whole label set.
        let mut font_cx = self.font_cx.borrow_mut();
        let mut layout_cx = self.layout_cx.borrow_mut();
        texts
            .iter()
            .map(|text| self.measure_line(&mut font_cx, &mut layout_cx, text, style))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn parley_measurer_is_nonzero_for_nonempty_text() {
        let m = ParleyTextMeasurer::new();
        let metrics = m.measure("Hello", &TextStyle::new(12.0));
        assert!(metrics.advance_width > 0.0);
        assert!(metrics.ascent > 0.0);
        assert!(metrics.descent > 0.0);
    }

    #[test]
    fn parley_batch_maps_empty_text_to_empty_metrics() {
        let m = ParleyTextMeasurer::new();
        let out = m.measure_batch(&["100", ""], &TextStyle::new(12.0));
        assert_eq!(out.len(), 2);
        assert!(out[0].advance_width > 0.0);
        assert_eq!(out[1], TextMetrics::EMPTY);
    }

    #[test]
    fn display_scale_reports_logical_units() {
        let style = TextStyle::new(14.0);
        let base = ParleyTextMeasurer::new()
            .with_quantize(false)
            .measure("Revenue", &style);
        let hidpi = ParleyTextMeasurer::new()
            .with_display_scale(2.0)
            .with_quantize(false)
            .measure("Revenue", &style);
        assert!(base.advance_width > 0.0);
        let ratio = hidpi.advance_width / base.advance_width;
        assert!((ratio - 1.0).abs() < 0.1, "ratio {ratio}");
    }

    #[test]
    fn bold_is_not_narrower() {
        let m = ParleyTextMeasurer::new().with_quantize(false);
        let regular = m.measure("Wide", &TextStyle::new(16.0));
        let bold = m.measure(
            "Wide",
            &TextStyle::new(16.0).with_weight(microplot_text::FontWeight::BOLD),
        );
        assert!(bold.advance_width >= regular.advance_width);
    }
}
