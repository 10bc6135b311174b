// Copyright 2025 the Microplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG writer for `microplot_demo`.

use kurbo::{Point, Rect};
use microplot_charts::{FontWeight, TextStyle};
use peniko::Color;

#[derive(Clone, Copy, Debug)]
pub(crate) enum Anchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Default)]
pub(crate) struct SvgDocument {
    body: String,
    bounds: Option<Rect>,
}

impl SvgDocument {
    fn include(&mut self, r: Rect) {
        self.bounds = Some(self.bounds.map_or(r, |b| b.union(r)));
    }

    pub(crate) fn open_group(&mut self, dx: f64, dy: f64) {
        self.body
            .push_str(&format!(r#"<g transform="translate({dx} {dy})">"#));
        self.body.push('\n');
    }

    pub(crate) fn close_group(&mut self) {
        self.body.push_str("</g>\n");
    }

    /// Extends the view box; group offsets are the caller's business.
    pub(crate) fn reserve(&mut self, r: Rect) {
        self.include(r);
    }

    pub(crate) fn rect(&mut self, r: Rect, fill: Color) {
        self.body.push_str(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}""#,
            r.x0,
            r.y0,
            r.width(),
            r.height()
        ));
        write_paint_attr(&mut self.body, "fill", fill);
        self.body.push_str("/>\n");
    }

    pub(crate) fn line(&mut self, a: Point, b: Point, stroke: Color, width: f64) {
        self.body.push_str(&format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke-width="{width}""#,
            a.x, a.y, b.x, b.y
        ));
        write_paint_attr(&mut self.body, "stroke", stroke);
        self.body.push_str("/>\n");
    }

    pub(crate) fn polyline(&mut self, points: &[Point], stroke: Color, width: f64) {
        if points.len() < 2 {
            return;
        }
        let coords: Vec<String> = points.iter().map(|p| format!("{},{}", p.x, p.y)).collect();
        self.body.push_str(&format!(
            r#"<polyline points="{}" fill="none" stroke-width="{width}""#,
            coords.join(" ")
        ));
        write_paint_attr(&mut self.body, "stroke", stroke);
        self.body.push_str("/>\n");
    }

    pub(crate) fn circle(&mut self, center: Point, radius: f64, fill: Color) {
        self.body.push_str(&format!(
            r#"<circle cx="{}" cy="{}" r="{radius}""#,
            center.x, center.y
        ));
        write_paint_attr(&mut self.body, "fill", fill);
        self.body.push_str("/>\n");
    }

    pub(crate) fn text(
        &mut self,
        pos: Point,
        text: &str,
        style: &TextStyle,
        anchor: Anchor,
        fill: Color,
    ) {
        if text.is_empty() {
            return;
        }
        let anchor = match anchor {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        };
        self.body.push_str(&format!(
            r#"<text x="{}" y="{}" font-size="{}" font-family="{}" dominant-baseline="middle" text-anchor="{anchor}""#,
            pos.x,
            pos.y,
            style.font_size,
            escape_xml(style.font_family.as_css_family()),
        ));
        if style.font_weight != FontWeight::NORMAL {
            self.body
                .push_str(&format!(r#" font-weight="{}""#, style.font_weight.0));
        }
        write_paint_attr(&mut self.body, "fill", fill);
        self.body.push('>');
        self.body.push_str(&escape_xml(text));
        self.body.push_str("</text>\n");
    }

    pub(crate) fn to_svg_string(&self) -> String {
        let view_box = self
            .bounds
            .unwrap_or_else(|| Rect::new(0.0, 0.0, 100.0, 100.0))
            .inflate(10.0, 10.0);
        let mut out = String::new();
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        out.push_str(&format!(
            r#"viewBox="{} {} {} {}" width="{}" height="{}" preserveAspectRatio="xMinYMin meet">"#,
            view_box.x0,
            view_box.y0,
            view_box.width(),
            view_box.height(),
            view_box.width(),
            view_box.height()
        ));
        out.push('\n');
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

fn svg_paint(color: Color) -> (String, Option<f64>) {
    let rgba = color.to_rgba8();
    let value = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
    let opacity = if rgba.a == 255 {
        None
    } else {
        Some(f64::from(rgba.a) / 255.0)
    };
    (value, opacity)
}

fn write_paint_attr(out: &mut String, name: &str, color: Color) {
    let (value, opacity) = svg_paint(color);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use microplot_charts::FontFamily;
    use peniko::color::palette::css;

    #[test]
    fn escapes_text() {
        assert_eq!(escape_xml("a<b & 'c'"), "a&lt;b &amp; &apos;c&apos;");
    }

    #[test]
    fn view_box_covers_reserved_area() {
        let mut doc = SvgDocument::default();
        doc.reserve(Rect::new(0.0, 0.0, 200.0, 100.0));
        doc.rect(Rect::new(10.0, 10.0, 20.0, 20.0), css::RED);
        let svg = doc.to_svg_string();
        assert!(svg.contains(r#"viewBox="-10 -10 220 120""#), "{svg}");
        assert!(svg.contains(r##"fill="#ff0000""##), "{svg}");
    }

    #[test]
    fn text_carries_the_font_style() {
        let mut doc = SvgDocument::default();
        let style = TextStyle::new(11.0)
            .with_family(FontFamily::Monospace)
            .with_weight(FontWeight::BOLD);
        doc.text(Point::ZERO, "a&b", &style, Anchor::End, css::BLACK);
        doc.text(Point::ZERO, "plain", &TextStyle::default(), Anchor::Start, css::BLACK);
        let svg = doc.to_svg_string();
        assert!(
            svg.contains(r#"font-size="11" font-family="monospace""#),
            "{svg}"
        );
        assert!(svg.contains(r#"font-weight="700""#), "{svg}");
        assert!(svg.contains(">a&amp;b</text>"), "{svg}");
        assert_eq!(svg.matches("font-weight").count(), 1, "{svg}");
    }
}
