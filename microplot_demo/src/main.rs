// Copyright 2025 the Microplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders a few frames of a grow-from-baseline animation to `microplot_demo.svg`.
//!
//! Each frame runs one layout pass; everything drawn comes from the resulting
//! [`ChartFrame`]. Set `RUST_LOG=microplot_charts=trace` to watch the passes.

mod svg;

use anyhow::Context as _;
use kurbo::{Point, Rect, Size};
use microplot_charts::{
    AxisConfig, ChartFrame, ChartSpec, Entry, FontWeight, LabelOrientation, Series, TextMeasurer,
    TextStyle, ValueLabelOption, format_tick,
};
use peniko::color::palette::css;
use tracing::info;

use svg::{Anchor, SvgDocument};

const FRAME_SIZE: Size = Size::new(360.0, 260.0);
const FRAME_GAP: f64 = 48.0;
const PROGRESS: [f64; 4] = [0.0, 0.35, 0.7, 1.0];

fn main() -> anyhow::Result<()> {
    init_tracing();

    let measurer = demo_measurer();
    let spec = demo_chart();

    let mut doc = SvgDocument::default();
    for (i, progress) in PROGRESS.into_iter().enumerate() {
        let frame = spec
            .clone()
            .with_animation_progress(progress)
            .layout(&*measurer, FRAME_SIZE)
            .with_context(|| format!("laying out frame at progress {progress}"))?;

        let dx = i as f64 * (FRAME_SIZE.width + FRAME_GAP);
        doc.reserve(Rect::new(dx, -24.0, dx + FRAME_SIZE.width, FRAME_SIZE.height));
        doc.open_group(dx, 0.0);
        doc.text(
            Point::new(0.0, -12.0),
            &format!("progress {progress}"),
            &TextStyle::default(),
            Anchor::Start,
            css::DIM_GRAY,
        );
        draw_frame(&mut doc, &spec, &frame);
        doc.close_group();
    }

    let path = "microplot_demo.svg";
    std::fs::write(path, doc.to_svg_string()).with_context(|| format!("writing {path}"))?;
    info!(path, frames = PROGRESS.len(), "wrote demo");
    println!("wrote {path}");
    Ok(())
}

/// Installs a compact fmt subscriber, filtered by `RUST_LOG` (default `info`).
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}

fn demo_measurer() -> Box<dyn TextMeasurer> {
    #[cfg(feature = "parley")]
    {
        Box::new(microplot_text_parley::ParleyTextMeasurer::new())
    }

    #[cfg(not(feature = "parley"))]
    {
        Box::new(microplot_charts::HeuristicTextMeasurer)
    }
}

fn demo_chart() -> ChartSpec {
    let months = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];
    let revenue = [120.0, 340.0, -60.0, 280.0, 410.0, 190.0];
    let cost = [80.0, 150.0, 90.0, 200.0, 260.0, 140.0];
    let forecast = [Some(100.0), Some(300.0), None, Some(250.0), Some(380.0), None];

    let revenue = Series::new(
        "revenue",
        months
            .iter()
            .zip(revenue)
            .map(|(m, v)| {
                Entry::new(v)
                    .with_label(*m)
                    .with_value_label(format_tick(v, 1.0))
                    .with_color(if v < 0.0 { css::INDIAN_RED } else { css::STEEL_BLUE })
            })
            .collect(),
    )
    .with_color(css::STEEL_BLUE);
    let cost = Series::from_values("cost", cost).with_color(css::DARK_ORANGE);
    let forecast = Series::new(
        "forecast",
        forecast
            .into_iter()
            .map(|v| v.map_or_else(Entry::empty, Entry::new))
            .collect(),
    )
    .with_color(css::SEA_GREEN);

    ChartSpec::new(vec![revenue, cost, forecast])
        .with_margin(8.0)
        .with_label_orientation(LabelOrientation::Horizontal)
        .with_value_label_option(ValueLabelOption::TopOfChart)
        .with_value_label_style(TextStyle::new(11.0).with_weight(FontWeight::BOLD))
        .with_y_axis(Some(
            AxisConfig::value()
                .with_max_ticks(6)
                .with_label_formatter(|v| format!("${}", format_tick(v, 1.0))),
        ))
}

fn draw_frame(doc: &mut SvgDocument, spec: &ChartSpec, frame: &ChartFrame) {
    let Some(projector) = frame.projector.as_ref() else {
        return;
    };
    let plot = frame.plot;
    let slots = &frame.slots;

    if let Some(axis) = &frame.y_axis {
        let style = spec
            .y_axis
            .as_ref()
            .map_or_else(TextStyle::default, |a| a.text_style.clone());
        for (tick, label) in axis.ticks.iter().zip(&axis.labels) {
            let y = projector.value_y(tick);
            doc.line(Point::new(plot.x0, y), Point::new(plot.x1, y), css::GAINSBORO, 1.0);
            doc.text(Point::new(plot.x0 - 4.0, y), label, &style, Anchor::End, css::DIM_GRAY);
        }
    }
    doc.line(
        Point::new(plot.x0, slots.origin_baseline),
        Point::new(plot.x1, slots.origin_baseline),
        css::DARK_GRAY,
        1.0,
    );

    // First series as bars, second as a line, the rest as points.
    for (s, points) in frame.series.iter().enumerate() {
        let entries = &spec.series[s].entries;
        match s {
            0 => {
                let half = slots.slot.width * 0.3;
                for (p, entry) in points.points.iter().zip(entries) {
                    let Some(p) = p else { continue };
                    let bar = Rect::from_points(
                        (p.x - half, p.y),
                        (p.x + half, slots.origin_baseline),
                    );
                    doc.rect(bar, entry.color);
                }
            }
            1 => {
                let line: Vec<Point> = points.points.iter().flatten().copied().collect();
                doc.polyline(&line, points.color, 2.0);
                for p in &line {
                    doc.circle(*p, 2.5, points.color);
                }
            }
            _ => {
                for p in points.points.iter().flatten() {
                    doc.circle(*p, 4.0, points.color);
                }
            }
        }
    }

    let footer_y = slots.header_top + slots.slot.height + slots.footer_height / 2.0;
    let header_y = plot.y0 + slots.header_height / 2.0;
    if let Some(first) = spec.series.first() {
        for (i, entry) in first.entries.iter().enumerate() {
            let x = projector.slot_center_x(i);
            if let Some(label) = &entry.label {
                doc.text(
                    Point::new(x, footer_y),
                    label,
                    &spec.label_style,
                    Anchor::Middle,
                    entry.text_color,
                );
            }
            if spec.value_label_option == ValueLabelOption::TopOfChart
                && let Some(label) = &entry.value_label
            {
                doc.text(
                    Point::new(x, header_y),
                    label,
                    &spec.value_label_style,
                    Anchor::Middle,
                    entry.text_color,
                );
            }
        }
    }
}
