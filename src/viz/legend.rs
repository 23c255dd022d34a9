//! Color legend: a gradient strip overlaid by one swatch per palette bucket,
//! flanked by the minimum and maximum temperature.

use super::text::fmt_celsius;
use super::types::{Anchor, Baseline, Group, Label, LinearGradient, Node, Rect};
use crate::scales::ColorScale;

pub const LEGEND_ID: &str = "legend";
pub const GRADIENT_ID: &str = "color-gradient";

/// Gap between the last swatch and the max label, on top of the padding.
const MAX_LABEL_GAP: f64 = 50.0;

/// Build the legend group at `origin`.
///
/// Swatches are `legend_width / (n - 1)` wide so the first and last colors sit
/// on the gradient's end stops.
pub fn legend_group(
    color: &ColorScale,
    origin: (f64, f64),
    legend_width: f64,
    legend_height: f64,
    padding: f64,
    font_px: u32,
) -> Group {
    let palette = color.range();
    let steps = (palette.len() - 1) as f64;
    let swatch_w = legend_width / steps;
    let (min_temp, max_temp) = color.domain();

    let mut g = Group::with_id(LEGEND_ID, origin);
    g.children.push(Node::Gradient(LinearGradient {
        id: GRADIENT_ID.to_string(),
        stops: palette
            .iter()
            .enumerate()
            .map(|(i, c)| (i as f64 / steps, *c))
            .collect(),
    }));
    g.children.push(Node::Rect(Rect {
        x: 0.0,
        y: 0.0,
        width: legend_width,
        height: legend_height,
        fill: palette[0],
        gradient: Some(GRADIENT_ID.to_string()),
        class: Some("legend-gradient".to_string()),
        attrs: Vec::new(),
        title: None,
    }));
    for (i, c) in palette.iter().enumerate() {
        let title = color
            .invert_extent(i)
            .map(|(lo, hi)| format!("{:.1} – {}", lo, fmt_celsius(hi)));
        g.children.push(Node::Rect(Rect {
            x: i as f64 * swatch_w,
            y: 0.0,
            width: swatch_w,
            height: legend_height,
            fill: *c,
            gradient: None,
            class: Some("legend-swatch".to_string()),
            attrs: vec![("data-bucket".to_string(), i.to_string())],
            title,
        }));
    }
    g.children.push(Node::Text(Label {
        x: -padding,
        y: legend_height / 2.0,
        text: fmt_celsius(min_temp),
        anchor: Anchor::End,
        baseline: Baseline::Middle,
        font_px,
        id: Some("legend-min".to_string()),
    }));
    g.children.push(Node::Text(Label {
        x: legend_width + padding + MAX_LABEL_GAP,
        y: legend_height / 2.0,
        text: fmt_celsius(max_temp),
        anchor: Anchor::Start,
        baseline: Baseline::Middle,
        font_px,
        id: Some("legend-max".to_string()),
    }));
    g
}
