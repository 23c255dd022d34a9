//! Hover tooltip: a two-state (hidden / visible) value toggled by pointer events.
//!
//! The HTML backend embeds the same content and offsets in the page so the
//! browser behaves exactly like [`TooltipState`].

use crate::models::VarianceRecord;
use crate::viz::text::{fmt_celsius, fmt_fixed1, month_name};

/// Tooltip is drawn this far right of the pointer.
pub const OFFSET_X: f64 = 10.0;
/// Tooltip is drawn this far below the pointer (negative = above).
pub const OFFSET_Y: f64 = -30.0;
pub const VISIBLE_OPACITY: f64 = 0.9;

/// Pointer position in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub left: f64,
    pub top: f64,
    pub html: String,
    pub data_year: i32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum TooltipState {
    #[default]
    Hidden,
    Visible(Tooltip),
}

impl TooltipState {
    /// Pointer entered a cell.
    pub fn hover(&mut self, record: &VarianceRecord, base: f64, pointer: Pointer) {
        *self = TooltipState::Visible(Tooltip {
            left: pointer.x + OFFSET_X,
            top: pointer.y + OFFSET_Y,
            html: tooltip_html(record, base),
            data_year: record.year,
        });
    }

    /// Pointer left a cell.
    pub fn unhover(&mut self) {
        *self = TooltipState::Hidden;
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, TooltipState::Visible(_))
    }

    pub fn opacity(&self) -> f64 {
        match self {
            TooltipState::Hidden => 0.0,
            TooltipState::Visible(_) => VISIBLE_OPACITY,
        }
    }
}

fn fields(record: &VarianceRecord, base: f64) -> [(&'static str, String); 4] {
    [
        (
            "Date",
            format!("{} {}", month_name(record.month_index()), record.year),
        ),
        ("Variance", fmt_fixed1(record.variance)),
        ("Temperature", fmt_celsius(record.temperature(base))),
        ("Data Year", record.year.to_string()),
    ]
}

/// Tooltip markup: bold labels, one field per line.
pub fn tooltip_html(record: &VarianceRecord, base: f64) -> String {
    fields(record, base)
        .iter()
        .map(|(k, v)| format!("<strong>{k}:</strong> {v}"))
        .collect::<Vec<_>>()
        .join("<br>")
}

/// Plain-text tooltip, one field per line.
pub fn tooltip_text(record: &VarianceRecord, base: f64) -> String {
    fields(record, base)
        .iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .collect::<Vec<_>>()
        .join("\n")
}
