//! Public types for the visualization module: layout configuration and the
//! backend-independent scene the renderer produces.

use crate::error::HeatmapError;
use crate::scales::Rgb8;
use serde::{Deserialize, Serialize};

/// Outer margins around the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Geometry of the chart. `width`/`height` describe the plot area only; the
/// canvas adds the margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub legend_width: f64,
    pub legend_height: f64,
    pub legend_padding: f64,
    /// Font size for tick and legend labels.
    pub font_px: u32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: 1080.0,
            height: 540.0,
            margin: Margin {
                top: 20.0,
                right: 20.0,
                bottom: 50.0,
                left: 60.0,
            },
            legend_width: 400.0,
            legend_height: 20.0,
            legend_padding: 10.0,
            font_px: 10,
        }
    }
}

/// Upper bound for any single layout size; keeps raster buffers allocatable.
pub const MAX_SIDE_PX: f64 = 16_384.0;

impl Layout {
    /// Reject sizes no backend can draw: plot sides must lie in `(0, MAX_SIDE_PX]`,
    /// margins and legend sizes in `[0, MAX_SIDE_PX]`.
    pub fn validate(&self) -> Result<(), HeatmapError> {
        let sides = [("width", self.width), ("height", self.height)];
        let extras = [
            ("margin.top", self.margin.top),
            ("margin.right", self.margin.right),
            ("margin.bottom", self.margin.bottom),
            ("margin.left", self.margin.left),
            ("legend_width", self.legend_width),
            ("legend_height", self.legend_height),
            ("legend_padding", self.legend_padding),
        ];
        let bad = sides
            .iter()
            .find(|(_, v)| !(v.is_finite() && *v > 0.0 && *v <= MAX_SIDE_PX))
            .or_else(|| {
                extras
                    .iter()
                    .find(|(_, v)| !(v.is_finite() && *v >= 0.0 && *v <= MAX_SIDE_PX))
            });
        match bad {
            Some(&(field, value)) => Err(HeatmapError::InvalidLayout { field, value }),
            None => Ok(()),
        }
    }

    /// Full canvas size including margins.
    pub fn canvas_size(&self) -> (f64, f64) {
        (
            self.width + self.margin.left + self.margin.right,
            self.height + self.margin.top + self.margin.bottom,
        )
    }
}

/// Horizontal text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

/// Vertical placement of text relative to its `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Baseline {
    /// Text hangs below `y` (bottom-axis labels).
    Hanging,
    /// Text is centred on `y`.
    Middle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Rgb8,
    /// When set, the rect is painted with the gradient of this id instead of `fill`.
    pub gradient: Option<String>,
    pub class: Option<String>,
    /// Extra attributes, typically `data-*` hooks.
    pub attrs: Vec<(String, String)>,
    /// Hover text for backends with native tooltips.
    pub title: Option<String>,
}

impl Rect {
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub anchor: Anchor,
    pub baseline: Baseline,
    pub font_px: u32,
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke: Rgb8,
}

/// Left-to-right linear gradient. Stops are `(offset in 0..=1, color)`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub id: String,
    pub stops: Vec<(f64, Rgb8)>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    pub id: Option<String>,
    pub translate: (f64, f64),
    pub children: Vec<Node>,
}

impl Group {
    pub fn with_id(id: &str, translate: (f64, f64)) -> Self {
        Self {
            id: Some(id.to_string()),
            translate,
            ..Self::default()
        }
    }

    /// Depth-first search for a descendant group (or `self`) with `id`.
    pub fn find_group(&self, id: &str) -> Option<&Group> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|n| match n {
            Node::Group(g) => g.find_group(id),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &Rect> + '_ {
        self.children.iter().filter_map(|n| match n {
            Node::Rect(r) => Some(r),
            _ => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &Label> + '_ {
        self.children.iter().filter_map(|n| match n {
            Node::Text(t) => Some(t),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Group(Group),
    Rect(Rect),
    Text(Label),
    Line(Line),
    Gradient(LinearGradient),
}

/// A fully laid-out heat map, ready for any backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Canvas size in pixels (plot area plus margins).
    pub width: f64,
    pub height: f64,
    /// Header text (`#title`).
    pub title: String,
    /// Header subtitle (`#description`).
    pub description: String,
    /// Root group, translated by the top-left margin.
    pub root: Group,
}

impl Scene {
    pub fn find_group(&self, id: &str) -> Option<&Group> {
        self.root.find_group(id)
    }

    /// Heat-map cells in drawing order.
    pub fn cells(&self) -> impl Iterator<Item = &Rect> + '_ {
        self.root
            .rects()
            .filter(|r| r.class.as_deref() == Some(super::CELL_CLASS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_is_valid() {
        assert_eq!(Layout::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_unusable_sizes() {
        for width in [-500.0, 0.0, f64::NAN, f64::INFINITY, 1e9] {
            let layout = Layout {
                width,
                ..Layout::default()
            };
            assert!(matches!(
                layout.validate(),
                Err(HeatmapError::InvalidLayout { field: "width", .. })
            ));
        }
        let mut layout = Layout::default();
        layout.margin.left = -1.0;
        assert!(matches!(
            layout.validate(),
            Err(HeatmapError::InvalidLayout { field: "margin.left", .. })
        ));
        layout.margin.left = 0.0;
        assert_eq!(layout.validate(), Ok(()));
    }
}
