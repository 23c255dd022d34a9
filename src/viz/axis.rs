//! Axis groups: a domain line plus one tick mark and label per tick.

use super::types::{Anchor, Baseline, Group, Label, Line, Node};
use crate::scales::{Rgb8, Tick};

const AXIS_COLOR: Rgb8 = Rgb8::new(0, 0, 0);
const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;

/// Bottom axis. Ticks sit at band centres; the group is translated to `(0, y)`.
pub fn bottom_axis(
    id: &str,
    y: f64,
    length: f64,
    ticks: &[Tick],
    bandwidth: f64,
    font_px: u32,
) -> Group {
    let mut g = Group::with_id(id, (0.0, y));
    g.children.push(Node::Line(Line {
        x1: 0.0,
        y1: 0.0,
        x2: length,
        y2: 0.0,
        stroke: AXIS_COLOR,
    }));
    for t in ticks {
        let x = t.offset + bandwidth / 2.0;
        g.children.push(Node::Line(Line {
            x1: x,
            y1: 0.0,
            x2: x,
            y2: TICK_SIZE,
            stroke: AXIS_COLOR,
        }));
        g.children.push(Node::Text(Label {
            x,
            y: TICK_SIZE + TICK_PADDING,
            text: t.label.clone(),
            anchor: Anchor::Middle,
            baseline: Baseline::Hanging,
            font_px,
            id: None,
        }));
    }
    g
}

/// Left axis at `x = 0`, labels right-aligned against the tick marks.
pub fn left_axis(id: &str, length: f64, ticks: &[Tick], bandwidth: f64, font_px: u32) -> Group {
    let mut g = Group::with_id(id, (0.0, 0.0));
    g.children.push(Node::Line(Line {
        x1: 0.0,
        y1: 0.0,
        x2: 0.0,
        y2: length,
        stroke: AXIS_COLOR,
    }));
    for t in ticks {
        let y = t.offset + bandwidth / 2.0;
        g.children.push(Node::Line(Line {
            x1: -TICK_SIZE,
            y1: y,
            x2: 0.0,
            y2: y,
            stroke: AXIS_COLOR,
        }));
        g.children.push(Node::Text(Label {
            x: -(TICK_SIZE + TICK_PADDING),
            y,
            text: t.label.clone(),
            anchor: Anchor::End,
            baseline: Baseline::Middle,
            font_px,
            id: None,
        }));
    }
    g
}
