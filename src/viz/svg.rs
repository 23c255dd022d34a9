//! Serialize a [`Scene`] to SVG markup, standalone or embedded in an HTML page.

use super::types::{Anchor, Baseline, Group, Label, Line, LinearGradient, Node, Rect, Scene};
use super::HEADER_PX;
use crate::tooltip::{OFFSET_X, OFFSET_Y, VISIBLE_OPACITY};
use std::fmt::Write;

/// Format a coordinate with up to 3 decimals, trimming trailing zeros and dot.
fn num(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Native `<title>` tooltips on cells.
    Standalone,
    /// Tooltips come from the page script; no `<title>` children.
    Embedded,
}

/// Standalone SVG: header text band on top, native hover titles on cells.
pub fn to_svg(scene: &Scene) -> String {
    let total_h = scene.height + HEADER_PX;
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
        w = num(scene.width),
        h = num(total_h),
    );
    let _ = writeln!(out, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##);
    let _ = writeln!(
        out,
        r#"<text id="title" x="{x}" y="28" text-anchor="middle" font-size="20">{t}</text>"#,
        x = num(scene.width / 2.0),
        t = escape_xml(&scene.title),
    );
    let _ = writeln!(
        out,
        r#"<text id="description" x="{x}" y="50" text-anchor="middle" font-size="13">{t}</text>"#,
        x = num(scene.width / 2.0),
        t = escape_xml(&scene.description),
    );
    let _ = writeln!(out, r#"<g transform="translate(0, {})">"#, num(HEADER_PX));
    write_group(&mut out, &scene.root, Mode::Standalone);
    out.push_str("</g>\n</svg>\n");
    out
}

/// Chart `<svg>` element only, as embedded in the HTML page.
pub fn svg_element(scene: &Scene) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg width="{}" height="{}" font-family="sans-serif">"#,
        num(scene.width),
        num(scene.height),
    );
    write_group(&mut out, &scene.root, Mode::Embedded);
    out.push_str("</svg>");
    out
}

/// Self-contained HTML page: header, chart, tooltip element and hover script.
pub fn to_html(scene: &Scene) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{page_title}</title>
    <style>{css}</style>
</head>
<body>
    <header>
        <h1 id="title">{title}</h1>
        <h3 id="description">{description}</h3>
    </header>
    <main id="heatmap">
{svg}
    </main>
    <div id="tooltip" style="opacity: 0"></div>
    <script>{js}</script>
</body>
</html>
"#,
        page_title = escape_xml(&scene.title),
        css = INLINE_CSS,
        title = escape_xml(&scene.title),
        description = escape_xml(&scene.description),
        svg = svg_element(scene),
        js = inline_javascript(),
    )
}

const INLINE_CSS: &str = r#"
body { font-family: sans-serif; margin: 0; padding: 16px; }
header { text-align: center; }
main { display: flex; justify-content: center; }
#tooltip {
    position: absolute;
    pointer-events: none;
    background: rgba(255, 255, 255, 0.95);
    border: 1px solid #333;
    border-radius: 4px;
    padding: 6px 8px;
    font-size: 12px;
    line-height: 1.4;
}
.cell:hover { stroke: #000; stroke-width: 1; }
"#;

/// Pointer handlers mirroring [`crate::tooltip::TooltipState`].
fn inline_javascript() -> String {
    format!(
        r##"
const tooltip = document.getElementById("tooltip");
document.querySelectorAll("#heatmap .cell").forEach((cell) => {{
    cell.addEventListener("mouseover", (event) => {{
        tooltip.innerHTML = cell.dataset.tooltip;
        tooltip.setAttribute("data-year", cell.dataset.year);
        tooltip.style.left = (event.pageX + {dx}) + "px";
        tooltip.style.top = (event.pageY + {dy}) + "px";
        tooltip.style.opacity = {visible};
    }});
    cell.addEventListener("mouseout", () => {{
        tooltip.style.opacity = 0;
    }});
}});
"##,
        dx = num(OFFSET_X),
        dy = num(OFFSET_Y),
        visible = num(VISIBLE_OPACITY),
    )
}

fn write_group(out: &mut String, g: &Group, mode: Mode) {
    out.push_str("<g");
    if let Some(id) = &g.id {
        let _ = write!(out, r#" id="{}""#, escape_xml(id));
    }
    if g.translate != (0.0, 0.0) {
        let _ = write!(
            out,
            r#" transform="translate({}, {})""#,
            num(g.translate.0),
            num(g.translate.1)
        );
    }
    out.push_str(">\n");
    for node in &g.children {
        match node {
            Node::Group(child) => write_group(out, child, mode),
            Node::Rect(r) => write_rect(out, r, mode),
            Node::Text(t) => write_text(out, t),
            Node::Line(l) => write_line(out, l),
            Node::Gradient(grad) => write_gradient(out, grad),
        }
    }
    out.push_str("</g>\n");
}

fn write_rect(out: &mut String, r: &Rect, mode: Mode) {
    out.push_str("<rect");
    if let Some(class) = &r.class {
        let _ = write!(out, r#" class="{}""#, escape_xml(class));
    }
    let fill = match &r.gradient {
        Some(id) => format!("url(#{})", escape_xml(id)),
        None => r.fill.to_string(),
    };
    let _ = write!(
        out,
        r#" x="{}" y="{}" width="{}" height="{}" fill="{}""#,
        num(r.x),
        num(r.y),
        num(r.width),
        num(r.height),
        fill
    );
    for (k, v) in &r.attrs {
        let _ = write!(out, r#" {}="{}""#, k, escape_xml(v));
    }
    match (&r.title, mode) {
        (Some(title), Mode::Standalone) => {
            let _ = writeln!(out, "><title>{}</title></rect>", escape_xml(title));
        }
        _ => out.push_str("/>\n"),
    }
}

fn write_text(out: &mut String, t: &Label) {
    let anchor = match t.anchor {
        Anchor::Start => "start",
        Anchor::Middle => "middle",
        Anchor::End => "end",
    };
    let dy = match t.baseline {
        Baseline::Hanging => "0.71em",
        Baseline::Middle => "0.32em",
    };
    out.push_str("<text");
    if let Some(id) = &t.id {
        let _ = write!(out, r#" id="{}""#, escape_xml(id));
    }
    let _ = writeln!(
        out,
        r#" x="{}" y="{}" dy="{}" text-anchor="{}" font-size="{}">{}</text>"#,
        num(t.x),
        num(t.y),
        dy,
        anchor,
        t.font_px,
        escape_xml(&t.text)
    );
}

fn write_line(out: &mut String, l: &Line) {
    let _ = writeln!(
        out,
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}"/>"#,
        num(l.x1),
        num(l.y1),
        num(l.x2),
        num(l.y2),
        l.stroke
    );
}

fn write_gradient(out: &mut String, grad: &LinearGradient) {
    let _ = writeln!(
        out,
        r#"<defs><linearGradient id="{}" x1="0%" y1="0%" x2="100%" y2="0%">"#,
        escape_xml(&grad.id)
    );
    for (offset, color) in &grad.stops {
        let _ = writeln!(
            out,
            r#"<stop offset="{}" stop-color="{}"/>"#,
            num(*offset),
            color
        );
    }
    out.push_str("</linearGradient></defs>\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn num_trims() {
        assert_eq!(num(10.0), "10");
        assert_eq!(num(4.10646), "4.106");
        assert_eq!(num(-0.0001), "0");
        assert_eq!(num(0.125), "0.125");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_xml(r#"<strong>a & "b"</strong>"#),
            "&lt;strong&gt;a &amp; &quot;b&quot;&lt;/strong&gt;"
        );
    }

    #[test]
    fn javascript_uses_tooltip_offsets() {
        let js = inline_javascript();
        assert!(js.contains("event.pageX + 10"));
        assert!(js.contains("event.pageY + -30"));
        assert!(js.contains("tooltip.style.opacity = 0.9"));
    }
}
