//! Draw a [`Scene`] through plotters: any `DrawingBackend`, PNG via the bitmap backend.
//!
//! `ab_glyph` doesn't discover OS fonts, so a bundled DejaVu Sans is registered as
//! "sans-serif" on first use. [`register_font_file`] replaces it with another TTF.

use super::types::{Anchor, Baseline, Group, Label, Node, Rect, Scene};
use super::HEADER_PX;
use crate::scales::Rgb8;
use anyhow::{Context, Result, anyhow};
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_bitmap::BitMapBackend;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};

static BUNDLED_FONT: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");
static INIT_FONTS: Once = Once::new();
static FONT_READY: AtomicBool = AtomicBool::new(false);

fn register_sans(bytes: &'static [u8]) -> bool {
    plotters::style::register_font("sans-serif", plotters::style::FontStyle::Normal, bytes).is_ok()
}

/// One-time registration of the bundled font. Safe to call many times.
fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        if register_sans(BUNDLED_FONT) {
            FONT_READY.store(true, Ordering::Release);
        } else {
            log::warn!("bundled font could not be parsed; labels will be skipped");
        }
    });
}

/// Use a TTF/OTF file for labels instead of the bundled font.
///
/// ### Errors
/// - the file can't be read
/// - the bytes are not a font `ab_glyph` can parse
pub fn register_font_file<P: AsRef<Path>>(path: P) -> Result<()> {
    ensure_fonts_registered();
    let path = path.as_ref();
    let bytes = std::fs::read(path).with_context(|| format!("read font {}", path.display()))?;
    // plotters keeps a 'static reference for the lifetime of the process.
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    if !register_sans(bytes) {
        return Err(anyhow!("invalid font {}", path.display()));
    }
    FONT_READY.store(true, Ordering::Release);
    log::info!("registered font {}", path.display());
    Ok(())
}

pub fn fonts_available() -> bool {
    ensure_fonts_registered();
    FONT_READY.load(Ordering::Acquire)
}

fn rgb(c: Rgb8) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

/// Linear interpolation between gradient stops at `t` in `0..=1`.
fn gradient_color(stops: &[(f64, Rgb8)], t: f64) -> Rgb8 {
    let Some(&(_, first)) = stops.first() else {
        return Rgb8::new(0, 0, 0);
    };
    let mut prev = (0.0, first);
    for &(offset, color) in stops {
        if t <= offset {
            let span = offset - prev.0;
            if span <= 0.0 {
                return color;
            }
            let f = (t - prev.0) / span;
            let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * f).round() as u8;
            return Rgb8::new(
                mix(prev.1.r, color.r),
                mix(prev.1.g, color.g),
                mix(prev.1.b, color.b),
            );
        }
        prev = (offset, color);
    }
    prev.1
}

fn collect_gradients<'a>(g: &'a Group, out: &mut HashMap<&'a str, &'a [(f64, Rgb8)]>) {
    for node in &g.children {
        match node {
            Node::Gradient(grad) => {
                out.insert(grad.id.as_str(), grad.stops.as_slice());
            }
            Node::Group(child) => collect_gradients(child, out),
            _ => {}
        }
    }
}

struct Painter<'a, DB: DrawingBackend> {
    area: &'a DrawingArea<DB, Shift>,
    gradients: HashMap<&'a str, &'a [(f64, Rgb8)]>,
    skipped_text: usize,
}

impl<DB: DrawingBackend> Painter<'_, DB> {
    fn group(&mut self, g: &Group, origin: (f64, f64)) -> Result<()> {
        let origin = (origin.0 + g.translate.0, origin.1 + g.translate.1);
        for node in &g.children {
            match node {
                Node::Group(child) => self.group(child, origin)?,
                Node::Rect(r) => self.rect(r, origin)?,
                Node::Text(t) => self.text(t, origin)?,
                Node::Line(l) => {
                    let p1 = px(origin.0 + l.x1, origin.1 + l.y1);
                    let p2 = px(origin.0 + l.x2, origin.1 + l.y2);
                    self.area
                        .draw(&PathElement::new(vec![p1, p2], rgb(l.stroke).stroke_width(1)))
                        .map_err(|e| anyhow!("{:?}", e))?;
                }
                Node::Gradient(_) => {}
            }
        }
        Ok(())
    }

    fn rect(&mut self, r: &Rect, origin: (f64, f64)) -> Result<()> {
        // Round both edges so adjacent bands share a boundary without gaps.
        let (x0, y0) = px(origin.0 + r.x, origin.1 + r.y);
        let (x1, y1) = px(origin.0 + r.x + r.width, origin.1 + r.y + r.height);
        if x1 <= x0 || y1 <= y0 {
            return Ok(());
        }
        match r.gradient.as_deref().and_then(|id| self.gradients.get(id)) {
            Some(stops) => {
                let w = (x1 - x0).max(2) as f64;
                for x in x0..x1 {
                    let c = gradient_color(stops, (x - x0) as f64 / (w - 1.0));
                    self.area
                        .draw(&Rectangle::new([(x, y0), (x + 1, y1)], rgb(c).filled()))
                        .map_err(|e| anyhow!("{:?}", e))?;
                }
            }
            None => {
                self.area
                    .draw(&Rectangle::new([(x0, y0), (x1, y1)], rgb(r.fill).filled()))
                    .map_err(|e| anyhow!("{:?}", e))?;
            }
        }
        Ok(())
    }

    fn text(&mut self, t: &Label, origin: (f64, f64)) -> Result<()> {
        if !fonts_available() {
            self.skipped_text += 1;
            return Ok(());
        }
        let h = match t.anchor {
            Anchor::Start => HPos::Left,
            Anchor::Middle => HPos::Center,
            Anchor::End => HPos::Right,
        };
        let v = match t.baseline {
            Baseline::Hanging => VPos::Top,
            Baseline::Middle => VPos::Center,
        };
        let style = TextStyle::from((FontFamily::SansSerif, f64::from(t.font_px))).pos(Pos::new(h, v));
        self.area
            .draw(&Text::new(
                t.text.clone(),
                px(origin.0 + t.x, origin.1 + t.y),
                style,
            ))
            .map_err(|e| anyhow!("{:?}", e))?;
        Ok(())
    }
}

fn px(x: f64, y: f64) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

/// Draw the scene onto `area`, with the title band of [`HEADER_PX`] on top.
pub fn draw_scene<DB: DrawingBackend>(scene: &Scene, area: &DrawingArea<DB, Shift>) -> Result<()> {
    area.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

    let mut gradients = HashMap::new();
    collect_gradients(&scene.root, &mut gradients);
    let mut painter = Painter {
        area,
        gradients,
        skipped_text: 0,
    };

    let cx = scene.width / 2.0;
    let header = [
        (scene.title.as_str(), 28.0, 20),
        (scene.description.as_str(), 50.0, 13),
    ];
    for (text, y, font_px) in header {
        painter.text(
            &Label {
                x: cx,
                y,
                text: text.to_string(),
                anchor: Anchor::Middle,
                baseline: Baseline::Middle,
                font_px,
                id: None,
            },
            (0.0, 0.0),
        )?;
    }
    painter.group(&scene.root, (0.0, HEADER_PX))?;

    if painter.skipped_text > 0 {
        log::warn!(
            "no usable font; skipped {} text labels",
            painter.skipped_text
        );
    }
    area.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

/// Pixel size of the raster canvas for `scene`.
pub fn canvas_px(scene: &Scene) -> (u32, u32) {
    (
        scene.width.ceil() as u32,
        (scene.height + HEADER_PX).ceil() as u32,
    )
}

/// Write the scene as a PNG.
pub fn save_png<P: AsRef<Path>>(scene: &Scene, out_path: P) -> Result<()> {
    let out_path = out_path.as_ref();
    let root = BitMapBackend::new(out_path, canvas_px(scene)).into_drawing_area();
    draw_scene(scene, &root)
}
