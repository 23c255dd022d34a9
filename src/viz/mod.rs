//! Visualization: turn a [`Dataset`] into a heat map and write it as **HTML**, **SVG** or **PNG**.
//!
//! - [`build_scene`] is pure: scales → shapes, no I/O
//! - [`svg`] serializes a scene to a standalone SVG or a self-contained HTML page
//! - [`raster`] draws a scene through plotters (PNG via the bitmap backend)
//! - [`render_to_path`] picks the backend from the file extension

pub mod axis;
pub mod legend;
pub mod raster;
pub mod svg;
pub mod text;
pub mod types;

pub use types::{Layout, Margin, Node, Scene};

use crate::error::HeatmapError;
use crate::models::{Dataset, VarianceRecord};
use crate::scales::Scales;
use crate::tooltip::{tooltip_html, tooltip_text};
use anyhow::{Context, Result};
use std::path::Path;
use text::fmt_celsius;
use types::{Group, Rect};

pub const TITLE: &str = "Monthly Global Land-Surface Temperature";
pub const CELL_CLASS: &str = "cell";
pub const X_AXIS_ID: &str = "x-axis";
pub const Y_AXIS_ID: &str = "y-axis";
/// Height of the title band that standalone SVG and PNG output add above the chart.
pub const HEADER_PX: f64 = 60.0;

/// Output backends, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Html,
    Svg,
    Png,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self, HeatmapError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "html" | "htm" => Ok(OutputFormat::Html),
            "svg" => Ok(OutputFormat::Svg),
            "png" => Ok(OutputFormat::Png),
            _ => Err(HeatmapError::UnsupportedOutput(ext)),
        }
    }
}

/// Subtitle: year range of the records and the base temperature.
pub fn description(first_year: i32, last_year: i32, base: f64) -> String {
    format!(
        "{} - {}: base temperature {}",
        first_year,
        last_year,
        fmt_celsius(base)
    )
}

/// Lay out the whole heat map in one pass.
///
/// ### Errors
/// - [`HeatmapError::InvalidLayout`] for sizes no backend can draw
/// - [`HeatmapError::EmptyDataset`] when there are no records
/// - any error from [`Dataset::validate`]
pub fn build_scene(data: &Dataset, layout: &Layout) -> Result<Scene, HeatmapError> {
    layout.validate()?;
    data.validate()?;
    let (first_year, last_year) = data.year_span().ok_or(HeatmapError::EmptyDataset)?;
    let scales = Scales::build(data, layout.width, layout.height);
    let base = data.base_temperature;

    let mut root = Group {
        translate: (layout.margin.left, layout.margin.top),
        ..Group::default()
    };

    root.children.push(Node::Group(axis::bottom_axis(
        X_AXIS_ID,
        layout.height,
        layout.width,
        &scales.x_ticks(),
        scales.x.bandwidth(),
        layout.font_px,
    )));
    root.children.push(Node::Group(axis::left_axis(
        Y_AXIS_ID,
        layout.height,
        &scales.y_ticks(),
        scales.y.bandwidth(),
        layout.font_px,
    )));

    root.children.extend(
        data.monthly_variance
            .iter()
            .filter_map(|r| cell(r, base, &scales))
            .map(Node::Rect),
    );

    root.children.push(Node::Group(legend::legend_group(
        &scales.color,
        (
            layout.margin.left,
            layout.height + layout.margin.top + layout.legend_padding,
        ),
        layout.legend_width,
        layout.legend_height,
        layout.legend_padding,
        layout.font_px,
    )));

    let (width, height) = layout.canvas_size();
    log::debug!(
        "scene: {} cells, {} years, temperature {:.3}..{:.3}",
        data.monthly_variance.len(),
        scales.x.domain().len(),
        scales.min_temp,
        scales.max_temp
    );
    Ok(Scene {
        width,
        height,
        title: TITLE.to_string(),
        description: description(first_year, last_year, base),
        root,
    })
}

fn cell(r: &VarianceRecord, base: f64, scales: &Scales) -> Option<Rect> {
    let x = scales.x.position(r.year)?;
    let y = scales.y.position(r.month_index())?;
    let temp = r.temperature(base);
    Some(Rect {
        x,
        y,
        width: scales.x.bandwidth(),
        height: scales.y.bandwidth(),
        fill: scales.color.color(temp),
        gradient: None,
        class: Some(CELL_CLASS.to_string()),
        attrs: vec![
            ("data-month".to_string(), r.month_index().to_string()),
            ("data-year".to_string(), r.year.to_string()),
            ("data-temp".to_string(), temp.to_string()),
            ("data-variance".to_string(), r.variance.to_string()),
            ("data-tooltip".to_string(), tooltip_html(r, base)),
        ],
        title: Some(tooltip_text(r, base)),
    })
}

/// Build the scene and write it to `out_path`; the extension selects the backend.
pub fn render_to_path<P: AsRef<Path>>(data: &Dataset, layout: &Layout, out_path: P) -> Result<()> {
    let out_path = out_path.as_ref();
    let format = OutputFormat::from_path(out_path)?;
    let scene = build_scene(data, layout)?;
    match format {
        OutputFormat::Html => std::fs::write(out_path, svg::to_html(&scene))
            .with_context(|| format!("write {}", out_path.display()))?,
        OutputFormat::Svg => std::fs::write(out_path, svg::to_svg(&scene))
            .with_context(|| format!("write {}", out_path.display()))?,
        OutputFormat::Png => raster::save_png(&scene, out_path)?,
    }
    log::info!("wrote {:?} heat map to {}", format, out_path.display());
    Ok(())
}
