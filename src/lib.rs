//! heatmap_rs
//!
//! A small Rust library for rendering the monthly global land-surface temperature
//! dataset as a heat map. Pairs with the `heatmap` CLI.
//!
//! ### Features
//! - Fetch the dataset once over HTTP (or read it from a local JSON file)
//! - Validate records before drawing
//! - Quantized 9-color diverging palette, year × month band layout
//! - Write a self-contained interactive HTML page, a standalone SVG, or a PNG
//! - Quick summary statistics (extremes, mean, year range)
//!
//! ### Example
//! ```no_run
//! use heatmap_rs::{Client, DEFAULT_DATA_URL};
//! use heatmap_rs::viz::{self, Layout};
//!
//! let client = Client::default();
//! let data = client.fetch_dataset(DEFAULT_DATA_URL)?;
//! viz::render_to_path(&data, &Layout::default(), "heatmap.html")?;
//! let stats = heatmap_rs::stats::summarize(&data);
//! println!("{:#?}", stats);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod error;
pub mod models;
pub mod scales;
pub mod stats;
pub mod tooltip;
pub mod viz;

pub use api::{Client, DEFAULT_DATA_URL};
pub use error::HeatmapError;
pub use models::{Dataset, VarianceRecord};
