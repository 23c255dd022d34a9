//! Synchronous loader for the **global land-surface temperature** dataset.
//!
//! The dataset is a single JSON document; one GET retrieves all of it. There is
//! no pagination and no retry: a failed request aborts the pipeline and the caller
//! decides how to report it.
//!
//! Typical usage:
//! ```no_run
//! # use heatmap_rs::{Client, DEFAULT_DATA_URL};
//! let client = Client::default();
//! let data = client.fetch_dataset(DEFAULT_DATA_URL)?;
//! println!("{} records", data.monthly_variance.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::models::Dataset;
use anyhow::{Context, Result, bail};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use std::path::Path;
use std::time::Duration;

/// Public location of the monthly variance dataset.
pub const DEFAULT_DATA_URL: &str =
    "https://raw.githubusercontent.com/FreeCodeCamp/ProjectReferenceData/master/global-temperature.json";

#[derive(Debug, Clone)]
pub struct Client {
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("heatmap_rs/", env!("CARGO_PKG_VERSION"))) // set user agent
            .build()
            .expect("reqwest client build");
        Self { http }
    }
}

impl Client {
    /// Fetch and decode the dataset from `url`.
    ///
    /// ### Errors
    /// - Network error
    /// - Non-success HTTP status
    /// - JSON decoding error (missing fields, wrong types)
    pub fn fetch_dataset(&self, url: &str) -> Result<Dataset> {
        log::info!("fetching dataset from {url}");
        let resp = self
            .http
            .get(url)
            .send()
            .with_context(|| format!("GET {}", url))?;
        if !resp.status().is_success() {
            bail!("request failed with HTTP {}", resp.status());
        }
        let body = resp.text().with_context(|| format!("read body of {}", url))?;
        let data = parse_dataset(&body).with_context(|| format!("GET {}", url))?;
        log::info!(
            "loaded {} records (base temperature {})",
            data.monthly_variance.len(),
            data.base_temperature
        );
        Ok(data)
    }
}

/// Decode a dataset document.
pub fn parse_dataset(json: &str) -> Result<Dataset> {
    serde_json::from_str(json).context("decode dataset json")
}

/// Read a dataset from a local JSON file (same shape as the remote document).
pub fn load_dataset_file<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    log::info!("reading dataset from {}", path.display());
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read {}", path.display()))?;
    parse_dataset(&text).with_context(|| format!("parse {}", path.display()))
}
