use thiserror::Error;

/// Domain errors raised while validating a dataset or choosing an output.
///
/// Network and file I/O failures are reported through `anyhow` at the edges
/// (see [`crate::api`]); this enum only covers what the pure pipeline rejects.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HeatmapError {
    /// The dataset has no monthly records, so there is no year range to draw.
    #[error("dataset contains no monthly variance records")]
    EmptyDataset,
    /// A record's month is outside `1..=12`.
    #[error("record {index}: month {month} is outside 1..=12")]
    MonthOutOfRange { index: usize, month: u32 },
    /// A record's variance is NaN or infinite.
    #[error("record {index}: variance is not a finite number")]
    NonFiniteVariance { index: usize },
    /// The base temperature is NaN or infinite.
    #[error("base temperature is not a finite number")]
    NonFiniteBase,
    /// A layout size is NaN, infinite, negative, zero where a plot side is required,
    /// or larger than [`crate::viz::types::MAX_SIDE_PX`].
    #[error("layout {field} = {value} is out of range")]
    InvalidLayout { field: &'static str, value: f64 },
    /// The output path has an extension no backend handles.
    #[error("unsupported output format: {0:?} (expected html, svg or png)")]
    UnsupportedOutput(String),
}
