use crate::error::HeatmapError;
use serde::{Deserialize, Serialize};

/// The dataset as published by the endpoint: a base temperature and one
/// variance record per (year, month).
///
/// ```json
/// { "baseTemperature": 8.66,
///   "monthlyVariance": [ { "year": 1753, "month": 1, "variance": -1.366 } ] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Base temperature in °C.
    pub base_temperature: f64,
    /// Records in publication order (chronological in the upstream data).
    pub monthly_variance: Vec<VarianceRecord>,
}

/// One month's deviation from the base temperature.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct VarianceRecord {
    pub year: i32,
    /// Calendar month, 1 = January.
    pub month: u32,
    /// °C delta from [`Dataset::base_temperature`].
    pub variance: f64,
}

impl VarianceRecord {
    /// Absolute temperature for this record given the dataset's base.
    #[inline]
    pub fn temperature(&self, base: f64) -> f64 {
        base + self.variance
    }

    /// Zero-based month index (0 = January) used by the vertical scale.
    ///
    /// Callers must have validated the record; month 0 saturates to 0.
    #[inline]
    pub fn month_index(&self) -> u32 {
        self.month.saturating_sub(1)
    }
}

impl Dataset {
    /// Check the invariants the renderer relies on.
    ///
    /// An empty record list is accepted here; [`crate::viz::build_scene`]
    /// rejects it separately because the header needs a year range.
    pub fn validate(&self) -> Result<(), HeatmapError> {
        if !self.base_temperature.is_finite() {
            return Err(HeatmapError::NonFiniteBase);
        }
        for (index, r) in self.monthly_variance.iter().enumerate() {
            if !(1..=12).contains(&r.month) {
                return Err(HeatmapError::MonthOutOfRange {
                    index,
                    month: r.month,
                });
            }
            if !r.variance.is_finite() {
                return Err(HeatmapError::NonFiniteVariance { index });
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.monthly_variance.is_empty()
    }

    /// Year of the first and last record, in dataset order.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let first = self.monthly_variance.first()?;
        let last = self.monthly_variance.last()?;
        Some((first.year, last.year))
    }

    /// Iterator over `(record, temperature)` pairs.
    pub fn temperatures(&self) -> impl Iterator<Item = (&VarianceRecord, f64)> + '_ {
        let base = self.base_temperature;
        self.monthly_variance.iter().map(move |r| (r, r.temperature(base)))
    }
}
