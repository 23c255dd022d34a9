use crate::models::{Dataset, VarianceRecord};
use serde::Serialize;

/// Summary statistics for a dataset. All temperatures are absolute (°C).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Summary {
    pub records: usize,
    pub base_temperature: f64,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub mean_temp: Option<f64>,
    /// First record reaching `max_temp`.
    pub warmest: Option<VarianceRecord>,
    /// First record reaching `min_temp`.
    pub coldest: Option<VarianceRecord>,
}

/// Minimum and maximum absolute temperature, or `None` for an empty dataset.
pub fn temperature_extent(data: &Dataset) -> Option<(f64, f64)> {
    let mut temps = data.temperatures().map(|(_, t)| t);
    let first = temps.next()?;
    Some(temps.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t))))
}

pub fn summarize(data: &Dataset) -> Summary {
    let mut warmest: Option<(VarianceRecord, f64)> = None;
    let mut coldest: Option<(VarianceRecord, f64)> = None;
    let mut sum = 0.0;
    for (r, t) in data.temperatures() {
        sum += t;
        if warmest.is_none_or(|(_, w)| t > w) {
            warmest = Some((*r, t));
        }
        if coldest.is_none_or(|(_, c)| t < c) {
            coldest = Some((*r, t));
        }
    }
    let n = data.monthly_variance.len();
    let span = data.year_span();
    Summary {
        records: n,
        base_temperature: data.base_temperature,
        first_year: span.map(|(a, _)| a),
        last_year: span.map(|(_, b)| b),
        min_temp: coldest.map(|(_, t)| t),
        max_temp: warmest.map(|(_, t)| t),
        mean_temp: (n > 0).then(|| sum / n as f64),
        warmest: warmest.map(|(r, _)| r),
        coldest: coldest.map(|(r, _)| r),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> Dataset {
        Dataset {
            base_temperature: 8.0,
            monthly_variance: vec![
                VarianceRecord { year: 1900, month: 1, variance: -0.5 },
                VarianceRecord { year: 1900, month: 2, variance: 1.5 },
                VarianceRecord { year: 1901, month: 1, variance: 0.5 },
            ],
        }
    }

    #[test]
    fn summary_of_small_dataset() {
        let s = summarize(&data());
        assert_eq!(s.records, 3);
        assert_eq!(s.first_year, Some(1900));
        assert_eq!(s.last_year, Some(1901));
        assert_eq!(s.min_temp, Some(7.5));
        assert_eq!(s.max_temp, Some(9.5));
        assert_eq!(s.mean_temp, Some(8.5));
        assert_eq!(s.warmest.map(|r| r.month), Some(2));
        assert_eq!(s.coldest.map(|r| (r.year, r.month)), Some((1900, 1)));
        assert_eq!(temperature_extent(&data()), Some((7.5, 9.5)));
    }

    #[test]
    fn summary_of_empty_dataset() {
        let d = Dataset { base_temperature: 8.0, monthly_variance: vec![] };
        let s = summarize(&d);
        assert_eq!(s.records, 0);
        assert_eq!(s.mean_temp, None);
        assert_eq!(s.warmest, None);
        assert_eq!(temperature_extent(&d), None);
    }
}
