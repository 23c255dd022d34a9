//! Scales: continuous temperature → palette bucket, and discrete year/month → pixel band.

use crate::models::Dataset;
use crate::stats::temperature_extent;
use crate::viz::text::month_name;
use std::fmt;

/// 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Lowercase `#rrggbb`.
impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Diverging blue → red palette (ColorBrewer RdBu, reversed), coolest first.
pub const PALETTE: [Rgb8; 9] = [
    Rgb8::new(0x05, 0x30, 0x61), // #053061
    Rgb8::new(0x21, 0x66, 0xac), // #2166ac
    Rgb8::new(0x43, 0x93, 0xc3), // #4393c3
    Rgb8::new(0x92, 0xc5, 0xde), // #92c5de
    Rgb8::new(0xd1, 0xe5, 0xf0), // #d1e5f0
    Rgb8::new(0xfd, 0xdb, 0xc7), // #fddbc7
    Rgb8::new(0xf4, 0xa5, 0x82), // #f4a582
    Rgb8::new(0xd6, 0x60, 0x4d), // #d6604d
    Rgb8::new(0xb2, 0x18, 0x2b), // #b2182b
];

/// Quantize scale: splits `[lo, hi]` into `PALETTE.len()` equal-width buckets.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorScale {
    lo: f64,
    hi: f64,
    thresholds: Vec<f64>,
}

impl ColorScale {
    pub fn new(lo: f64, hi: f64) -> Self {
        let n = PALETTE.len();
        let thresholds = (1..n)
            .map(|i| lo + (hi - lo) * i as f64 / n as f64)
            .collect();
        Self { lo, hi, thresholds }
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.lo, self.hi)
    }

    pub fn range(&self) -> &'static [Rgb8] {
        &PALETTE
    }

    /// Bucket index for a temperature.
    ///
    /// Counts the thresholds at or below `value`, so a value exactly on a
    /// boundary lands in the warmer bucket. Out-of-domain values clamp to the end
    /// buckets, NaN maps to bucket 0 and a degenerate domain maps everything to the
    /// middle bucket.
    pub fn index(&self, value: f64) -> usize {
        if self.hi == self.lo {
            return PALETTE.len() / 2;
        }
        if value.is_nan() {
            return 0;
        }
        self.thresholds.partition_point(|t| *t <= value)
    }

    pub fn color(&self, value: f64) -> Rgb8 {
        PALETTE[self.index(value)]
    }

    /// Temperature interval `[lo, hi)` covered by bucket `index`.
    pub fn invert_extent(&self, index: usize) -> Option<(f64, f64)> {
        if index >= PALETTE.len() {
            return None;
        }
        let lo = if index == 0 { self.lo } else { self.thresholds[index - 1] };
        let hi = self.thresholds.get(index).copied().unwrap_or(self.hi);
        Some((lo, hi))
    }
}

/// Band scale over discrete categories with zero padding.
#[derive(Clone, Debug, PartialEq)]
pub struct BandScale<T> {
    domain: Vec<T>,
    start: f64,
    step: f64,
}

impl<T: PartialEq + Copy> BandScale<T> {
    /// Builds the domain from distinct values in first-appearance order.
    pub fn new(values: impl IntoIterator<Item = T>, range: (f64, f64)) -> Self {
        let mut domain: Vec<T> = Vec::new();
        for v in values {
            if !domain.contains(&v) {
                domain.push(v);
            }
        }
        let step = (range.1 - range.0) / domain.len().max(1) as f64;
        Self {
            domain,
            start: range.0,
            step,
        }
    }

    pub fn domain(&self) -> &[T] {
        &self.domain
    }

    /// Band start for `value`, or `None` if it is not in the domain.
    pub fn position(&self, value: T) -> Option<f64> {
        self.domain
            .iter()
            .position(|d| *d == value)
            .map(|i| self.start + self.step * i as f64)
    }

    pub fn bandwidth(&self) -> f64 {
        self.step
    }
}

/// One axis tick: band position of the value plus its label.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub offset: f64,
    pub label: String,
}

/// Everything the renderer needs to place and color cells.
#[derive(Clone, Debug)]
pub struct Scales {
    pub color: ColorScale,
    pub x: BandScale<i32>,
    pub y: BandScale<u32>,
    pub min_temp: f64,
    pub max_temp: f64,
}

impl Scales {
    /// Build all scales for a plot area of `width` × `height` pixels.
    ///
    /// Never fails: an empty dataset yields the degenerate color domain
    /// `[base, base]` and an empty year domain.
    pub fn build(data: &Dataset, width: f64, height: f64) -> Self {
        let base = data.base_temperature;
        let (min_temp, max_temp) = temperature_extent(data).unwrap_or((base, base));
        let x = BandScale::new(data.monthly_variance.iter().map(|r| r.year), (0.0, width));
        // The vertical domain is the calendar, not the data.
        let y = BandScale::new(0..12u32, (0.0, height));
        Self {
            color: ColorScale::new(min_temp, max_temp),
            x,
            y,
            min_temp,
            max_temp,
        }
    }

    /// Years divisible by ten, labelled as plain integers.
    pub fn x_ticks(&self) -> Vec<Tick> {
        self.x
            .domain()
            .iter()
            .filter(|y| *y % 10 == 0)
            .filter_map(|&y| {
                self.x.position(y).map(|offset| Tick {
                    offset,
                    label: y.to_string(),
                })
            })
            .collect()
    }

    /// All twelve months, January first, labelled with full names.
    pub fn y_ticks(&self) -> Vec<Tick> {
        self.y
            .domain()
            .iter()
            .filter_map(|&m| {
                self.y.position(m).map(|offset| Tick {
                    offset,
                    label: month_name(m).to_string(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VarianceRecord;

    #[test]
    fn palette_hex() {
        assert_eq!(PALETTE[0].to_string(), "#053061");
        assert_eq!(PALETTE[8].to_string(), "#b2182b");
    }

    #[test]
    fn quantize_buckets_and_boundaries() {
        let s = ColorScale::new(0.0, 9.0);
        assert_eq!(s.index(0.0), 0);
        assert_eq!(s.index(0.99), 0);
        assert_eq!(s.index(1.0), 1);
        assert_eq!(s.index(4.5), 4);
        assert_eq!(s.index(9.0), 8);
        assert_eq!(s.index(-5.0), 0);
        assert_eq!(s.index(50.0), 8);
        assert_eq!(s.index(f64::NAN), 0);
        assert_eq!(s.color(8.5), PALETTE[8]);
    }

    #[test]
    fn quantize_is_monotonic() {
        let s = ColorScale::new(1.684, 13.888);
        let mut prev = 0;
        for i in 0..=2000 {
            let v = 1.0 + i as f64 * 0.0075;
            let idx = s.index(v);
            assert!(idx >= prev, "bucket went down at {v}");
            prev = idx;
        }
        assert_eq!(prev, 8);
    }

    #[test]
    fn degenerate_domain_uses_middle_bucket() {
        let s = ColorScale::new(5.0, 5.0);
        assert_eq!(s.index(5.0), 4);
        assert_eq!(s.index(-100.0), 4);
    }

    #[test]
    fn invert_extent_covers_domain() {
        let s = ColorScale::new(0.0, 9.0);
        assert_eq!(s.invert_extent(0), Some((0.0, 1.0)));
        assert_eq!(s.invert_extent(8), Some((8.0, 9.0)));
        assert_eq!(s.invert_extent(9), None);
    }

    #[test]
    fn band_scale_dedups_and_splits_evenly() {
        let b = BandScale::new([1900, 1900, 1901, 1902, 1901], (0.0, 300.0));
        assert_eq!(b.domain(), &[1900, 1901, 1902]);
        assert_eq!(b.bandwidth(), 100.0);
        assert_eq!(b.position(1902), Some(200.0));
        assert_eq!(b.position(1999), None);
    }

    #[test]
    fn empty_dataset_builds_degenerate_scales() {
        let d = Dataset {
            base_temperature: 8.66,
            monthly_variance: vec![],
        };
        let s = Scales::build(&d, 1080.0, 540.0);
        assert_eq!(s.color.domain(), (8.66, 8.66));
        assert!(s.x.domain().is_empty());
        assert!(s.x_ticks().is_empty());
        assert_eq!(s.y_ticks().len(), 12);
    }

    #[test]
    fn ticks_follow_policy() {
        let recs = (1895..=1921).flat_map(|year| {
            (1..=12).map(move |month| VarianceRecord {
                year,
                month,
                variance: 0.0,
            })
        });
        let d = Dataset {
            base_temperature: 8.0,
            monthly_variance: recs.collect(),
        };
        let s = Scales::build(&d, 1080.0, 540.0);
        let labels: Vec<String> = s.x_ticks().into_iter().map(|t| t.label).collect();
        assert_eq!(labels, vec!["1900", "1910", "1920"]);
        let months: Vec<String> = s.y_ticks().into_iter().map(|t| t.label).collect();
        assert_eq!(months.first().map(String::as_str), Some("January"));
        assert_eq!(months.last().map(String::as_str), Some("December"));
        assert_eq!(s.y.bandwidth(), 45.0);
    }
}
