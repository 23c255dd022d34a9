use heatmap_rs::api::{load_dataset_file, parse_dataset};
use heatmap_rs::{Dataset, HeatmapError};

#[test]
fn parse_sample_json() {
    let sample = r#"
    {
      "baseTemperature": 8.66,
      "monthlyVariance": [
        { "year": 1753, "month": 1, "variance": -1.366 },
        { "year": 1753, "month": 2, "variance": -2.223 },
        { "year": 1753, "month": 3, "variance": 0.211 }
      ]
    }
    "#;

    let d: Dataset = parse_dataset(sample).unwrap();
    assert_eq!(d.base_temperature, 8.66);
    assert_eq!(d.monthly_variance.len(), 3);
    assert_eq!(d.monthly_variance[1].month, 2);
    assert_eq!(d.year_span(), Some((1753, 1753)));
    assert!(d.validate().is_ok());
}

#[test]
fn fixture_file_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/sample.json");
    let d = load_dataset_file(path).unwrap();
    assert_eq!(d.monthly_variance.len(), 48);
    assert_eq!(d.year_span(), Some((1908, 1911)));
}

#[test]
fn wrong_field_types_fail_to_parse() {
    let bad = r#"{"baseTemperature":"warm","monthlyVariance":[]}"#;
    assert!(parse_dataset(bad).is_err());
    let bad = r#"{"baseTemperature":8.0,"monthlyVariance":[{"year":1900,"month":1}]}"#;
    assert!(parse_dataset(bad).is_err());
}

#[test]
fn out_of_range_month_parses_but_fails_validation() {
    let d = parse_dataset(
        r#"{"baseTemperature":8.0,"monthlyVariance":[{"year":1900,"month":13,"variance":0.0}]}"#,
    )
    .unwrap();
    assert_eq!(
        d.validate(),
        Err(HeatmapError::MonthOutOfRange {
            index: 0,
            month: 13
        })
    );
}
