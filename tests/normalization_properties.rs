use chrono::{Duration, NaiveDate};
use serde_json::{json, Value};
use trading_dashboard_lib::core::coerce::to_number;
use trading_dashboard_lib::core::kpi::{classify, latest_valid, normalize_percent_like, IntentRule};
use trading_dashboard_lib::core::timeseries::{build_series, DEFAULT_WINDOW};
use trading_dashboard_lib::models::{DatedPoint, Intent, RawRow, Series};

fn rows(values: Value) -> Vec<RawRow> {
    values
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_object().unwrap().clone())
        .collect()
}

/// Feed a built series back in as rows with `date` / `value` fields.
fn as_rows(series: &Series) -> Vec<RawRow> {
    series
        .iter()
        .map(|p| serde_json::to_value(p).unwrap().as_object().unwrap().clone())
        .collect()
}

fn daily_rows(start: NaiveDate, days: i64) -> Vec<RawRow> {
    (0..days)
        .map(|i| {
            let date = start + Duration::days(i);
            json!({ "date": date.format("%Y-%m-%d").to_string(), "value": i })
                .as_object()
                .unwrap()
                .clone()
        })
        .collect()
}

fn messy_rows() -> Vec<RawRow> {
    rows(json!([
        { "date": "2024-03-02", "value": "$2,000" },
        { "date": "2024-03-01T15:00:00Z", "value": "1,500.25" },
        { "date": "2024-03-03", "value": "" },
        { "date": "2024-03-01T09:00:00Z", "value": 1400 },
        { "date": "nope", "value": 3 },
        { "date": "2024-03-04", "value": "-12.5%" },
        { "date": "2024-03-02", "value": 2100 },
    ]))
}

#[test]
fn test_rebuild_is_idempotent() {
    let once = build_series(&messy_rows(), "date", "value", DEFAULT_WINDOW);
    let twice = build_series(&as_rows(&once), "date", "value", DEFAULT_WINDOW);
    assert_eq!(once, twice);
}

#[test]
fn test_rebuild_is_idempotent_when_window_trims() {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let once = build_series(&daily_rows(start, 400), "date", "value", DEFAULT_WINDOW);
    assert_eq!(once.len(), DEFAULT_WINDOW);

    let twice = build_series(&as_rows(&once), "date", "value", DEFAULT_WINDOW);
    assert_eq!(once, twice);
}

#[test]
fn test_deterministic() {
    let a = build_series(&messy_rows(), "date", "value", DEFAULT_WINDOW);
    let b = build_series(&messy_rows(), "date", "value", DEFAULT_WINDOW);
    assert_eq!(a, b);
}

#[test]
fn test_unique_days_in_order() {
    let series = build_series(&messy_rows(), "date", "value", DEFAULT_WINDOW);
    let dates: Vec<NaiveDate> = series.iter().map(|p| p.date).collect();
    assert!(dates.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(dates.len(), 3);
}

#[test]
fn test_last_write_wins() {
    let series = build_series(&messy_rows(), "date", "value", DEFAULT_WINDOW);
    let values: Vec<f64> = series.iter().map(|p| p.value).collect();
    // 03-01: 15:00 beats 09:00 despite input order. 03-02: later row wins.
    assert_eq!(values, vec![1500.25, 2100.0, -12.5]);
}

#[test]
fn test_out_of_order_input() {
    let input = rows(json!([
        { "date": "2024-01-03", "value": 3 },
        { "date": "2024-01-01", "value": 1 },
        { "date": "2024-01-02", "value": 2 },
        { "date": "2024-01-01", "value": 10 },
    ]));

    let series = build_series(&input, "date", "value", DEFAULT_WINDOW);
    let day = |d: u32| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
    assert_eq!(
        series.points(),
        &[
            DatedPoint { date: day(1), value: 10.0 },
            DatedPoint { date: day(2), value: 2.0 },
            DatedPoint { date: day(3), value: 3.0 },
        ]
    );
}

#[test]
fn test_window_keeps_trailing_days() {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let series = build_series(&daily_rows(start, 400), "date", "value", DEFAULT_WINDOW);

    assert_eq!(series.len(), 365);
    assert_eq!(series.points()[0].date, start + Duration::days(35));
    assert_eq!(series.latest().unwrap().date, start + Duration::days(399));
    assert_eq!(series.latest().unwrap().value, 399.0);
}

#[test]
fn test_numeric_salvage() {
    assert_eq!(to_number(&json!("$1,234.50")), Some(1234.5));
    assert_eq!(to_number(&json!("12%")), Some(12.0));
    assert_eq!(to_number(&json!("")), None);
    assert_eq!(to_number(&json!("abc")), None);
}

#[test]
fn test_percent_boundaries() {
    assert!((normalize_percent_like(0.19) - 19.0).abs() < 1e-9);
    assert_eq!(normalize_percent_like(19.0), 19.0);
    assert_eq!(normalize_percent_like(1.5), 150.0);
    assert_eq!(normalize_percent_like(1.6), 1.6);
}

#[test]
fn test_higher_better_boundaries() {
    let rule = IntentRule::HigherBetter { good_gte: Some(1.2), bad_lte: Some(1.0) };
    assert_eq!(classify(Some(1.2), &rule), Intent::Good);
    assert_eq!(classify(Some(1.0), &rule), Intent::Bad);
    assert_eq!(classify(Some(1.1), &rule), Intent::Neutral);
    assert_eq!(classify(None, &rule), Intent::Neutral);
}

#[test]
fn test_latest_valid_reverse_scan() {
    let input = rows(json!([{ "x": 5 }, { "x": "" }, { "x": null }]));
    assert_eq!(latest_valid(&input, "x"), Some(5.0));
}

#[test]
fn test_empty_input() {
    assert!(build_series(&[], "date", "value", DEFAULT_WINDOW).is_empty());
    assert_eq!(latest_valid(&[], "x"), None);
}
