use crate::core::coerce::{to_instant, to_number};
use crate::models::{BandedPoint, DatedPoint, PairedPoint, RawRow, ScatterPoint, Series};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

/// Trailing window applied to every chart series.
pub const DEFAULT_WINDOW: usize = 365;

/// Fraction of the value span added above and below a tight y-axis domain.
pub const DEFAULT_DOMAIN_PADDING: f64 = 0.08;

/// Declarative description of one chart series: which fields to read and how
/// many trailing days to keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesRule {
    pub date_field: String,
    pub value_field: String,
    pub window: usize,
}

impl SeriesRule {
    pub fn new(date_field: &str, value_field: &str) -> Self {
        Self {
            date_field: date_field.to_string(),
            value_field: value_field.to_string(),
            window: DEFAULT_WINDOW,
        }
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub fn apply(&self, rows: &[RawRow]) -> Series {
        build_series(rows, &self.date_field, &self.value_field, self.window)
    }
}

/// Turn raw rows into a clean per-day series.
///
/// 1. Rows with an unparseable date or value are dropped.
/// 2. Survivors are sorted by instant (stable, so input order breaks exact ties).
/// 3. One point per calendar day: the chronologically last row of the day wins.
/// 4. Only the trailing `window_size` days are kept.
pub fn build_series(
    rows: &[RawRow],
    date_field: &str,
    value_field: &str,
    window_size: usize,
) -> Series {
    let mut parsed: Vec<(NaiveDateTime, f64)> = rows
        .iter()
        .filter_map(|row| {
            let instant = row.get(date_field).and_then(to_instant)?;
            let value = row.get(value_field).and_then(to_number)?;
            Some((instant, value))
        })
        .collect();

    let dropped = rows.len() - parsed.len();
    if dropped > 0 {
        log::debug!(
            "build_series({}/{}): dropped {} of {} rows",
            date_field, value_field, dropped, rows.len()
        );
    }

    parsed.sort_by_key(|(instant, _)| *instant);

    let by_day: BTreeMap<NaiveDate, f64> = parsed
        .into_iter()
        .map(|(instant, value)| (instant.date(), value))
        .collect();

    let points: Vec<DatedPoint> = by_day
        .into_iter()
        .map(|(date, value)| DatedPoint { date, value })
        .collect();

    Series(trailing(points, window_size))
}

fn trailing<T>(mut items: Vec<T>, window: usize) -> Vec<T> {
    if items.len() > window {
        items.drain(..items.len() - window);
    }
    items
}

/// Joins two series on the days present in both, then keeps the trailing window.
pub fn join_series(left: &Series, right: &Series, window: usize) -> Vec<PairedPoint> {
    let right_by_day: BTreeMap<NaiveDate, f64> = right.iter().map(|p| (p.date, p.value)).collect();

    // Both inputs are already sorted and unique per day, so walking `left`
    // keeps the output ordered.
    let joined: Vec<PairedPoint> = left
        .iter()
        .filter_map(|p| {
            right_by_day.get(&p.date).map(|&r| PairedPoint {
                date: p.date,
                left: p.value,
                right: r,
            })
        })
        .collect();

    trailing(joined, window)
}

/// Like `build_series`, but each day also carries optional companion values
/// (`band_fields`, in order). A row needs a valid date and primary value to
/// survive; an unparseable band is kept as `None`. The whole record follows
/// last-write-wins per day.
pub fn build_banded_series(
    rows: &[RawRow],
    date_field: &str,
    value_field: &str,
    band_fields: &[&str],
    window: usize,
) -> Vec<BandedPoint> {
    let mut parsed: Vec<(NaiveDateTime, f64, Vec<Option<f64>>)> = rows
        .iter()
        .filter_map(|row| {
            let instant = row.get(date_field).and_then(to_instant)?;
            let value = row.get(value_field).and_then(to_number)?;
            let bands = band_fields
                .iter()
                .map(|field| row.get(*field).and_then(to_number))
                .collect();
            Some((instant, value, bands))
        })
        .collect();

    parsed.sort_by_key(|(instant, _, _)| *instant);

    let mut by_day: BTreeMap<NaiveDate, (f64, Vec<Option<f64>>)> = BTreeMap::new();
    for (instant, value, bands) in parsed {
        by_day.insert(instant.date(), (value, bands));
    }

    let points: Vec<BandedPoint> = by_day
        .into_iter()
        .map(|(date, (value, bands))| BandedPoint { date, value, bands })
        .collect();

    trailing(points, window)
}

/// Undated (x, y) pairs in input order. Rows with either coordinate invalid are dropped.
pub fn scatter_points(rows: &[RawRow], x_field: &str, y_field: &str) -> Vec<ScatterPoint> {
    rows.iter()
        .filter_map(|row| {
            let x = row.get(x_field).and_then(to_number)?;
            let y = row.get(y_field).and_then(to_number)?;
            Some(ScatterPoint { x, y })
        })
        .collect()
}

impl Series {
    /// Tight y-axis domain with padding so flat series do not render as a
    /// straight line glued to an axis. The span is floored at 1.
    pub fn padded_domain(&self, pad_ratio: f64) -> Option<(f64, f64)> {
        let first = self.0.first()?.value;
        let (min, max) = self
            .0
            .iter()
            .fold((first, first), |(lo, hi), p| (lo.min(p.value), hi.max(p.value)));

        let pad = (max - min).max(1.0) * pad_ratio;
        Some((min - pad, max + pad))
    }
}
