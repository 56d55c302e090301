use serde::{Deserialize, Serialize};
use chrono::NaiveDate;

/// One untyped record from the upstream sheet. Only `core::coerce` reads its fields.
pub type RawRow = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct DatedPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Date-ordered, one point per day, trailing-windowed.
/// Only `core::timeseries` constructs non-empty series.
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct Series(pub(crate) Vec<DatedPoint>);

impl Series {
    pub fn points(&self) -> &[DatedPoint] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DatedPoint> {
        self.0.iter()
    }

    pub fn latest(&self) -> Option<&DatedPoint> {
        self.0.last()
    }

    pub fn into_points(self) -> Vec<DatedPoint> {
        self.0
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a DatedPoint;
    type IntoIter = std::slice::Iter<'a, DatedPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Two series joined on the days both of them cover.
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct PairedPoint {
    pub date: NaiveDate,
    pub left: f64,
    pub right: f64,
}

/// A primary value plus optional companion lines drawn on the same chart.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct BandedPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub bands: Vec<Option<f64>>,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Good,
    Bad,
    #[default]
    Neutral,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct KpiValue {
    pub raw: Option<f64>,
    pub display: String,
    pub intent: Intent,
}
