use crate::core::coerce::{is_blank, raw_text, to_number};
use crate::core::format::{format_display, FormatOptions};
use crate::models::{Intent, KpiValue, RawRow};
use serde_json::Value;

/// Above this magnitude a stored figure is read as an already-scaled percent.
pub const FRACTION_THRESHOLD: f64 = 1.5;

// =============================================================================
// LATEST-VALUE LOOKUPS
// Sheets append rows, and today's row is often still half empty, so both
// lookups scan from the end and skip blanks.
// =============================================================================

/// Most recent row whose `field` is non-blank and parses to a finite number.
pub fn latest_valid(rows: &[RawRow], field: &str) -> Option<f64> {
    rows.iter().rev().find_map(|row| {
        let value = row.get(field);
        if is_blank(value) {
            return None;
        }
        value.and_then(to_number)
    })
}

/// Most recent non-blank `field`, as the sheet wrote it.
pub fn latest_raw(rows: &[RawRow], field: &str) -> Option<String> {
    rows.iter().rev().find_map(|row| raw_text(row.get(field)))
}

// =============================================================================
// INTENT CLASSIFICATION
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntentRule {
    /// Positive is good, negative is bad, zero is neutral.
    PosNeg,
    /// `>= good_gte` is good, `<= bad_lte` is bad. A missing bound never fires.
    HigherBetter {
        good_gte: Option<f64>,
        bad_lte: Option<f64>,
    },
    /// Severity by magnitude: `|v| >= bad_abs_gte` is bad, `|v| < good_abs_lt` is good.
    AbsBands { good_abs_lt: f64, bad_abs_gte: f64 },
}

/// Never fails: an unparseable value is `Neutral`.
pub fn classify(value: Option<f64>, rule: &IntentRule) -> Intent {
    let Some(n) = value.filter(|v| v.is_finite()) else {
        return Intent::Neutral;
    };

    match *rule {
        IntentRule::PosNeg => {
            if n > 0.0 {
                Intent::Good
            } else if n < 0.0 {
                Intent::Bad
            } else {
                Intent::Neutral
            }
        }
        IntentRule::HigherBetter { good_gte, bad_lte } => {
            if good_gte.is_some_and(|g| n >= g) {
                Intent::Good
            } else if bad_lte.is_some_and(|b| n <= b) {
                Intent::Bad
            } else {
                Intent::Neutral
            }
        }
        IntentRule::AbsBands { good_abs_lt, bad_abs_gte } => {
            let magnitude = n.abs();
            if magnitude >= bad_abs_gte {
                Intent::Bad
            } else if magnitude < good_abs_lt {
                Intent::Good
            } else {
                Intent::Neutral
            }
        }
    }
}

// =============================================================================
// PERCENT UNITS
// =============================================================================

/// Fraction-or-percent guess: `|v| <= 1.5` is a fraction and gets scaled by 100.
///
/// This is a heuristic. A true 1% stored as `1` comes back as 100.
pub fn normalize_percent_like(value: f64) -> f64 {
    if value.abs() <= FRACTION_THRESHOLD {
        value * 100.0
    } else {
        value
    }
}

/// How a percent-like column is stored upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PercentUnit {
    /// 0.19 means 19%.
    Fraction,
    /// 19 means 19%.
    Percent,
    /// Unknown; fall back to `normalize_percent_like`.
    #[default]
    Ambiguous,
}

impl PercentUnit {
    pub fn to_percent(self, value: f64) -> f64 {
        match self {
            PercentUnit::Fraction => value * 100.0,
            PercentUnit::Percent => value,
            PercentUnit::Ambiguous => normalize_percent_like(value),
        }
    }
}

// =============================================================================
// KPI SPECS
// =============================================================================

/// How one KPI card is computed: where the number lives, how it is shown and
/// which rule colours it.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiSpec {
    pub label: &'static str,
    pub field: &'static str,
    pub format: FormatOptions,
    /// `None` always yields `Intent::Neutral`.
    pub rule: Option<IntentRule>,
    /// When set, the value is converted to percent before classifying and display.
    pub unit: Option<PercentUnit>,
}

impl KpiSpec {
    /// Latest valid value of `field` across the rows.
    pub fn from_rows(&self, rows: &[RawRow]) -> KpiValue {
        self.evaluate(latest_valid(rows, self.field))
    }

    /// A precomputed snapshot scalar (e.g. `kpis.pf30d_latest`).
    pub fn from_scalar(&self, value: Option<&Value>) -> KpiValue {
        self.evaluate(value.and_then(to_number))
    }

    pub fn evaluate(&self, raw: Option<f64>) -> KpiValue {
        let shown = match self.unit {
            Some(unit) => raw.map(|v| unit.to_percent(v)),
            None => raw,
        };

        let intent = match &self.rule {
            Some(rule) => classify(shown, rule),
            None => Intent::Neutral,
        };

        KpiValue {
            raw,
            display: format_display(shown, &self.format),
            intent,
        }
    }
}
