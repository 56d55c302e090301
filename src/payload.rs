use crate::core::coerce::raw_text;
use crate::models::RawRow;
use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Message used when the upstream marks a response as failed without saying why.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Any shape mismatch decodes to the default instead of failing the whole payload.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Keeps the object entries of an array and skips everything else.
fn object_rows<'de, D>(deserializer: D) -> Result<Vec<RawRow>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let rows = match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(rows)
}

/// One sheet tab as the API ships it: keyed `rows`, plus the untouched grid in `raw`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RowTable {
    #[serde(deserialize_with = "object_rows")]
    pub rows: Vec<RawRow>,
    #[serde(deserialize_with = "lenient")]
    pub raw: Vec<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EdgeExposure {
    #[serde(deserialize_with = "object_rows")]
    pub edge: Vec<RawRow>,
    #[serde(deserialize_with = "object_rows")]
    pub exposure: Vec<RawRow>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Meta {
    #[serde(deserialize_with = "lenient")]
    pub generated_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardPayload {
    #[serde(deserialize_with = "lenient")]
    pub meta: Meta,
    #[serde(deserialize_with = "lenient")]
    pub equity_curve: RowTable,
    #[serde(deserialize_with = "lenient")]
    pub net_worth: RowTable,
    #[serde(deserialize_with = "lenient")]
    pub risk_state: RowTable,
    #[serde(deserialize_with = "lenient")]
    pub profit_factor: RowTable,
    #[serde(rename = "rollingWinRate30d", deserialize_with = "lenient")]
    pub rolling_win_rate_30d: RowTable,
    #[serde(deserialize_with = "lenient")]
    pub bots: RowTable,
    #[serde(deserialize_with = "lenient")]
    pub expectancy_risk_scatter: RowTable,
    #[serde(deserialize_with = "lenient")]
    pub edge_exposure_rolling: EdgeExposure,
    /// Precomputed scalar snapshots, e.g. `pf30d_latest`.
    #[serde(deserialize_with = "lenient")]
    pub kpis: serde_json::Map<String, Value>,
}

impl DashboardPayload {
    pub fn kpi(&self, name: &str) -> Option<&Value> {
        self.kpis.get(name)
    }
}

/// The upstream result after checking its `ok` discriminant.
#[derive(Debug, Clone)]
pub enum DashboardResponse {
    Ok(DashboardPayload),
    NotOk { message: String },
}

impl DashboardResponse {
    /// Only `"ok": true` yields a payload; anything else is not-ok with the
    /// upstream `error` text (or `UNKNOWN_ERROR`).
    pub fn from_value(value: Value) -> Self {
        if value.get("ok") != Some(&Value::Bool(true)) {
            let message = raw_text(value.get("error")).unwrap_or_else(|| UNKNOWN_ERROR.to_string());
            return DashboardResponse::NotOk { message };
        }

        match serde_json::from_value::<DashboardPayload>(value) {
            Ok(payload) => DashboardResponse::Ok(payload),
            Err(e) => DashboardResponse::NotOk {
                message: format!("Failed to decode dashboard payload: {}", e),
            },
        }
    }

    pub fn not_ok(message: impl Into<String>) -> Self {
        DashboardResponse::NotOk { message: message.into() }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, DashboardResponse::Ok(_))
    }

    pub fn payload(&self) -> Option<&DashboardPayload> {
        match self {
            DashboardResponse::Ok(payload) => Some(payload),
            DashboardResponse::NotOk { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            DashboardResponse::Ok(_) => None,
            DashboardResponse::NotOk { message } => Some(message),
        }
    }

    pub fn generated_at(&self) -> Option<&str> {
        self.payload()?.meta.generated_at.as_deref()
    }
}
