use serde::Serialize;
use serde_json::Value;
use crate::models::RawRow;
use crate::payload::{DashboardResponse, RowTable};
use super::{payload_or_empty, PageHeader};

pub const PREVIEW_ROWS: usize = 10;

/// Header line of the raw grid plus the first keyed rows.
#[derive(Debug, Clone, Serialize)]
pub struct TablePreview {
    pub title: &'static str,
    /// `raw[0]` untouched, or `null` when the grid is empty.
    pub headers: Value,
    pub rows: Vec<RawRow>,
}

impl TablePreview {
    pub fn from_table(title: &'static str, table: &RowTable) -> Self {
        Self {
            title,
            headers: table.raw.first().cloned().unwrap_or(Value::Null),
            rows: table.rows.iter().take(PREVIEW_ROWS).cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsView {
    pub header: PageHeader,
    pub risk_state: TablePreview,
    pub profit_factor: TablePreview,
}

pub fn build_metrics(response: &DashboardResponse) -> MetricsView {
    let payload = payload_or_empty(response);

    MetricsView {
        header: PageHeader::from_response("Metrics", response, None),
        risk_state: TablePreview::from_table("riskState", &payload.risk_state),
        profit_factor: TablePreview::from_table("profitFactor", &payload.profit_factor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_preview_truncates() {
        let rows: Vec<Value> = (0..15)
            .map(|i| json!({ "date": format!("2024-01-{:02}", i + 1) }))
            .collect();
        let response = DashboardResponse::from_value(json!({
            "ok": true,
            "riskState": { "rows": rows, "raw": [["date", "equity_usd"], ["2024-01-01", "10000"]] }
        }));

        let view = build_metrics(&response);
        assert_eq!(view.risk_state.headers, json!(["date", "equity_usd"]));
        assert_eq!(view.risk_state.rows.len(), PREVIEW_ROWS);
        assert_eq!(view.risk_state.rows[0].get("date"), Some(&json!("2024-01-01")));

        assert_eq!(view.profit_factor.headers, Value::Null);
        assert!(view.profit_factor.rows.is_empty());
    }
}
