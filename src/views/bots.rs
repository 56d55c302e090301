use serde::Serialize;
use serde_json::Value;
use crate::core::format::PLACEHOLDER;
use crate::payload::DashboardResponse;
use super::{payload_or_empty, PageHeader};

/// Rows rendered in the bots table; the rest are counted but not shown.
pub const MAX_BOT_ROWS: usize = 200;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BotRow {
    pub name: String,
    /// Rolling PF as the sheet wrote it.
    pub pf_30d: String,
    pub date: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BotsView {
    pub header: PageHeader,
    pub total_rows: usize,
    pub rows: Vec<BotRow>,
}

/// Cell text where only a missing or null cell counts as absent; `""` is kept.
fn cell_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

pub fn build_bots(response: &DashboardResponse) -> BotsView {
    let payload = payload_or_empty(response);
    let source = &payload.bots.rows;

    let rows = source
        .iter()
        .take(MAX_BOT_ROWS)
        .enumerate()
        .map(|(i, row)| BotRow {
            name: cell_text(row.get("bots")).unwrap_or_else(|| format!("Bot {}", i + 1)),
            pf_30d: cell_text(row.get("Rolling PF (30d)"))
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            date: cell_text(row.get("date")).unwrap_or_default(),
        })
        .collect();

    BotsView {
        header: PageHeader::from_response("Bots", response, None),
        total_rows: source.len(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bot_rows() {
        let response = DashboardResponse::from_value(json!({
            "ok": true,
            "bots": { "rows": [
                { "bots": "mean-revert-eu", "Rolling PF (30d)": "1.42", "date": "2024-05-31" },
                { "bots": "", "Rolling PF (30d)": 0.9 },
                { "bots": null, "date": "" }
            ]}
        }));

        let view = build_bots(&response);
        assert_eq!(view.total_rows, 3);
        assert_eq!(view.rows[0], BotRow {
            name: "mean-revert-eu".into(),
            pf_30d: "1.42".into(),
            date: "2024-05-31".into(),
        });

        // An empty name cell is kept as-is; only a missing or null one is defaulted.
        assert_eq!(view.rows[1].name, "");
        assert_eq!(view.rows[1].pf_30d, "0.9");
        assert_eq!(view.rows[1].date, "");

        assert_eq!(view.rows[2].name, "Bot 3");
        assert_eq!(view.rows[2].pf_30d, "—");
        assert_eq!(view.rows[2].date, "");
    }

    #[test]
    fn test_row_cap() {
        let rows: Vec<Value> = (0..250).map(|i| json!({ "bots": format!("b{}", i) })).collect();
        let response =
            DashboardResponse::from_value(json!({ "ok": true, "bots": { "rows": rows } }));

        let view = build_bots(&response);
        assert_eq!(view.total_rows, 250);
        assert_eq!(view.rows.len(), MAX_BOT_ROWS);
        assert_eq!(view.rows.last().unwrap().name, "b199");
    }
}
