use once_cell::sync::Lazy;
use serde::Serialize;
use crate::core::format::FormatOptions;
use crate::core::kpi::{IntentRule, KpiSpec, PercentUnit};
use crate::core::timeseries::SeriesRule;
use crate::models::Series;
use crate::payload::DashboardResponse;
use super::{payload_or_empty, LabeledKpi, PageHeader};

pub static CUMULATIVE_PNL: Lazy<KpiSpec> = Lazy::new(|| KpiSpec {
    label: "Cumulative PnL (latest)",
    field: "cumulative_pnl_latest",
    format: FormatOptions::currency(0),
    rule: Some(IntentRule::PosNeg),
    unit: None,
});

pub static DRAWDOWN: Lazy<KpiSpec> = Lazy::new(|| KpiSpec {
    label: "Drawdown (latest)",
    field: "drawdown_latest",
    format: FormatOptions::currency(0),
    rule: Some(IntentRule::PosNeg),
    unit: None,
});

pub static PROFIT_FACTOR_30D: Lazy<KpiSpec> = Lazy::new(|| KpiSpec {
    label: "PF (30d)",
    field: "pf30d_latest",
    format: FormatOptions::number(2),
    rule: Some(IntentRule::HigherBetter { good_gte: Some(1.2), bad_lte: Some(1.0) }),
    unit: None,
});

/// Read from the risk-state rows rather than the KPI snapshot.
pub static WIN_RATE_30D: Lazy<KpiSpec> = Lazy::new(|| KpiSpec {
    label: "Win Rate (30d)",
    field: "Win Rate (30d)",
    format: FormatOptions::number(0).with_suffix("%"),
    rule: Some(IntentRule::HigherBetter { good_gte: Some(55.0), bad_lte: Some(45.0) }),
    unit: Some(PercentUnit::Ambiguous),
});

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceView {
    pub header: PageHeader,
    pub kpis: Vec<LabeledKpi>,
    pub cumulative_net_30d: Series,
    pub rolling_win_rate_30d: Series,
    /// Bar chart; negative bars are losses.
    pub avg_net_trade_30d: Series,
    pub drawdown: Series,
}

pub fn build_performance(response: &DashboardResponse) -> PerformanceView {
    let payload = payload_or_empty(response);

    let scalar = |spec: &KpiSpec| LabeledKpi {
        label: spec.label,
        value: spec.from_scalar(payload.kpi(spec.field)),
    };

    let kpis = vec![
        scalar(&*CUMULATIVE_PNL),
        scalar(&*DRAWDOWN),
        scalar(&*PROFIT_FACTOR_30D),
        LabeledKpi {
            label: WIN_RATE_30D.label,
            value: WIN_RATE_30D.from_rows(&payload.risk_state.rows),
        },
    ];

    let pf_rows = &payload.profit_factor.rows;

    PerformanceView {
        header: PageHeader::from_response("Performance Summary", response, None),
        kpis,
        cumulative_net_30d: SeriesRule::new("Date", "cum_net_30d").apply(pf_rows),
        rolling_win_rate_30d: SeriesRule::new("date", "value")
            .apply(&payload.rolling_win_rate_30d.rows),
        avg_net_trade_30d: SeriesRule::new("Date", "avg_net_trade_30d").apply(pf_rows),
        drawdown: SeriesRule::new("date", "drawdown").apply(&payload.equity_curve.rows),
    }
}
