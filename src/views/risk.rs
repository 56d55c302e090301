use once_cell::sync::Lazy;
use serde::Serialize;
use crate::core::format::FormatOptions;
use crate::core::kpi::{latest_raw, IntentRule, KpiSpec, PercentUnit};
use crate::core::timeseries::{
    build_banded_series, build_series, join_series, scatter_points, SeriesRule, DEFAULT_WINDOW,
};
use crate::models::{BandedPoint, PairedPoint, ScatterPoint, Series};
use crate::payload::DashboardResponse;
use super::{payload_or_empty, LabeledKpi, PageHeader};

/// Risk-cut band columns drawn under the equity curve, tightest first.
pub const RISK_BANDS: [&str; 3] = ["band_-3%", "band_-4.5%", "band_-5.25%"];

pub static DRAWDOWN_PCT: Lazy<KpiSpec> = Lazy::new(|| KpiSpec {
    label: "Drawdown %",
    field: "drawdown_pct",
    format: FormatOptions::number(2).with_suffix("%"),
    rule: Some(IntentRule::AbsBands { good_abs_lt: 3.0, bad_abs_gte: 4.5 }),
    unit: Some(PercentUnit::Ambiguous),
});

pub static PEAK_EQUITY: Lazy<KpiSpec> = Lazy::new(|| KpiSpec {
    label: "Peak Equity",
    field: "peak_equity_latest",
    format: FormatOptions::number(2),
    rule: None,
    unit: None,
});

#[derive(Debug, Clone, Serialize)]
pub struct RiskView {
    pub header: PageHeader,
    pub drawdown_pct: LabeledKpi,
    /// Latest drawdown as the sheet formatted it, for the card tooltip.
    pub drawdown_pct_text: Option<String>,
    pub peak_equity: LabeledKpi,
    /// `bands[i]` of each point is `RISK_BANDS[i]`.
    pub equity_with_bands: Vec<BandedPoint>,
    pub risk_pct: Series,
    pub recovery_pct: Series,
    pub loss_streak: Series,
    /// `left` is edge, `right` is exposure.
    pub edge_vs_exposure: Vec<PairedPoint>,
    /// `x` is expectancy, `y` is risk %.
    pub expectancy_vs_risk: Vec<ScatterPoint>,
}

pub fn build_risk(response: &DashboardResponse) -> RiskView {
    let payload = payload_or_empty(response);
    let rs_rows = &payload.risk_state.rows;

    // Join first, window after, so the window counts shared days only.
    let pairs = &payload.edge_exposure_rolling;
    let edge = build_series(&pairs.edge, "date", "value", usize::MAX);
    let exposure = build_series(&pairs.exposure, "date", "value", usize::MAX);

    RiskView {
        header: PageHeader::from_response("Risk State", response, None),
        drawdown_pct: LabeledKpi {
            label: DRAWDOWN_PCT.label,
            value: DRAWDOWN_PCT.from_rows(rs_rows),
        },
        drawdown_pct_text: latest_raw(rs_rows, DRAWDOWN_PCT.field),
        peak_equity: LabeledKpi {
            label: PEAK_EQUITY.label,
            value: PEAK_EQUITY.from_scalar(payload.kpi(PEAK_EQUITY.field)),
        },
        equity_with_bands: build_banded_series(
            rs_rows,
            "date",
            "equity_usd",
            &RISK_BANDS,
            DEFAULT_WINDOW,
        ),
        risk_pct: SeriesRule::new("date", "risk_pct").apply(rs_rows),
        recovery_pct: SeriesRule::new("date", "recovery_pct").apply(rs_rows),
        loss_streak: SeriesRule::new("date", "loss_streak").apply(rs_rows),
        edge_vs_exposure: join_series(&edge, &exposure, DEFAULT_WINDOW),
        expectancy_vs_risk: scatter_points(
            &payload.expectancy_risk_scatter.rows,
            "expectancy",
            "risk_pct",
        ),
    }
}
