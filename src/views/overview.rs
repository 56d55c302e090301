use serde::Serialize;
use crate::core::timeseries::{SeriesRule, DEFAULT_DOMAIN_PADDING};
use crate::models::Series;
use crate::payload::DashboardResponse;
use super::{payload_or_empty, PageHeader};

#[derive(Debug, Clone, Serialize)]
pub struct OverviewView {
    pub header: PageHeader,
    pub cumulative_pnl: Series,
    pub net_worth: Series,
    /// Tight y-axis range for the net worth chart.
    pub net_worth_domain: Option<(f64, f64)>,
}

pub fn build_overview(response: &DashboardResponse) -> OverviewView {
    let payload = payload_or_empty(response);

    let cumulative_pnl =
        SeriesRule::new("date", "cumulative_pnl").apply(&payload.equity_curve.rows);
    let net_worth = SeriesRule::new("date_utc", "networth_usd").apply(&payload.net_worth.rows);
    let net_worth_domain = net_worth.padded_domain(DEFAULT_DOMAIN_PADDING);

    OverviewView {
        header: PageHeader::from_response(
            "Command Center",
            response,
            Some("System overview and capital trajectory."),
        ),
        cumulative_pnl,
        net_worth,
        net_worth_domain,
    }
}
