use trading_dashboard_lib::fetcher::{fetch_dashboard, sheets::SheetsFetcher};
use trading_dashboard_lib::models::Series;
use trading_dashboard_lib::payload::DashboardResponse;
use trading_dashboard_lib::views::{
    bots, overview, performance, preview, risk, LabeledKpi, PageHeader,
};

/// Usage: `inspect_payload [payload.json]`
///
/// With a path, the payload is read from disk. Without one, it is fetched
/// from `DASHBOARD_API_URL`.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let response = match std::env::args().nth(1) {
        Some(path) => {
            println!("🔍 Reading payload from {}", path);
            let text = std::fs::read_to_string(&path)?;
            DashboardResponse::from_value(serde_json::from_str(&text)?)
        }
        None => {
            let fetcher = SheetsFetcher::from_env()?;
            println!("🔍 Fetching dashboard payload...");
            fetch_dashboard(&fetcher).await
        }
    };

    if let Some(message) = response.error_message() {
        println!("❌ {}", message);
    }

    let view = overview::build_overview(&response);
    print_header(&view.header);
    print_series("cumulative_pnl", &view.cumulative_pnl);
    print_series("net_worth", &view.net_worth);
    if let Some((lo, hi)) = view.net_worth_domain {
        println!("  net worth domain: [{:.2}, {:.2}]", lo, hi);
    }

    let view = performance::build_performance(&response);
    print_header(&view.header);
    for kpi in &view.kpis {
        print_kpi(kpi);
    }
    print_series("cumulative_net_30d", &view.cumulative_net_30d);
    print_series("rolling_win_rate_30d", &view.rolling_win_rate_30d);
    print_series("avg_net_trade_30d", &view.avg_net_trade_30d);
    print_series("drawdown", &view.drawdown);

    let view = risk::build_risk(&response);
    print_header(&view.header);
    print_kpi(&view.drawdown_pct);
    print_kpi(&view.peak_equity);
    println!("  {:<22} | {:>5} pts", "equity_with_bands", view.equity_with_bands.len());
    print_series("risk_pct", &view.risk_pct);
    print_series("recovery_pct", &view.recovery_pct);
    print_series("loss_streak", &view.loss_streak);
    println!("  {:<22} | {:>5} pts", "edge_vs_exposure", view.edge_vs_exposure.len());
    println!("  {:<22} | {:>5} pts", "expectancy_vs_risk", view.expectancy_vs_risk.len());

    let view = bots::build_bots(&response);
    print_header(&view.header);
    println!("  showing {} of {} rows", view.rows.len(), view.total_rows);
    for row in view.rows.iter().take(5) {
        println!("  {:<22} | PF {:<8} | {}", row.name, row.pf_30d, row.date);
    }

    let view = preview::build_metrics(&response);
    print_header(&view.header);
    for table in [&view.risk_state, &view.profit_factor] {
        println!("  {:<22} | {} rows | headers {}", table.title, table.rows.len(), table.headers);
    }

    println!("\nDone.");
    Ok(())
}

fn print_header(header: &PageHeader) {
    println!("\n== {} ({:?}) ==", header.title, header.status);
    println!("  {}", header.subtitle);
}

fn print_kpi(kpi: &LabeledKpi) {
    println!("  {:<22} | {:>12} | {:?}", kpi.label, kpi.value.display, kpi.value.intent);
}

fn print_series(name: &str, series: &Series) {
    match (series.points().first(), series.latest()) {
        (Some(first), Some(last)) => println!(
            "  {:<22} | {:>5} pts | {} .. {} | latest {:.4}",
            name, series.len(), first.date, last.date, last.value
        ),
        _ => println!("  {:<22} | {:>5} pts", name, 0),
    }
}
