use std::path::PathBuf;

use contracts::dashboards::d410_commission_report::CommissionReportRequest;
use contracts::dashboards::d411_top_distributors::TopDistributorsRequest;
use referral_reports::dashboards::d410_commission_report::service as commission_report;
use referral_reports::dashboards::d411_top_distributors::service as top_distributors;
use referral_reports::shared::config;
use referral_reports::shared::data::Dataset;
use referral_reports::system;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;

    // Optional path to a config file as the first argument
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = config::load_config(config_path.as_deref())?;

    let dataset_path = config::get_dataset_path(&config);
    let dataset = Dataset::load(&dataset_path)?;

    let started = std::time::Instant::now();

    let commission = commission_report::get_commission_report(
        &dataset,
        CommissionReportRequest {
            per_page: Some(config.reports.commission_per_page),
            ..Default::default()
        },
    )
    .await?;

    let leaderboard = top_distributors::get_top_distributors(
        &dataset,
        TopDistributorsRequest {
            limit: Some(config.reports.top_distributors_limit),
            page: None,
            per_page: Some(config.reports.top_distributors_per_page),
        },
    )
    .await?;

    tracing::info!("Reports built in {}ms", started.elapsed().as_millis());

    let output = serde_json::json!({
        "commission_report": commission,
        "top_distributors": leaderboard,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
