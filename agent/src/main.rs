use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use cost_agent::{CostMonitor, CostReport, load_config, load_default_config};
use gateway::shutdown_channel;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_LOG_DIRECTIVES: &str = "cost_agent=info,gateway=info,execution=info";

/// Live pre-trade cost monitor for a single order-book subscription
#[derive(Parser, Debug)]
#[command(name = "cost-agent", version, about)]
struct Cli {
    /// JSON configuration file (embedded defaults when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Trade size to cost on every snapshot
    #[arg(long)]
    trade_size: Option<f64>,

    /// Fee tier name, e.g. Tier1
    #[arg(long)]
    fee_tier: Option<String>,

    /// Emit each report as a JSON line on stdout
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_DIRECTIVES))?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => load_default_config().context("loading embedded config")?,
    };
    if let Some(trade_size) = cli.trade_size {
        config.execution.trade_size = trade_size;
    }
    if let Some(tier) = cli.fee_tier {
        config.execution.fees.tier = tier;
    }

    let monitor = CostMonitor::from_config(&config).context("invalid configuration")?;
    info!(
        instrument = %config.feed.subscription.inst_id,
        tier = %config.execution.fees.tier,
        "Cost agent configured"
    );

    let (shutdown, listener) = shutdown_channel();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            // Dropping the handle would stop the feed, so hold it
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
        info!("Ctrl-C received, shutting down");
        shutdown.trigger();
    });

    let json = cli.json;
    let termination = monitor
        .run(listener, move |report| emit(&report, json))
        .await?;

    info!(?termination, "Cost agent finished");
    Ok(())
}

fn emit(report: &CostReport, json: bool) {
    if !json {
        println!("{report}");
        return;
    }
    match serde_json::to_string(report) {
        Ok(line) => println!("{line}"),
        Err(e) => warn!(error = %e, sequence = report.sequence, "Failed to serialize report"),
    }
}
