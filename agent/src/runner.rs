//! Cost monitor: one subscription from socket to cost report
//!
//! ```text
//! FeedConnection ──▶ run_ingestion ──▶ SnapshotSubscriber ──▶ CostModel ──▶ CostReport
//!    (task)             (task)             (caller task)
//! ```

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{error, info};

use execution::{CostBreakdown, CostEstimator, CostPredictor, FeeRates};
use gateway::{
    FeedConnection, FeedTermination, FeedTransport, IngestionConfig, IngestionPipeline,
    ShutdownListener, WsTransport, run_ingestion, snapshot_channel,
};
use trading_core::{MarketSnapshot, Timestamp};

use crate::config::AgentConfig;
use crate::error::{AgentError, ConfigError};

/// Top of book at the time of a report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketSummary {
    pub best_bid: Decimal,
    pub best_ask: Decimal,
    pub spread: Decimal,
    /// Size at the best bid
    pub volume: Decimal,
}

impl MarketSummary {
    /// `None` unless both sides are present
    pub fn from_snapshot(snapshot: &MarketSnapshot) -> Option<Self> {
        let bid = snapshot.best_bid()?;
        let ask = snapshot.best_ask()?;
        Some(MarketSummary {
            best_bid: bid.price,
            best_ask: ask.price,
            spread: snapshot.spread()?,
            volume: bid.size,
        })
    }
}

/// One cost report per two-sided snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostReport {
    pub sequence: u64,
    pub timestamp: Timestamp,
    pub market: MarketSummary,
    pub cost: CostBreakdown,
}

impl fmt::Display for CostReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} bid {} ask {} spread {} vol {} | size {} slippage {:.6} fees {:.6} impact {:.6} net {:.6} | maker {:.2} latency {:?}",
            self.sequence,
            self.market.best_bid,
            self.market.best_ask,
            self.market.spread,
            self.market.volume,
            self.cost.trade_size,
            self.cost.slippage,
            self.cost.fees,
            self.cost.market_impact,
            self.cost.net_cost,
            self.cost.maker_proportion,
            self.cost.latency,
        )
    }
}

/// Cost side of the monitor: estimator, predictor, fee rates and trade size
pub struct CostModel {
    estimator: CostEstimator,
    predictor: Box<dyn CostPredictor>,
    fee_rates: FeeRates,
    trade_size: f64,
}

impl CostModel {
    pub fn new(
        estimator: CostEstimator,
        predictor: Box<dyn CostPredictor>,
        fee_rates: FeeRates,
        trade_size: f64,
    ) -> Self {
        CostModel {
            estimator,
            predictor,
            fee_rates,
            trade_size,
        }
    }

    pub fn from_config(config: &AgentConfig) -> Result<Self, ConfigError> {
        let execution = &config.execution;
        Ok(CostModel::new(
            execution.to_estimator(),
            execution.to_predictor(),
            execution.fee_rates()?,
            execution.trade_size,
        ))
    }

    pub fn trade_size(&self) -> f64 {
        self.trade_size
    }

    pub fn fee_rates(&self) -> &FeeRates {
        &self.fee_rates
    }

    /// Cost report for `snapshot`; `None` while a side of the book is empty
    pub fn evaluate(&mut self, snapshot: &MarketSnapshot) -> Option<CostReport> {
        let cost = self.estimator.estimate_cost(
            snapshot,
            self.trade_size,
            &self.fee_rates,
            self.predictor.as_ref(),
        )?;
        let market = MarketSummary::from_snapshot(snapshot)?;

        Some(CostReport {
            sequence: snapshot.sequence,
            timestamp: snapshot.timestamp,
            market,
            cost,
        })
    }
}

/// Owns one subscription end to end
///
/// Generic over the transport:
/// - `T`: FeedTransport - WebSocket in production, scripted in tests
pub struct CostMonitor<T: FeedTransport = WsTransport> {
    connection: FeedConnection<T>,
    ingestion: IngestionConfig,
    snapshot_buffer: usize,
    model: CostModel,
}

impl CostMonitor<WsTransport> {
    /// Monitor over a WebSocket transport; validates `config` first
    pub fn from_config(config: &AgentConfig) -> Result<Self, ConfigError> {
        Self::with_transport(WsTransport::new(), config)
    }
}

impl<T: FeedTransport> CostMonitor<T> {
    /// Monitor over any transport; validates `config` first
    pub fn with_transport(transport: T, config: &AgentConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(CostMonitor {
            connection: FeedConnection::new(transport, config.feed_config()),
            ingestion: config.ingestion.to_ingestion_config(),
            snapshot_buffer: config.feed.snapshot_buffer,
            model: CostModel::from_config(config)?,
        })
    }

    pub fn model(&self) -> &CostModel {
        &self.model
    }

    /// Run until the feed terminates, handing every report to `on_report`
    ///
    /// Returns the clean termination (shutdown or closed feed). Exhausted
    /// reconnects surface as [`AgentError::IngestionExhausted`], a panicked
    /// feed or ingestion task as [`AgentError::IngestionFailed`].
    pub async fn run<F>(
        self,
        shutdown: ShutdownListener,
        mut on_report: F,
    ) -> Result<FeedTermination, AgentError>
    where
        F: FnMut(CostReport),
    {
        let CostMonitor {
            connection,
            ingestion,
            snapshot_buffer,
            mut model,
        } = self;

        info!(
            endpoint = %connection.config().endpoint,
            trade_size = model.trade_size(),
            "Starting cost monitor"
        );

        let (publisher, mut subscriber) = snapshot_channel(snapshot_buffer);
        let feed = connection.connect_and_stream(shutdown);
        let pipeline = IngestionPipeline::new(ingestion);
        let ingestion_task = tokio::spawn(run_ingestion(feed, pipeline, publisher));

        let mut reports = 0u64;
        while let Some(snapshot) = subscriber.recv().await {
            if let Some(report) = model.evaluate(&snapshot) {
                reports += 1;
                on_report(report);
            }
        }

        let termination = match ingestion_task.await {
            Ok(termination) => termination,
            Err(e) => {
                error!(error = %e, panicked = e.is_panic(), reports, "Ingestion task failed");
                return Err(AgentError::IngestionFailed(e.to_string()));
            }
        };

        match termination {
            FeedTermination::Exhausted { attempts } => {
                error!(attempts, reports, "Feed ingestion exhausted");
                Err(AgentError::IngestionExhausted { attempts })
            }
            FeedTermination::Failed => {
                error!(reports, "Feed task failed");
                Err(AgentError::IngestionFailed("feed task failed".to_string()))
            }
            other => {
                info!(termination = ?other, reports, "Cost monitor stopped");
                Ok(other)
            }
        }
    }
}
