//! Live order-book cost monitor
//!
//! Wires the market data gateway to the execution cost models:
//!
//! - **Config**: one JSON file covering feed, reconnect, ingestion and execution
//! - **Runner**: [`CostMonitor`] drives a single subscription and yields a
//!   [`CostReport`] per two-sided snapshot
//!
//! # Example Configuration
//!
//! ```json
//! {
//!   "feed": { "subscription": { "inst_id": "ETH-USDT-SWAP" } },
//!   "reconnect": { "max_retries": 5 },
//!   "execution": { "fees": { "tier": "Tier3" }, "trade_size": 25.0 }
//! }
//! ```
//!
//! Every field is optional; omitted ones take the embedded defaults.

pub mod config;
pub mod error;
pub mod runner;

pub use config::{AgentConfig, load_config, load_config_from_str, load_default_config};
pub use error::{AgentError, ConfigError};
pub use runner::{CostModel, CostMonitor, CostReport, MarketSummary};
