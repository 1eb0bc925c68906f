//! Message Types
//!
//! Values passed between the ingestion loop and the cost model.

mod market_data;

pub use market_data::MarketSnapshot;
