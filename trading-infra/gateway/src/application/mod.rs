pub mod config;
pub mod feed_connection;
pub mod ingestion;
pub mod reconnect;
pub mod shutdown;

pub use config::{FeedConfig, IngestionConfig, ReconnectConfig};
pub use feed_connection::{FeedConnection, FeedStream};
pub use ingestion::{IngestionPipeline, run_ingestion};
pub use reconnect::{ReconnectPolicy, RetryDecision};
pub use shutdown::{ShutdownHandle, ShutdownListener, shutdown_channel};
