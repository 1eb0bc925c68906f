pub mod entities;
pub mod messages;
pub mod stats;
pub mod value_objects;

// Re-export value objects at crate root for convenience
pub use value_objects::{Side, Timestamp};

// Re-export entities at crate root
pub use entities::PriceLevel;

// Re-export messages at crate root
pub use messages::MarketSnapshot;

// Re-export stats at crate root
pub use stats::{LatencyStats, LatencyWindow, ProcessingTimer};
