pub mod types;

pub use types::{FeedConfigJson, IngestionConfigJson, ReconnectConfigJson, SubscriptionConfigJson};
