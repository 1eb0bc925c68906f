pub mod types;

pub use types::{ExecutionConfigJson, FeeConfigJson, ModelParamsJson, PredictorConfigJson};
