mod side;

pub use side::Side;

pub type Timestamp = chrono::DateTime<chrono::Utc>;
