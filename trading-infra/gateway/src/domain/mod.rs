pub mod events;
pub mod feed_status;
pub mod order_book;
pub mod traits;

pub use events::{
    BookAction, BookMessage, BookUpdate, ControlEvent, ControlKind, FeedEvent, FeedMessage,
    SubscriptionArg, SubscriptionRequest,
};
pub use feed_status::{ConnectionLoss, FeedTermination};
pub use order_book::OrderBook;
pub use traits::{BookStore, DepthReader, FeedSession, FeedTransport, OrderBookWriter};
