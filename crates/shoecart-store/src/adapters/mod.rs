//! Concrete implementations of the [`crate::ports`] traits.

mod http_stock;
mod notifier;
mod storage;

pub use http_stock::HttpStockService;
pub use notifier::{ChannelNotifier, TracingNotifier};
pub use storage::{FileStorage, MemoryStorage};
