//! Bounded message cache

mod message_cache;

pub use message_cache::MessageCache;
