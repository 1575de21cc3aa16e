//! PostgreSQL repository implementations

mod error;
mod message;
mod reaction;

pub use message::PgMessageRepository;
pub use reaction::PgReactionRepository;
