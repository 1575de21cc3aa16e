//! Repository traits (ports) for the durable store

mod repositories;

pub use repositories::{MessageRepository, ReactionRepository, RepoResult};
