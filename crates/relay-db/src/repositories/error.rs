//! Error handling utilities for repositories

use relay_core::error::DomainError;
use sqlx::Error as SqlxError;
use uuid::Uuid;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Map a reaction insert failure: the (message, user) uniqueness constraint
/// surfaces as a conflict, a broken message reference as "not found".
pub fn map_reaction_insert_error(e: SqlxError, message_id: Uuid) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return DomainError::ReactionAlreadyExists;
        }
        if db_err.is_foreign_key_violation() {
            return DomainError::MessageNotFound(message_id);
        }
    }
    DomainError::DatabaseError(e.to_string())
}
