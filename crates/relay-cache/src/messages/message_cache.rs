//! Message cache storage in Redis.
//!
//! Keeps the newest messages in a fixed-size window: each message is a JSON
//! record under its own key, and a sorted set indexes the record keys by
//! creation timestamp. Inserting past capacity trims the oldest entries from
//! both structures.

use std::time::Duration;

use chrono::{DateTime, Utc};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use uuid::Uuid;

use relay_core::entities::{Message, ReactionCount};

use crate::pool::{CacheError, CacheResult, RedisPool};

/// Key prefix for message records
const MESSAGE_KEY_PREFIX: &str = "message:";
/// Key of the sorted set indexing record keys by creation time
const MESSAGE_INDEX_KEY: &str = "messages";

/// Default deadline for a single cache operation
const DEFAULT_OP_DEADLINE: Duration = Duration::from_millis(250);

/// Cached message record as stored in Redis
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedMessage {
    id: Uuid,
    text: String,
    user_id: String,
    created_at: DateTime<Utc>,
    #[serde(default)]
    reaction_counts: Vec<CachedReactionCount>,
}

/// Reaction aggregate as serialized inside the cached record
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedReactionCount {
    #[serde(rename = "type")]
    kind: String,
    count: i64,
}

impl From<&Message> for CachedMessage {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id,
            text: message.text.clone(),
            user_id: message.user_id.clone(),
            created_at: message.created_at,
            reaction_counts: message
                .reaction_counts
                .iter()
                .map(|c| CachedReactionCount {
                    kind: c.kind.clone(),
                    count: c.count,
                })
                .collect(),
        }
    }
}

impl From<CachedMessage> for Message {
    fn from(record: CachedMessage) -> Self {
        Message {
            id: record.id,
            text: record.text,
            user_id: record.user_id,
            created_at: record.created_at,
            reaction_counts: record
                .reaction_counts
                .into_iter()
                .map(|c| ReactionCount::new(c.kind, c.count))
                .collect(),
        }
    }
}

/// Bounded cache over the newest messages
#[derive(Clone)]
pub struct MessageCache {
    pool: RedisPool,
    capacity: usize,
    op_deadline: Duration,
}

impl MessageCache {
    /// Create a new message cache holding at most `capacity` entries
    #[must_use]
    pub fn new(pool: RedisPool, capacity: usize) -> Self {
        Self {
            pool,
            capacity,
            op_deadline: DEFAULT_OP_DEADLINE,
        }
    }

    /// Create a message cache from relay-common config
    #[must_use]
    pub fn from_config(pool: RedisPool, config: &relay_common::CacheConfig) -> Self {
        Self::new(pool, config.capacity).with_deadline(Duration::from_millis(config.op_timeout_ms))
    }

    /// Override the per-operation deadline
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.op_deadline = deadline;
        self
    }

    /// The configured capacity of the window
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Generate the Redis key for a message record
    fn message_key(id: Uuid) -> String {
        format!("{MESSAGE_KEY_PREFIX}{id}")
    }

    /// Index score for a message: creation time at nanosecond resolution.
    /// Equal scores fall back to the sorted set's lexicographic member
    /// ordering, which keeps the order total.
    fn score(created_at: DateTime<Utc>) -> f64 {
        created_at.timestamp_nanos_opt().unwrap_or(i64::MAX) as f64
    }

    /// Store a message and index it by creation time, then trim the window
    /// back to capacity.
    pub async fn insert(&self, message: &Message) -> CacheResult<()> {
        timeout(self.op_deadline, self.insert_inner(message))
            .await
            .map_err(|_| CacheError::Timeout)??;

        tracing::debug!(
            message_id = %message.id,
            capacity = self.capacity,
            "Cached message"
        );

        Ok(())
    }

    async fn insert_inner(&self, message: &Message) -> CacheResult<()> {
        let payload = serde_json::to_string(&CachedMessage::from(message))?;
        let key = Self::message_key(message.id);

        let mut conn = self.pool.get().await?;

        // Record and index entry land in one MULTI/EXEC unit so the two
        // views cannot diverge.
        redis::pipe()
            .atomic()
            .set(&key, payload)
            .ignore()
            .zadd(MESSAGE_INDEX_KEY, &key, Self::score(message.created_at))
            .ignore()
            .query_async::<()>(&mut conn)
            .await?;

        self.evict_oldest(&mut conn).await
    }

    /// Drop every entry beyond the newest `capacity` from both the index
    /// and the keyed records.
    async fn evict_oldest(&self, conn: &mut deadpool_redis::Connection) -> CacheResult<()> {
        let stale: Vec<String> = conn
            .zrange(MESSAGE_INDEX_KEY, 0, -(self.capacity as isize) - 1)
            .await?;

        if stale.is_empty() {
            return Ok(());
        }

        let mut pipe = redis::pipe();
        pipe.atomic();
        for key in &stale {
            pipe.zrem(MESSAGE_INDEX_KEY, key).ignore();
            pipe.del(key).ignore();
        }
        pipe.query_async::<()>(conn).await?;

        tracing::debug!(evicted = stale.len(), "Trimmed message cache");

        Ok(())
    }

    /// Return all cached messages, newest first.
    pub async fn list(&self) -> CacheResult<Vec<Message>> {
        timeout(self.op_deadline, self.list_inner())
            .await
            .map_err(|_| CacheError::Timeout)?
    }

    async fn list_inner(&self) -> CacheResult<Vec<Message>> {
        let mut conn = self.pool.get().await?;

        let keys: Vec<String> = conn.zrevrange(MESSAGE_INDEX_KEY, 0, -1).await?;
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let payloads: Vec<Option<String>> = redis::cmd("MGET")
            .arg(&keys)
            .query_async(&mut conn)
            .await?;

        let mut messages = Vec::with_capacity(keys.len());
        // A record missing behind its index entry means a concurrent
        // delete landed between the two reads; skip it.
        for payload in payloads.into_iter().flatten() {
            let record: CachedMessage = serde_json::from_str(&payload)?;
            messages.push(record.into());
        }

        Ok(messages)
    }

    /// Point lookup by message id. A miss is `Ok(None)`, not an error.
    pub async fn get(&self, id: Uuid) -> CacheResult<Option<Message>> {
        timeout(self.op_deadline, self.get_inner(id))
            .await
            .map_err(|_| CacheError::Timeout)?
    }

    async fn get_inner(&self, id: Uuid) -> CacheResult<Option<Message>> {
        let key = Self::message_key(id);
        let record: Option<CachedMessage> = self.pool.get_value(&key).await?;
        Ok(record.map(Message::from))
    }

    /// Remove a message from the record store and the index. Deleting an
    /// absent id succeeds with no effect.
    pub async fn delete(&self, id: Uuid) -> CacheResult<()> {
        timeout(self.op_deadline, self.delete_inner(id))
            .await
            .map_err(|_| CacheError::Timeout)??;

        tracing::debug!(message_id = %id, "Removed message from cache");

        Ok(())
    }

    async fn delete_inner(&self, id: Uuid) -> CacheResult<()> {
        let key = Self::message_key(id);
        let mut conn = self.pool.get().await?;

        redis::pipe()
            .atomic()
            .del(&key)
            .ignore()
            .zrem(MESSAGE_INDEX_KEY, &key)
            .ignore()
            .query_async::<()>(&mut conn)
            .await?;

        Ok(())
    }
}

impl std::fmt::Debug for MessageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageCache")
            .field("capacity", &self.capacity)
            .field("op_deadline", &self.op_deadline)
            .finish()
    }
}
