//! Message cache integration tests
//!
//! Exercises the Redis-backed message cache directly: capacity trimming,
//! ordering, lookups, and reaction count synchronization.
//!
//! These tests require a running Redis instance and the REDIS_URL
//! environment variable. They share one key namespace, so they take a
//! global lock and clear the cache before each run.
//!
//! Run with: cargo test -p integration-tests --test cache_tests

use std::sync::OnceLock;

use chrono::{Duration, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use relay_cache::{MessageCache, RedisPool, RedisPoolConfig};
use relay_core::entities::Message;
use relay_service::ReactionCacheSync;

static CACHE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn cache_lock() -> &'static Mutex<()> {
    CACHE_LOCK.get_or_init(|| Mutex::new(()))
}

/// Build a pool + cache pair from the environment, or None to skip
fn test_cache() -> Option<(RedisPool, MessageCache)> {
    dotenvy::dotenv().ok();

    let Ok(url) = std::env::var("REDIS_URL") else {
        eprintln!("Skipping test: REDIS_URL not set");
        return None;
    };

    let pool = RedisPool::new(RedisPoolConfig {
        url,
        max_connections: 4,
    })
    .expect("Failed to create Redis pool");

    let cache = MessageCache::new(pool.clone(), 10);
    Some((pool, cache))
}

/// Remove every cached message and the index itself
async fn clear_cache(pool: &RedisPool) {
    let mut conn = pool.get().await.expect("Failed to get Redis connection");

    let keys: Vec<String> = redis::cmd("ZRANGE")
        .arg("messages")
        .arg(0)
        .arg(-1)
        .query_async(&mut conn)
        .await
        .unwrap_or_default();

    let mut pipe = redis::pipe();
    for key in &keys {
        pipe.del(key).ignore();
    }
    pipe.del("messages").ignore();
    pipe.query_async::<()>(&mut conn)
        .await
        .expect("Failed to clear cache");
}

/// A message whose creation time is `i` milliseconds after the base
fn message_at(base: chrono::DateTime<Utc>, i: i64) -> Message {
    Message::new(
        Uuid::new_v4(),
        format!("message {i}"),
        "cache-tester".to_string(),
        base + Duration::milliseconds(i),
    )
}

#[tokio::test]
async fn test_insert_then_get_round_trips() {
    let Some((pool, cache)) = test_cache() else {
        return;
    };
    let _guard = cache_lock().lock().await;
    clear_cache(&pool).await;

    let mut message = message_at(Utc::now(), 0);
    message.record_reaction("like");
    message.record_reaction("wow");

    cache.insert(&message).await.unwrap();
    let cached = cache.get(message.id).await.unwrap();

    assert_eq!(cached, Some(message));
}

#[tokio::test]
async fn test_get_miss_returns_none() {
    let Some((pool, cache)) = test_cache() else {
        return;
    };
    let _guard = cache_lock().lock().await;
    clear_cache(&pool).await;

    let cached = cache.get(Uuid::new_v4()).await.unwrap();
    assert_eq!(cached, None);
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let Some((pool, cache)) = test_cache() else {
        return;
    };
    let _guard = cache_lock().lock().await;
    clear_cache(&pool).await;

    // Deleting an id that was never cached is a no-op
    cache.delete(Uuid::new_v4()).await.unwrap();

    let message = message_at(Utc::now(), 0);
    cache.insert(&message).await.unwrap();
    cache.delete(message.id).await.unwrap();
    cache.delete(message.id).await.unwrap();

    assert_eq!(cache.get(message.id).await.unwrap(), None);
    assert!(cache.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_eviction_keeps_newest_window() {
    let Some((pool, cache)) = test_cache() else {
        return;
    };
    let _guard = cache_lock().lock().await;
    clear_cache(&pool).await;

    let base = Utc::now();
    let messages: Vec<Message> = (1..=11).map(|i| message_at(base, i)).collect();
    for message in &messages {
        cache.insert(message).await.unwrap();
    }

    let listed = cache.list().await.unwrap();
    assert_eq!(listed.len(), 10);

    // Newest (11) down to 2, oldest evicted
    assert_eq!(listed[0].id, messages[10].id);
    assert_eq!(listed[9].id, messages[1].id);
    assert!(!listed.iter().any(|m| m.id == messages[0].id));
    assert_eq!(cache.get(messages[0].id).await.unwrap(), None);
}

#[tokio::test]
async fn test_capacity_invariant_holds_after_every_insert() {
    let Some((pool, cache)) = test_cache() else {
        return;
    };
    let _guard = cache_lock().lock().await;
    clear_cache(&pool).await;

    let base = Utc::now();
    for i in 0..15 {
        cache.insert(&message_at(base, i)).await.unwrap();
        let listed = cache.list().await.unwrap();
        assert!(listed.len() <= 10, "window exceeded after insert {i}");
    }
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let Some((pool, cache)) = test_cache() else {
        return;
    };
    let _guard = cache_lock().lock().await;
    clear_cache(&pool).await;

    // Insert out of chronological order; the index sorts by timestamp
    let base = Utc::now();
    for i in [3_i64, 1, 4, 0, 2] {
        cache.insert(&message_at(base, i)).await.unwrap();
    }

    let listed = cache.list().await.unwrap();
    assert_eq!(listed.len(), 5);
    for pair in listed.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }
}

#[tokio::test]
async fn test_reaction_sync_updates_cached_counts() {
    let Some((pool, cache)) = test_cache() else {
        return;
    };
    let _guard = cache_lock().lock().await;
    clear_cache(&pool).await;

    let message = message_at(Utc::now(), 0);
    cache.insert(&message).await.unwrap();

    let sync = ReactionCacheSync::new(&cache);
    assert!(sync.apply(message.id, "like").await.unwrap());
    assert!(sync.apply(message.id, "like").await.unwrap());
    assert!(sync.apply(message.id, "wow").await.unwrap());

    let cached = cache.get(message.id).await.unwrap().unwrap();
    let kinds: Vec<(&str, i64)> = cached
        .reaction_counts
        .iter()
        .map(|c| (c.kind.as_str(), c.count))
        .collect();
    assert_eq!(kinds, vec![("like", 2), ("wow", 1)]);
}

#[tokio::test]
async fn test_reaction_sync_skips_uncached_message() {
    let Some((pool, cache)) = test_cache() else {
        return;
    };
    let _guard = cache_lock().lock().await;
    clear_cache(&pool).await;

    let sync = ReactionCacheSync::new(&cache);
    let updated = sync.apply(Uuid::new_v4(), "like").await.unwrap();
    assert!(!updated);
}
