//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance (with the relay-db migrations applied)
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL, API_PORT
//!
//! Run with: cargo test -p integration-tests --test api_tests

use std::collections::HashSet;

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Message Tests
// ============================================================================

#[tokio::test]
async fn test_create_message() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = CreateMessageRequest::unique();

    let response = server.post("/api/v1/messages", &request).await.unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(message.text, request.text);
    assert_eq!(message.user_id, request.user_id);
    assert!(!message.id.is_empty());
    assert!(!message.created_at.is_empty());
}

#[tokio::test]
async fn test_create_message_requires_text() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = serde_json::json!({ "text": "", "user_id": "testuser" });

    let response = server.post("/api/v1/messages", &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_created_message_appears_in_listing() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = CreateMessageRequest::unique();

    let response = server.post("/api/v1/messages", &request).await.unwrap();
    let created: MessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server.get("/api/v1/messages?page=1").await.unwrap();
    let listing: MessageListResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(listing.messages.iter().any(|m| m.id == created.id));
}

#[tokio::test]
async fn test_listing_page_is_distinct_across_boundary() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // More messages than the cache window holds, so page 1 straddles the
    // cache/database boundary and page 2 is database-only
    for _ in 0..15 {
        let request = CreateMessageRequest::unique();
        let response = server.post("/api/v1/messages", &request).await.unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let response = server.get("/api/v1/messages?page=1&page_size=10").await.unwrap();
    let page1: MessageListResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server.get("/api/v1/messages?page=2&page_size=10").await.unwrap();
    let page2: MessageListResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(page1.messages.len(), 10);

    let ids1: HashSet<&str> = page1.messages.iter().map(|m| m.id.as_str()).collect();
    let ids2: HashSet<&str> = page2.messages.iter().map(|m| m.id.as_str()).collect();

    // No duplicates within a page, and none across the page boundary
    assert_eq!(ids1.len(), page1.messages.len());
    assert_eq!(ids2.len(), page2.messages.len());
    assert!(ids1.is_disjoint(&ids2));
}

// ============================================================================
// Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_create_reaction() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let message_request = CreateMessageRequest::unique();

    let response = server.post("/api/v1/messages", &message_request).await.unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let path = format!("/api/v1/messages/{}/reactions", message.id);
    let reaction_request = CreateReactionRequest::like("reactor-1");

    let response = server.post(&path, &reaction_request).await.unwrap();
    let reaction: ReactionResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(reaction.message_id, message.id);
    assert_eq!(reaction.kind, "like");
    assert_eq!(reaction.score, 1);
}

#[tokio::test]
async fn test_duplicate_reaction_conflicts() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let message_request = CreateMessageRequest::unique();

    let response = server.post("/api/v1/messages", &message_request).await.unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let path = format!("/api/v1/messages/{}/reactions", message.id);
    let reaction_request = CreateReactionRequest::like("reactor-1");

    let response = server.post(&path, &reaction_request).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    // Same user reacting again violates the uniqueness constraint
    let response = server.post(&path, &reaction_request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_reactions_aggregate_in_listing() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let message_request = CreateMessageRequest::unique();

    let response = server.post("/api/v1/messages", &message_request).await.unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let path = format!("/api/v1/messages/{}/reactions", message.id);
    for user in ["reactor-1", "reactor-2", "reactor-3"] {
        let response = server
            .post(&path, &CreateReactionRequest::like(user))
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let response = server.get("/api/v1/messages?page=1").await.unwrap();
    let listing: MessageListResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let listed = listing
        .messages
        .iter()
        .find(|m| m.id == message.id)
        .expect("created message missing from listing");

    let like = listed
        .message_reactions
        .iter()
        .find(|c| c.kind == "like")
        .expect("like aggregate missing");
    assert_eq!(like.count, 3);
    assert_eq!(listed.message_reactions.len(), 1);
}

#[tokio::test]
async fn test_reaction_rejects_unknown_kind() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let message_request = CreateMessageRequest::unique();

    let response = server.post("/api/v1/messages", &message_request).await.unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let path = format!("/api/v1/messages/{}/reactions", message.id);
    let request = serde_json::json!({ "type": "grumpy", "user_id": "reactor-1" });

    let response = server.post(&path, &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_reaction_on_unknown_message_is_not_found() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let path = format!(
        "/api/v1/messages/{}/reactions",
        uuid::Uuid::new_v4()
    );

    let response = server
        .post(&path, &CreateReactionRequest::like("reactor-1"))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_reaction_rejects_malformed_message_id() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post(
            "/api/v1/messages/not-a-uuid/reactions",
            &CreateReactionRequest::like("reactor-1"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}
