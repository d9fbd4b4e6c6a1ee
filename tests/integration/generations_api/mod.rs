//! Generation API integration tests
//!
//! Tests the quota-gated generation flow:
//! - POST /v1/generations
//! - Provider failures, quota denial and validation

use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use studyforge_accounts::{PlanTier, DAILY_LIMIT_REASON};
use studyforge_llm::mock::MockReply;

use crate::common::{anonymous_request, authed_request, parse_body, TestApp, QUIZ_PROMPT};

// ============================================================================
// Success
// ============================================================================

#[test_log::test(tokio::test)]
async fn test_generate_returns_complete_bundle() {
    let app = TestApp::new();
    let account = app.create_account(PlanTier::Free).await;
    let jwt = app.jwt_for(&account);

    let response = app
        .router()
        .oneshot(authed_request(
            Method::POST,
            "/v1/generations",
            &jwt,
            Some(json!({ "topic": "Photosynthese" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = parse_body(response).await;

    assert_eq!(body["topic"], "Photosynthese");
    assert!(body["id"].is_string());
    assert_eq!(body["plan"]["days"].as_array().unwrap().len(), 7);
    assert_eq!(body["flashcards"]["cards"].as_array().unwrap().len(), 10);
    assert_eq!(body["quiz"]["questions"].as_array().unwrap().len(), 8);
    assert!(body["quiz"]["questions"][0]["correctAnswer"].is_u64());

    assert_eq!(app.artifacts.len().await, 1);
    let stored = app.accounts.get(account.id).await.unwrap();
    assert_eq!(stored.daily_generations_used, 1);
    assert!(stored.last_generation_at.is_some());
}

#[test_log::test(tokio::test)]
async fn test_generate_issues_one_request_per_artifact() {
    let app = TestApp::new();
    let account = app.create_account(PlanTier::Free).await;
    let jwt = app.jwt_for(&account);

    let response = app
        .router()
        .oneshot(authed_request(
            Method::POST,
            "/v1/generations",
            &jwt,
            Some(json!({ "topic": "Zellbiologie" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let requests = app.llm.recorded_requests();
    assert_eq!(requests.len(), 3);
    assert!(requests
        .iter()
        .all(|r| r.messages.iter().any(|m| m.content.contains("Zellbiologie"))));
}

// ============================================================================
// Quota
// ============================================================================

#[test_log::test(tokio::test)]
async fn test_free_account_second_generation_is_denied() {
    let app = TestApp::new();
    let account = app.create_account(PlanTier::Free).await;
    let jwt = app.jwt_for(&account);

    let first = app
        .router()
        .oneshot(authed_request(
            Method::POST,
            "/v1/generations",
            &jwt,
            Some(json!({ "topic": "Algebra" })),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);
    app.llm.reset_history();

    let second = app
        .router()
        .oneshot(authed_request(
            Method::POST,
            "/v1/generations",
            &jwt,
            Some(json!({ "topic": "Geometrie" })),
        ))
        .await
        .unwrap();

    assert_eq!(second.status(), StatusCode::FORBIDDEN);
    let body = parse_body(second).await;
    assert_eq!(body["error"]["code"], "QUOTA_EXCEEDED");
    assert_eq!(body["error"]["message"], DAILY_LIMIT_REASON);

    // Denied before any provider call, nothing new stored
    assert_eq!(app.llm.call_count(), 0);
    assert_eq!(app.artifacts.len().await, 1);
    let stored = app.accounts.get(account.id).await.unwrap();
    assert_eq!(stored.daily_generations_used, 1);
}

#[test_log::test(tokio::test)]
async fn test_premium_account_is_not_limited() {
    let app = TestApp::new();
    let account = app.create_account(PlanTier::Premium).await;
    let jwt = app.jwt_for(&account);

    for topic in ["Chemie", "Physik", "Biologie"] {
        let response = app
            .router()
            .oneshot(authed_request(
                Method::POST,
                "/v1/generations",
                &jwt,
                Some(json!({ "topic": topic })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED, "{topic}");
    }

    assert_eq!(app.artifacts.len().await, 3);
    let stored = app.accounts.get(account.id).await.unwrap();
    assert_eq!(stored.daily_generations_used, 3);
}

// ============================================================================
// Provider failures
// ============================================================================

#[test_log::test(tokio::test)]
async fn test_provider_failure_persists_nothing_and_keeps_quota() {
    let app = TestApp::new();
    app.llm
        .behavior()
        .reply_when(QUIZ_PROMPT, MockReply::Fail("upstream timeout".to_string()));
    let account = app.create_account(PlanTier::Free).await;
    let jwt = app.jwt_for(&account);

    let response = app
        .router()
        .oneshot(authed_request(
            Method::POST,
            "/v1/generations",
            &jwt,
            Some(json!({ "topic": "Statistik" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = parse_body(response).await;
    assert_eq!(body["error"]["code"], "GENERATION_FAILED");
    assert!(!body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("upstream timeout"));

    // All three calls still ran to completion
    assert_eq!(app.llm.call_count(), 3);
    assert!(app.artifacts.is_empty().await);
    let stored = app.accounts.get(account.id).await.unwrap();
    assert_eq!(stored.daily_generations_used, 0);
    assert!(stored.last_generation_at.is_none());
}

#[test_log::test(tokio::test)]
async fn test_malformed_provider_output_fails_generation() {
    let app = TestApp::new();
    app.llm.behavior().reply_when(
        QUIZ_PROMPT,
        MockReply::Content(r#"{"questions": "not a list"}"#.to_string()),
    );
    let account = app.create_account(PlanTier::Free).await;
    let jwt = app.jwt_for(&account);

    let response = app
        .router()
        .oneshot(authed_request(
            Method::POST,
            "/v1/generations",
            &jwt,
            Some(json!({ "topic": "Statistik" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = parse_body(response).await;
    assert_eq!(body["error"]["code"], "GENERATION_FAILED");
    assert!(app.artifacts.is_empty().await);
}

#[test_log::test(tokio::test)]
async fn test_usage_commit_failure_is_not_reported_as_conflict() {
    let app = TestApp::new();
    let account = app.create_account(PlanTier::Free).await;
    let jwt = app.jwt_for(&account);
    app.accounts.force_conflicts(5);

    let response = app
        .router()
        .oneshot(authed_request(
            Method::POST,
            "/v1/generations",
            &jwt,
            Some(json!({ "topic": "Statistik" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = parse_body(response).await;
    assert_eq!(body["error"]["code"], "PERSISTENCE_ERROR");
    assert_eq!(body["error"]["message"], "Failed to save learning content");

    // Bundle stays, quota is not charged
    assert_eq!(app.artifacts.len().await, 1);
    let stored = app.accounts.get(account.id).await.unwrap();
    assert_eq!(stored.daily_generations_used, 0);
}

// ============================================================================
// Request validation
// ============================================================================

#[test_log::test(tokio::test)]
async fn test_generate_rejects_invalid_topics() {
    let app = TestApp::new();
    let account = app.create_account(PlanTier::Free).await;
    let jwt = app.jwt_for(&account);

    for body in [
        json!({ "topic": "" }),
        json!({ "topic": "x".repeat(201) }),
        json!({}),
        json!({ "topic": 42 }),
    ] {
        let response = app
            .router()
            .oneshot(authed_request(
                Method::POST,
                "/v1/generations",
                &jwt,
                Some(body.clone()),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
        let parsed = parse_body(response).await;
        assert_eq!(parsed["error"]["code"], "VALIDATION_ERROR");
    }

    assert_eq!(app.llm.call_count(), 0);
    let stored = app.accounts.get(account.id).await.unwrap();
    assert_eq!(stored.daily_generations_used, 0);
}

#[test_log::test(tokio::test)]
async fn test_generate_requires_authentication() {
    let app = TestApp::new();

    let response = app
        .router()
        .oneshot(anonymous_request(
            Method::POST,
            "/v1/generations",
            Some(json!({ "topic": "Photosynthese" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.llm.call_count(), 0);
}

#[test_log::test(tokio::test)]
async fn test_generate_for_unknown_account_returns_404() {
    let app = TestApp::new();
    let jwt = crate::common::create_test_jwt(uuid::Uuid::new_v4(), &app.config.jwt_secret)
        .unwrap();

    let response = app
        .router()
        .oneshot(authed_request(
            Method::POST,
            "/v1/generations",
            &jwt,
            Some(json!({ "topic": "Photosynthese" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.llm.call_count(), 0);
}
