//! Account usage view integration tests
//!
//! - GET /v1/me

use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use studyforge_accounts::{AccountUsageStore, PlanTier};

use crate::common::{anonymous_request, authed_request, parse_body, TestApp};

#[test_log::test(tokio::test)]
async fn test_me_reports_remaining_generations() {
    let app = TestApp::new();
    let account = app.create_account(PlanTier::Free).await;
    let jwt = app.jwt_for(&account);

    let before = app
        .router()
        .oneshot(authed_request(Method::GET, "/v1/me", &jwt, None))
        .await
        .unwrap();
    assert_eq!(before.status(), StatusCode::OK);
    let body = parse_body(before).await;
    assert_eq!(body["id"], account.id.to_string());
    assert_eq!(body["email"], account.email);
    assert_eq!(body["tier"], "free");
    assert_eq!(body["daily_generations_used"], 0);
    assert!(body["last_generation_at"].is_null());
    assert_eq!(body["remaining_generations_today"], 1);

    let generated = app
        .router()
        .oneshot(authed_request(
            Method::POST,
            "/v1/generations",
            &jwt,
            Some(json!({ "topic": "Thermodynamik" })),
        ))
        .await
        .unwrap();
    assert_eq!(generated.status(), StatusCode::CREATED);

    let after = app
        .router()
        .oneshot(authed_request(Method::GET, "/v1/me", &jwt, None))
        .await
        .unwrap();
    let body = parse_body(after).await;
    assert_eq!(body["daily_generations_used"], 1);
    assert!(body["last_generation_at"].is_string());
    assert_eq!(body["remaining_generations_today"], 0);
}

#[test_log::test(tokio::test)]
async fn test_upgraded_account_has_unlimited_remaining() {
    let app = TestApp::new();
    let account = app.create_account(PlanTier::Free).await;
    let jwt = app.jwt_for(&account);

    app.accounts
        .set_tier(account.id, PlanTier::Premium)
        .await
        .unwrap();

    let response = app
        .router()
        .oneshot(authed_request(Method::GET, "/v1/me", &jwt, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    assert_eq!(body["tier"], "premium");
    assert!(body["remaining_generations_today"].is_null());
}

#[test_log::test(tokio::test)]
async fn test_me_for_unknown_account_returns_404() {
    let app = TestApp::new();
    let jwt = crate::common::create_test_jwt(uuid::Uuid::new_v4(), &app.config.jwt_secret)
        .unwrap();

    let response = app
        .router()
        .oneshot(authed_request(Method::GET, "/v1/me", &jwt, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn test_me_rejects_bad_tokens() {
    let app = TestApp::new();

    let anonymous = app
        .router()
        .oneshot(anonymous_request(Method::GET, "/v1/me", None))
        .await
        .unwrap();
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let account = app.create_account(PlanTier::Free).await;
    let forged = crate::common::create_test_jwt(account.id, "some-other-secret").unwrap();
    let response = app
        .router()
        .oneshot(authed_request(Method::GET, "/v1/me", &forged, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
