mod common;
mod support;

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::{assert_error_body, assert_rejection_body};
use serde_json::{json, Value};
use support::app_builder::{state_with_directory, TEST_USER};
use support::directories::{CountingDirectory, UnavailableDirectory};
use support::tokens::{expired_token, fresh_token, identity};
use support::{create_test_app, seeded_state};

fn verify_request(body: Value) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/api/auth/verify")
        .set_json(body)
        .to_request()
}

#[actix_web::test]
async fn valid_token_verifies() {
    let (state, _) = seeded_state();
    let app = create_test_app(state).build().await;

    let token = fresh_token(&identity(1, TEST_USER));
    let resp = test::call_service(&app, verify_request(json!({ "token": token }))).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"valid": true, "message": "Token is valid"}));
}

#[actix_web::test]
async fn garbage_token_is_invalid() {
    let (state, _) = seeded_state();
    let app = create_test_app(state).build().await;

    let resp = test::call_service(&app, verify_request(json!({"token": "invalid.jwt.token"}))).await;
    assert_rejection_body(resp, "Invalid token").await;
}

#[actix_web::test]
async fn expired_token_is_invalid() {
    let (state, _) = seeded_state();
    let app = create_test_app(state).build().await;

    let token = expired_token(&identity(1, TEST_USER));
    let resp = test::call_service(&app, verify_request(json!({ "token": token }))).await;
    assert_rejection_body(resp, "Token has expired").await;
}

#[actix_web::test]
async fn foreign_signature_is_invalid() {
    let (state, _) = seeded_state();
    let app = create_test_app(state).build().await;

    let codec = auth_backend::TokenCodec::new(&auth_backend::SecurityConfig::new(
        b"some-other-secret".to_vec(),
    ));
    let token = codec
        .issue(&codec.claims_for(&identity(1, TEST_USER), time::OffsetDateTime::now_utc()))
        .unwrap();

    let resp = test::call_service(&app, verify_request(json!({ "token": token }))).await;
    assert_rejection_body(resp, "Invalid token signature").await;
}

#[actix_web::test]
async fn missing_or_empty_token_is_a_bad_request() {
    let (state, _) = seeded_state();
    let app = create_test_app(state).build().await;

    for body in [json!({}), json!({"token": ""}), json!({"token": null})] {
        let resp = test::call_service(&app, verify_request(body)).await;
        assert_error_body(resp, StatusCode::BAD_REQUEST, "Token is required").await;
    }
}

#[actix_web::test]
async fn empty_body_asks_for_a_token() {
    let (state, _) = seeded_state();
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::post().uri("/api/auth/verify").to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_body(resp, StatusCode::BAD_REQUEST, "Token is required").await;
}

#[actix_web::test]
async fn non_string_token_is_invalid() {
    let (state, _) = seeded_state();
    let app = create_test_app(state).build().await;

    for token in [json!(123), json!(true), json!(["a.b.c"]), json!({"t": 1})] {
        let resp = test::call_service(&app, verify_request(json!({ "token": token }))).await;
        assert_rejection_body(resp, "Invalid token").await;
    }
}

#[actix_web::test]
async fn whitespace_token_is_invalid_not_missing() {
    let (state, _) = seeded_state();
    let app = create_test_app(state).build().await;

    let resp = test::call_service(&app, verify_request(json!({"token": "   "}))).await;
    assert_rejection_body(resp, "Invalid token").await;
}

#[actix_web::test]
async fn verify_works_with_directory_down() {
    let app = create_test_app(state_with_directory(Arc::new(UnavailableDirectory)))
        .build()
        .await;

    // Subject 999 exists nowhere; verify must not care.
    let token = fresh_token(&identity(999, "ghost"));
    let resp = test::call_service(&app, verify_request(json!({ "token": token }))).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn verify_never_calls_the_directory() {
    let (_, inner) = seeded_state();
    let counting = Arc::new(CountingDirectory::new(inner));
    let app = create_test_app(state_with_directory(counting.clone()))
        .build()
        .await;

    let valid = fresh_token(&identity(1, TEST_USER));
    let expired = expired_token(&identity(1, TEST_USER));
    for token in [valid.as_str(), expired.as_str(), "invalid.jwt.token"] {
        test::call_service(&app, verify_request(json!({ "token": token }))).await;
    }

    assert_eq!(counting.calls(), 0);
}
