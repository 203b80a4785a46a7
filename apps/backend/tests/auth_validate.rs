mod common;
mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::{assert_error_body, assert_rejection_body};
use serde_json::{json, Value};
use support::app_builder::{state_with_directory, INACTIVE_USER, TEST_USER};
use support::directories::UnavailableDirectory;
use support::tokens::{bearer, decode, expired_token, fresh_token, identity};
use support::{create_test_app, seeded_state};

fn validate_request(authorization: Option<String>) -> actix_http::Request {
    let mut req = test::TestRequest::get().uri("/api/auth/validate");
    if let Some(value) = authorization {
        req = req.insert_header(("Authorization", value));
    }
    req.to_request()
}

#[actix_web::test]
async fn valid_bearer_token_resolves_user() {
    let (state, _) = seeded_state();
    let app = create_test_app(state).build().await;

    let token = fresh_token(&identity(1, TEST_USER));
    let claims = decode(&token);
    let req = test::TestRequest::get()
        .uri("/api/auth/validate")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["valid"], true);
    assert_eq!(body["user"], TEST_USER);
    assert_eq!(
        body["expires"],
        auth_backend::auth::claims::format_expiry(claims.expires_at)
    );
}

#[actix_web::test]
async fn user_name_comes_from_the_directory() {
    let (state, _) = seeded_state();
    let app = create_test_app(state).build().await;

    // Token carries a stale name; the response reports the current one.
    let token = fresh_token(&identity(1, "old-name"));
    let resp = test::call_service(&app, validate_request(Some(format!("Bearer {token}")))).await;

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"], TEST_USER);
}

#[actix_web::test]
async fn scheme_is_case_insensitive() {
    let (state, _) = seeded_state();
    let app = create_test_app(state).build().await;

    let token = fresh_token(&identity(1, TEST_USER));
    let resp = test::call_service(&app, validate_request(Some(format!("bearer {token}")))).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn inactive_user_still_validates() {
    let (state, _) = seeded_state();
    let app = create_test_app(state).build().await;

    let token = fresh_token(&identity(2, INACTIVE_USER));
    let resp = test::call_service(&app, validate_request(Some(format!("Bearer {token}")))).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn missing_header() {
    let (state, _) = seeded_state();
    let app = create_test_app(state).build().await;

    let resp = test::call_service(&app, validate_request(None)).await;
    assert_error_body(
        resp,
        StatusCode::UNAUTHORIZED,
        "Authorization header is required",
    )
    .await;
}

#[actix_web::test]
async fn malformed_header_or_wrong_scheme() {
    let (state, _) = seeded_state();
    let app = create_test_app(state).build().await;
    let token = fresh_token(&identity(1, TEST_USER));

    for value in [
        format!("Token {token}"),
        format!("Basic {token}"),
        token.clone(),
        "Bearer".to_string(),
        format!("Bearer {token} extra"),
    ] {
        let resp = test::call_service(&app, validate_request(Some(value))).await;
        assert_error_body(
            resp,
            StatusCode::UNAUTHORIZED,
            "Invalid authorization header format",
        )
        .await;
    }
}

#[actix_web::test]
async fn expired_token_is_rejected() {
    let (state, _) = seeded_state();
    let app = create_test_app(state).build().await;

    let token = expired_token(&identity(1, TEST_USER));
    let resp = test::call_service(&app, validate_request(Some(format!("Bearer {token}")))).await;
    assert_rejection_body(resp, "Token has expired").await;
}

#[actix_web::test]
async fn garbage_token_is_rejected() {
    let (state, _) = seeded_state();
    let app = create_test_app(state).build().await;

    let resp = test::call_service(
        &app,
        validate_request(Some("Bearer invalid.jwt.token".to_string())),
    )
    .await;
    assert_rejection_body(resp, "Invalid token").await;
}

#[actix_web::test]
async fn deleted_user_is_not_found() {
    let (state, directory) = seeded_state();
    let app = create_test_app(state).build().await;

    let token = fresh_token(&identity(1, TEST_USER));
    directory.remove_user(1);

    let resp = test::call_service(&app, validate_request(Some(format!("Bearer {token}")))).await;
    assert_error_body(resp, StatusCode::UNAUTHORIZED, "User not found").await;
}

#[actix_web::test]
async fn directory_outage_is_service_unavailable() {
    let app = create_test_app(state_with_directory(std::sync::Arc::new(UnavailableDirectory)))
        .build()
        .await;

    let token = fresh_token(&identity(1, TEST_USER));
    let resp = test::call_service(&app, validate_request(Some(format!("Bearer {token}")))).await;
    assert_error_body(
        resp,
        StatusCode::SERVICE_UNAVAILABLE,
        "Authentication service unavailable",
    )
    .await;
}

#[actix_web::test]
async fn login_then_validate_round_trip() {
    let (state, _) = seeded_state();
    let app = create_test_app(state).build().await;

    let login = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"username": TEST_USER, "password": "testpass123"}))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, login).await).await;
    let token = body["token"].as_str().unwrap();

    let resp = test::call_service(&app, validate_request(Some(format!("Bearer {token}")))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let validated: Value = test::read_body_json(resp).await;
    assert_eq!(validated["expires"], body["expires"]);
}
