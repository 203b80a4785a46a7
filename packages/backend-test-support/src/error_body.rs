//! Assertions for the backend's JSON error responses.
//!
//! Two shapes exist: `{"error": "..."}` and, for rejected tokens,
//! `{"valid": false, "message": "..."}`. Both carry an `x-trace-id` header.

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use serde_json::Value;

fn assert_trace_header(headers: &HeaderMap) {
    let trace_id = headers
        .get("x-trace-id")
        .expect("x-trace-id header should be present")
        .to_str()
        .expect("x-trace-id header should be valid UTF-8");
    assert!(!trace_id.is_empty(), "x-trace-id should not be empty");
}

fn assert_bearer_challenge(status: StatusCode, headers: &HeaderMap) {
    if status == StatusCode::UNAUTHORIZED {
        let challenge = headers
            .get("www-authenticate")
            .expect("401 responses should carry WWW-Authenticate")
            .to_str()
            .expect("WWW-Authenticate should be valid UTF-8");
        assert_eq!(challenge, "Bearer");
    }
}

async fn parts(resp: ServiceResponse<BoxBody>) -> (StatusCode, HeaderMap, Value) {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::test::read_body(resp).await;
    let json = serde_json::from_slice(&body).unwrap_or_else(|e| {
        panic!(
            "response body should be JSON ({e}): {}",
            String::from_utf8_lossy(&body)
        )
    });
    (status, headers, json)
}

/// Assert `status` and a body of exactly `{"error": expected_error}`.
pub async fn assert_error_body(
    resp: ServiceResponse<BoxBody>,
    expected_status: StatusCode,
    expected_error: &str,
) {
    let (status, headers, body) = parts(resp).await;

    assert_eq!(status, expected_status, "unexpected status, body: {body}");
    assert_trace_header(&headers);
    assert_bearer_challenge(status, &headers);
    assert_eq!(body, serde_json::json!({ "error": expected_error }));
}

/// Assert a 401 body of exactly `{"valid": false, "message": expected_message}`.
pub async fn assert_rejection_body(resp: ServiceResponse<BoxBody>, expected_message: &str) {
    let (status, headers, body) = parts(resp).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED, "unexpected status, body: {body}");
    assert_trace_header(&headers);
    assert_bearer_challenge(status, &headers);
    assert_eq!(
        body,
        serde_json::json!({ "valid": false, "message": expected_message })
    );
}
