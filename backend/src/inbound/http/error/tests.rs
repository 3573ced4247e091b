//! Tests for HTTP error mapping.

use super::*;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn internal_error_case() -> Error {
    Error::internal("disk on fire at /var/lib/order-relay")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"path": "/var/lib/order-relay"}))
}

#[fixture]
fn invalid_request_case() -> Error {
    Error::invalid_request("Поле phone обязательно для заполнения")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"field": "phone"}))
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn render(error: &Error) -> (StatusCode, Option<String>, Value) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("trace-id header is ASCII").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("error body is JSON");
    (status, header, body)
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(internal_error_case: Error) {
    let (status, header, body) = render(&internal_error_case).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(
        body,
        json!({
            "success": false,
            "error": INTERNAL_ERROR_MESSAGE,
            "code": "internal_error",
            "trace_id": TRACE_ID,
        })
    );
}

#[rstest]
#[actix_web::test]
async fn validation_errors_keep_message_and_details(invalid_request_case: Error) {
    let (status, header, body) = render(&invalid_request_case).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Поле phone обязательно для заполнения"));
    assert_eq!(body["details"], json!({"field": "phone"}));
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_header_and_field() {
    let (_, header, body) = render(&Error::invalid_request("bad")).await;

    assert!(header.is_none(), "trace-id header should not be present");
    assert!(body.get("trace_id").is_none());
}
