//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("taken"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::external_service("mint"), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn decode_response(error: &Error, expected_status: StatusCode) -> (Option<String>, Error) {
    let response = ResponseError::error_response(error);
    assert_eq!(response.status(), expected_status);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("ascii header").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let payload = serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds");
    (header, payload)
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_trace_id(expected_trace_id: String) {
    let error = Error::internal("proof store error: syntax")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "secret": "x" }));

    let (header, payload) = decode_response(&error, StatusCode::INTERNAL_SERVER_ERROR).await;
    assert_eq!(header.as_deref(), Some(expected_trace_id.as_str()));
    assert_eq!(payload.code(), ErrorCode::InternalError);
    assert_eq!(payload.message(), "Internal server error");
    assert!(payload.details().is_none());
    assert_eq!(payload.trace_id(), Some(TRACE_ID));
}

#[rstest]
#[actix_web::test]
async fn storage_outages_hide_adapter_detail(expected_trace_id: String) {
    let error = Error::service_unavailable("code ledger unavailable: connection refused")
        .with_trace_id(expected_trace_id.clone());

    let (header, payload) = decode_response(&error, StatusCode::SERVICE_UNAVAILABLE).await;
    assert_eq!(header.as_deref(), Some(expected_trace_id.as_str()));
    assert_eq!(payload.code(), ErrorCode::ServiceUnavailable);
    assert_eq!(payload.message(), "Service temporarily unavailable");
}

#[rstest]
#[actix_web::test]
async fn minting_failures_keep_their_message(expected_trace_id: String) {
    let error = Error::external_service("Error minting proof")
        .with_trace_id(expected_trace_id)
        .with_details(json!({ "reason": "timeout" }));

    let (_, payload) = decode_response(&error, StatusCode::INTERNAL_SERVER_ERROR).await;
    assert_eq!(payload.code(), ErrorCode::ExternalService);
    assert_eq!(payload.message(), "Error minting proof");
    assert_eq!(payload.details(), Some(&json!({ "reason": "timeout" })));
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let error = Error::invalid_request("Invalid or expired QR code")
        .with_details(json!({ "reason": "expired" }));

    let (header, payload) = decode_response(&error, StatusCode::BAD_REQUEST).await;
    assert!(header.is_none());
    assert_eq!(payload.message(), "Invalid or expired QR code");
    assert_eq!(payload.trace_id(), None);
    assert_eq!(payload.details(), Some(&json!({ "reason": "expired" })));
}

#[test]
fn from_actix_error_is_redacted_internal_error() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.details(), None);
}

#[rstest]
#[actix_web::test]
async fn malformed_json_bodies_use_the_error_envelope() {
    use actix_web::{App, HttpResponse, test, web};

    let app = test::init_service(App::new().app_data(json_config()).route(
        "/",
        web::post().to(|_: web::Json<serde_json::Value>| async { HttpResponse::Ok().finish() }),
    ))
    .await;
    let request = test::TestRequest::post()
        .uri("/")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Error = test::read_body_json(response).await;
    assert_eq!(body.code(), ErrorCode::InvalidRequest);
}
