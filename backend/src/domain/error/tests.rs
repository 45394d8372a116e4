//! Regression coverage for the domain error payload.

use super::*;
use rstest::rstest;
use serde_json::json;
use uuid::Uuid;

#[rstest]
#[case(ErrorCode::InvalidRequest, "Invalid request")]
#[case(ErrorCode::NotFound, "Not found")]
#[case(ErrorCode::ExternalService, "External service failure")]
#[case(ErrorCode::InternalError, "Internal server error")]
fn blank_messages_fall_back_to_code_wording(#[case] code: ErrorCode, #[case] expected: &str) {
    let err = Error::new(code, "   ");
    assert_eq!(err.message(), expected);
}

#[test]
fn try_new_rejects_blank_messages() {
    let result = Error::try_new(ErrorCode::Conflict, "");
    assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
}

#[test]
fn serialises_camel_case_and_skips_empty_fields() {
    let err = Error::invalid_request("Invalid or expired QR code")
        .with_details(json!({ "reason": "replayed" }));
    let value = serde_json::to_value(&err).expect("serialise error");
    assert_eq!(
        value,
        json!({
            "code": "invalid_request",
            "message": "Invalid or expired QR code",
            "details": { "reason": "replayed" },
        })
    );
}

#[test]
fn deserialisation_rejects_blank_message() {
    let payload = json!({ "code": "not_found", "message": "  " });
    let result: Result<Error, _> = serde_json::from_value(payload);
    assert!(result.is_err());
}

#[test]
fn trace_id_round_trips_through_json() {
    let err = Error::external_service("Error minting proof").with_trace_id("abc");
    let value = serde_json::to_value(&err).expect("serialise error");
    assert_eq!(value.get("traceId"), Some(&json!("abc")));
    let back: Error = serde_json::from_value(value).expect("deserialise error");
    assert_eq!(back, err);
}

#[tokio::test]
async fn captures_trace_id_in_scope() {
    let trace_id = TraceId::from_uuid(Uuid::nil());
    let err = TraceId::scope(trace_id, async { Error::not_found("Event not found") }).await;
    assert_eq!(err.trace_id(), Some(Uuid::nil().to_string().as_str()));
}

#[test]
fn no_trace_id_outside_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}
