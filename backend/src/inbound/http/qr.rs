//! QR code issuing handler.
//!
//! ```text
//! GET /api/qr/generate/{event_id}
//! ```

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::IssuedCode;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_event_id};

/// Code payload nested under `qr_data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QrData {
    /// Wire form `{event_id}:{issued_at}:{nonce}`.
    #[schema(example = "1:1706781600:6f1c2d9a-3b55-4a8e-9f0e-2a7c1b8d4e11")]
    pub qr_string: String,
    /// PNG rendering as a `data:image/png;base64,` URI.
    pub qr_image: String,
    /// Event the code admits to.
    pub event_id: String,
    /// Issue time in Unix seconds.
    pub timestamp: i64,
    /// Last accepted second.
    pub expires_at: i64,
}

/// Response body for a generated code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QrGenerateResponse {
    /// Always true on 200.
    pub success: bool,
    /// Requested event.
    pub event_id: String,
    /// Event display name.
    pub event_name: String,
    /// The code itself.
    pub qr_data: QrData,
}

impl From<IssuedCode> for QrGenerateResponse {
    fn from(issued: IssuedCode) -> Self {
        let event_id = issued.event_id.to_string();
        Self {
            success: true,
            event_id: event_id.clone(),
            event_name: issued.event_name,
            qr_data: QrData {
                qr_string: issued.code_string,
                qr_image: issued.image.into(),
                event_id,
                timestamp: issued.issued_at,
                expires_at: issued.expires_at,
            },
        }
    }
}

/// Generate a fresh single-use attendance code for an event.
#[utoipa::path(
    get,
    path = "/api/qr/generate/{event_id}",
    params(("event_id" = String, Path, description = "Event identifier")),
    responses(
        (status = 200, description = "Code generated", body = QrGenerateResponse),
        (status = 400, description = "Malformed event identifier", body = Error),
        (status = 404, description = "Event not found", body = Error),
        (status = 503, description = "Event store unavailable", body = Error)
    ),
    tags = ["qr"],
    operation_id = "generateQrCode"
)]
#[get("/api/qr/generate/{event_id}")]
pub async fn generate_qr(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let event_id = parse_event_id(path.into_inner(), FieldName::new("event_id"))?;
    let issued = state.codes.issue(&event_id).await?;
    Ok(HttpResponse::Ok().json(QrGenerateResponse::from(issued)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;

    use crate::domain::ports::{
        MockAttendanceCodeIssuer, MockProofClaimCommand, MockProofQuery, QrImage,
    };
    use crate::domain::{ErrorCode, EventId};

    fn state_with(codes: MockAttendanceCodeIssuer) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            Arc::new(codes),
            Arc::new(MockProofClaimCommand::new()),
            Arc::new(MockProofQuery::new()),
        ))
    }

    fn issued(event_id: &EventId) -> IssuedCode {
        IssuedCode {
            event_id: event_id.clone(),
            event_name: "Traditional Music Festival".to_owned(),
            code_string: format!("{event_id}:1000:nonce"),
            image: QrImage::from_data_uri("data:image/png;base64,AA=="),
            issued_at: 1_000,
            expires_at: 1_300,
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn returns_code_with_event_name() {
        let mut codes = MockAttendanceCodeIssuer::new();
        codes
            .expect_issue()
            .withf(|id| id.as_ref() == "1")
            .times(1)
            .returning(|id| Ok(issued(id)));
        let app = actix_test::init_service(App::new().app_data(state_with(codes)).service(generate_qr))
            .await;

        let request = actix_test::TestRequest::get()
            .uri("/api/qr/generate/1")
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, request).await;

        assert_eq!(body["success"], true);
        assert_eq!(body["event_id"], "1");
        assert_eq!(body["event_name"], "Traditional Music Festival");
        assert_eq!(body["qr_data"]["qr_string"], "1:1000:nonce");
        assert_eq!(body["qr_data"]["qr_image"], "data:image/png;base64,AA==");
        assert_eq!(body["qr_data"]["event_id"], "1");
        assert_eq!(body["qr_data"]["timestamp"], 1_000);
        assert_eq!(body["qr_data"]["expires_at"], 1_300);
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_event_is_404() {
        let mut codes = MockAttendanceCodeIssuer::new();
        codes
            .expect_issue()
            .returning(|_| Err(Error::not_found("Event not found")));
        let app = actix_test::init_service(App::new().app_data(state_with(codes)).service(generate_qr))
            .await;

        let request = actix_test::TestRequest::get()
            .uri("/api/qr/generate/99")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Error = actix_test::read_body_json(response).await;
        assert_eq!(body.code(), ErrorCode::NotFound);
        assert_eq!(body.message(), "Event not found");
    }

    #[rstest]
    #[actix_web::test]
    async fn event_id_with_delimiter_is_rejected_before_issuing() {
        let mut codes = MockAttendanceCodeIssuer::new();
        codes.expect_issue().times(0);
        let app = actix_test::init_service(App::new().app_data(state_with(codes)).service(generate_qr))
            .await;

        let request = actix_test::TestRequest::get()
            .uri("/api/qr/generate/1:2")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
