//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP handler and the shared error envelope. The
//! document backs Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::health::HealthStatus;
use crate::inbound::http::proof::{
    ProofEntry, UserProofsResponse, VerifyProofRequest, VerifyProofResponse,
};
use crate::inbound::http::qr::{QrData, QrGenerateResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Proof of Culture API",
        description = "Single-use attendance codes and proof-of-attendance records for cultural events."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    paths(
        crate::inbound::http::qr::generate_qr,
        crate::inbound::http::proof::verify_proof,
        crate::inbound::http::proof::list_user_proofs,
        crate::inbound::http::health::status,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        HealthStatus,
        QrData,
        QrGenerateResponse,
        VerifyProofRequest,
        VerifyProofResponse,
        ProofEntry,
        UserProofsResponse,
    )),
    tags(
        (name = "qr", description = "Attendance code issuing"),
        (name = "proof", description = "Code redemption and proof listing"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
