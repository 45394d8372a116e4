//! Proof redemption and listing handlers.
//!
//! ```text
//! POST /api/proof/verify
//! GET  /api/proof/user/{user_address}
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{ClaimReceipt, ProofClaim};
use crate::domain::{Error, Proof};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_event_id, parse_user_address};

const MINTED_MESSAGE: &str = "Proof minted successfully";
const PLACEHOLDER_MESSAGE: &str = "Proof recorded; minting unavailable";

/// Request body for redeeming a code.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct VerifyProofRequest {
    /// Code string scanned from the QR image.
    pub qr: String,
    /// Wallet to credit.
    #[schema(example = "0xABC")]
    pub user_address: String,
    /// Event the client scanned the code at.
    pub event_id: String,
}

/// Response body for a redeemed code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct VerifyProofResponse {
    /// Always true on 200.
    pub success: bool,
    /// Human readable outcome.
    pub message: String,
    /// Minting transaction hash, or a placeholder reference.
    pub tx_hash: Option<String>,
    /// Token id when the gateway reported one.
    pub token_id: Option<u64>,
}

impl From<ClaimReceipt> for VerifyProofResponse {
    fn from(receipt: ClaimReceipt) -> Self {
        let message = if receipt.placeholder {
            PLACEHOLDER_MESSAGE
        } else {
            MINTED_MESSAGE
        };
        Self {
            success: true,
            message: message.to_owned(),
            tx_hash: Some(receipt.proof.external_reference.as_ref().to_owned()),
            token_id: receipt.token_id,
        }
    }
}

/// One stored proof.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct ProofEntry {
    /// Credited wallet.
    pub user_address: String,
    /// Event attended.
    pub event_id: String,
    /// Recording time, RFC 3339.
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: DateTime<Utc>,
    /// Minting transaction hash or placeholder reference.
    pub tx_hash: String,
}

impl From<Proof> for ProofEntry {
    fn from(proof: Proof) -> Self {
        Self {
            user_address: proof.user_address.to_string(),
            event_id: proof.event_id.to_string(),
            timestamp: proof.recorded_at,
            tx_hash: proof.external_reference.as_ref().to_owned(),
        }
    }
}

/// Response body for a user's proofs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UserProofsResponse {
    /// Always true on 200.
    pub success: bool,
    /// Wallet queried.
    pub user_address: String,
    /// Number of entries in `proofs`.
    pub proof_count: usize,
    /// Proofs, oldest first.
    pub proofs: Vec<ProofEntry>,
}

/// Verify a scanned code, mint, and record a proof.
///
/// Refused codes share one public message; `details.reason` carries
/// `malformed`, `expired` or `replayed`.
#[utoipa::path(
    post,
    path = "/api/proof/verify",
    request_body = VerifyProofRequest,
    responses(
        (status = 200, description = "Proof recorded", body = VerifyProofResponse),
        (status = 400, description = "Invalid or expired QR code", body = Error),
        (status = 409, description = "Proof already recorded", body = Error),
        (status = 500, description = "Minting failed under the reject policy", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["proof"],
    operation_id = "verifyProof"
)]
#[post("/api/proof/verify")]
pub async fn verify_proof(
    state: web::Data<HttpState>,
    payload: web::Json<VerifyProofRequest>,
) -> ApiResult<HttpResponse> {
    let VerifyProofRequest {
        qr,
        user_address,
        event_id,
    } = payload.into_inner();
    let claim = ProofClaim {
        code: qr,
        user_address: parse_user_address(user_address, FieldName::new("user_address"))?,
        event_id: parse_event_id(event_id, FieldName::new("event_id"))?,
    };
    let receipt = state.claims.claim(claim).await?;
    Ok(HttpResponse::Ok().json(VerifyProofResponse::from(receipt)))
}

/// List proofs credited to a wallet.
#[utoipa::path(
    get,
    path = "/api/proof/user/{user_address}",
    params(("user_address" = String, Path, description = "Wallet address")),
    responses(
        (status = 200, description = "Proofs for the wallet", body = UserProofsResponse),
        (status = 400, description = "Malformed wallet address", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["proof"],
    operation_id = "listUserProofs"
)]
#[get("/api/proof/user/{user_address}")]
pub async fn list_user_proofs(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_address = parse_user_address(path.into_inner(), FieldName::new("user_address"))?;
    let proofs = state.proofs.list_for_user(&user_address).await?;
    let proofs: Vec<ProofEntry> = proofs.into_iter().map(ProofEntry::from).collect();
    Ok(HttpResponse::Ok().json(UserProofsResponse {
        success: true,
        user_address: user_address.to_string(),
        proof_count: proofs.len(),
        proofs,
    }))
}

#[cfg(test)]
#[path = "proof_tests.rs"]
mod tests;
