//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::AttendanceService;
use crate::domain::ports::{AttendanceCodeIssuer, ProofClaimCommand, ProofQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Issues codes for `GET /api/qr/generate/{event_id}`.
    pub codes: Arc<dyn AttendanceCodeIssuer>,
    /// Redeems codes for `POST /api/proof/verify`.
    pub claims: Arc<dyn ProofClaimCommand>,
    /// Lists proofs for `GET /api/proof/user/{user_address}`.
    pub proofs: Arc<dyn ProofQuery>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(
        codes: Arc<dyn AttendanceCodeIssuer>,
        claims: Arc<dyn ProofClaimCommand>,
        proofs: Arc<dyn ProofQuery>,
    ) -> Self {
        Self {
            codes,
            claims,
            proofs,
        }
    }
}

impl From<Arc<AttendanceService>> for HttpState {
    fn from(service: Arc<AttendanceService>) -> Self {
        Self::new(service.clone(), service.clone(), service)
    }
}
