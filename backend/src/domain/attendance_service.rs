//! Attendance proof use-cases.
//!
//! Wires the generator, verifier and recorder to the event store and minting
//! gateway, and translates their failures into [`Error`] for inbound
//! adapters.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, warn};

use super::ports::{
    AttendanceCodeIssuer, ClaimReceipt, CodeLedgerError, EventRepository, EventRepositoryError,
    IssuedCode, MintFailurePolicy, MintingService, ProofClaim, ProofClaimCommand, ProofMetrics,
    ProofQuery, ProofRepositoryError, VerificationOutcome,
};
use super::{
    CodeGenerator, CodeVerifier, Error, EventId, ExternalReference, Proof, ProofRecorder,
    UserAddress, VerificationError,
};

/// Public message for every refused code.
pub const INVALID_CODE_MESSAGE: &str = "Invalid or expired QR code";

/// Collaborators consumed by [`AttendanceService`].
#[derive(Clone)]
pub struct AttendanceServiceParts {
    /// Event lookup.
    pub events: Arc<dyn EventRepository>,
    /// Code generation.
    pub generator: CodeGenerator,
    /// Code verification.
    pub verifier: CodeVerifier,
    /// Proof persistence.
    pub recorder: ProofRecorder,
    /// Minting gateway.
    pub minting: Arc<dyn MintingService>,
    /// Outcome counters.
    pub metrics: Arc<dyn ProofMetrics>,
    /// Behaviour when minting fails.
    pub mint_failure_policy: MintFailurePolicy,
}

/// Implements the attendance driving ports.
#[derive(Clone)]
pub struct AttendanceService {
    events: Arc<dyn EventRepository>,
    generator: CodeGenerator,
    verifier: CodeVerifier,
    recorder: ProofRecorder,
    minting: Arc<dyn MintingService>,
    metrics: Arc<dyn ProofMetrics>,
    mint_failure_policy: MintFailurePolicy,
}

impl AttendanceService {
    /// Assemble the service from its collaborators.
    pub fn new(parts: AttendanceServiceParts) -> Self {
        let AttendanceServiceParts {
            events,
            generator,
            verifier,
            recorder,
            minting,
            metrics,
            mint_failure_policy,
        } = parts;
        Self {
            events,
            generator,
            verifier,
            recorder,
            minting,
            metrics,
            mint_failure_policy,
        }
    }

    async fn count_verification(&self, outcome: VerificationOutcome) {
        if let Err(error) = self.metrics.record_verification(outcome).await {
            warn!(%error, outcome = outcome.as_label(), "failed to record verification metric");
        }
    }

    async fn external_reference(
        &self,
        user_address: &UserAddress,
    ) -> Result<(ExternalReference, Option<u64>, bool), Error> {
        match self.minting.mint(user_address).await {
            Ok(receipt) => Ok((receipt.external_reference, receipt.token_id, false)),
            Err(mint_error) => match self.mint_failure_policy {
                MintFailurePolicy::Placeholder => {
                    warn!(error = %mint_error, "minting failed; recording placeholder reference");
                    if let Err(error) = self.metrics.record_mint_fallback().await {
                        warn!(%error, "failed to record mint fallback metric");
                    }
                    Ok((ExternalReference::placeholder(), None, true))
                }
                MintFailurePolicy::Reject => {
                    error!(error = %mint_error, "minting failed");
                    Err(Error::external_service("Error minting proof")
                        .with_details(json!({ "reason": mint_error.to_string() })))
                }
            },
        }
    }
}

fn map_event_error(error: &EventRepositoryError) -> Error {
    match error {
        EventRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("event store unavailable: {message}"))
        }
        EventRepositoryError::Query { message } => {
            Error::internal(format!("event store error: {message}"))
        }
    }
}

fn map_verification_error(error: &VerificationError) -> Error {
    match error {
        VerificationError::Ledger(CodeLedgerError::Connection { message }) => {
            Error::service_unavailable(format!("code ledger unavailable: {message}"))
        }
        VerificationError::Ledger(CodeLedgerError::Query { message }) => {
            Error::internal(format!("code ledger error: {message}"))
        }
        refused => {
            let reason = refused
                .outcome()
                .map_or("invalid", VerificationOutcome::as_label);
            Error::invalid_request(INVALID_CODE_MESSAGE).with_details(json!({ "reason": reason }))
        }
    }
}

fn map_proof_error(error: &ProofRepositoryError) -> Error {
    match error {
        ProofRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("proof store unavailable: {message}"))
        }
        ProofRepositoryError::Query { message } => {
            Error::internal(format!("proof store error: {message}"))
        }
        ProofRepositoryError::DuplicateProof { .. } => {
            Error::conflict("Proof already recorded for this code")
        }
    }
}

#[async_trait]
impl AttendanceCodeIssuer for AttendanceService {
    async fn issue(&self, event_id: &EventId) -> Result<IssuedCode, Error> {
        let event = self
            .events
            .find_by_id(event_id)
            .await
            .map_err(|err| map_event_error(&err))?
            .ok_or_else(|| Error::not_found("Event not found"))?;

        let generated = self.generator.generate(&event.id).map_err(|err| {
            error!(error = %err, event_id = %event.id, "failed to render code");
            Error::internal(format!("failed to render code: {err}"))
        })?;

        Ok(IssuedCode {
            event_id: event.id,
            event_name: event.name,
            code_string: generated.code_string,
            image: generated.image,
            issued_at: generated.issued_at,
            expires_at: generated.expires_at,
        })
    }
}

#[async_trait]
impl ProofClaimCommand for AttendanceService {
    async fn claim(&self, claim: ProofClaim) -> Result<ClaimReceipt, Error> {
        let ProofClaim {
            code,
            user_address,
            event_id,
        } = claim;

        let usage = match self.verifier.verify(&code).await {
            Ok(usage) => usage,
            Err(err) => {
                if let Some(outcome) = err.outcome() {
                    self.count_verification(outcome).await;
                }
                return Err(map_verification_error(&err));
            }
        };
        self.count_verification(VerificationOutcome::Accepted).await;

        if usage.event_id != event_id {
            warn!(
                content_hash = %usage.content_hash,
                code_event_id = %usage.event_id,
                requested_event_id = %event_id,
                "claimed event differs from code; recording code event"
            );
        }

        let (external_reference, token_id, placeholder) =
            self.external_reference(&user_address).await?;

        let proof = self
            .recorder
            .record(usage.content_hash, user_address, usage.event_id, external_reference)
            .await
            .map_err(|err| map_proof_error(&err))?;

        Ok(ClaimReceipt {
            proof,
            token_id,
            placeholder,
        })
    }
}

#[async_trait]
impl ProofQuery for AttendanceService {
    async fn list_for_user(&self, user_address: &UserAddress) -> Result<Vec<Proof>, Error> {
        self.recorder
            .list_for_user(user_address)
            .await
            .map_err(|err| map_proof_error(&err))
    }
}

#[cfg(test)]
mod tests;
