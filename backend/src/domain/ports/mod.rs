//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod attendance;
mod code_ledger;
mod event_repository;
mod minting_service;
mod proof_metrics;
mod proof_repository;
mod qr_renderer;

#[cfg(test)]
pub use attendance::{MockAttendanceCodeIssuer, MockProofClaimCommand, MockProofQuery};
pub use attendance::{
    AttendanceCodeIssuer, ClaimReceipt, IssuedCode, ProofClaim, ProofClaimCommand, ProofQuery,
};
#[cfg(test)]
pub use code_ledger::MockCodeLedger;
pub use code_ledger::{CodeLedger, CodeLedgerError};
#[cfg(test)]
pub use event_repository::MockEventRepository;
pub use event_repository::{EventRepository, EventRepositoryError};
#[cfg(test)]
pub use minting_service::MockMintingService;
pub use minting_service::{
    DisabledMintingService, MintFailurePolicy, MintReceipt, MintingError, MintingService,
    UnknownMintFailurePolicy,
};
#[cfg(test)]
pub use proof_metrics::MockProofMetrics;
pub use proof_metrics::{NoOpProofMetrics, ProofMetrics, ProofMetricsError, VerificationOutcome};
#[cfg(test)]
pub use proof_repository::MockProofRepository;
pub use proof_repository::{ProofRepository, ProofRepositoryError};
#[cfg(test)]
pub use qr_renderer::MockQrRenderer;
pub use qr_renderer::{QrImage, QrRenderError, QrRenderer};
