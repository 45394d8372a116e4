//! Port for recording verification and minting outcomes.
//!
//! Keeps the domain independent of the metrics backend. Failures to record
//! are logged by callers and never fail a request.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors exposed when recording proof metrics.
    pub enum ProofMetricsError {
        /// Metric exporter rejected the write.
        Export { message: String } => "proof metrics exporter failed: {message}",
    }
}

/// Terminal state of one verification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerificationOutcome {
    /// Code consumed.
    Accepted,
    /// Not a well-formed code.
    Malformed,
    /// Past its validity window.
    Expired,
    /// Already consumed.
    Replayed,
}

impl VerificationOutcome {
    /// Stable label used in logs and metrics.
    #[must_use]
    pub const fn as_label(self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Malformed => "malformed",
            Self::Expired => "expired",
            Self::Replayed => "replayed",
        }
    }
}

/// Metrics recording port for the proof lifecycle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProofMetrics: Send + Sync {
    /// Count one verification attempt by outcome.
    async fn record_verification(&self, outcome: VerificationOutcome) -> Result<(), ProofMetricsError>;

    /// Count a proof recorded with a placeholder reference.
    async fn record_mint_fallback(&self) -> Result<(), ProofMetricsError>;
}

/// No-op implementation for when metrics are disabled or in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpProofMetrics;

#[async_trait]
impl ProofMetrics for NoOpProofMetrics {
    async fn record_verification(&self, _outcome: VerificationOutcome) -> Result<(), ProofMetricsError> {
        Ok(())
    }

    async fn record_mint_fallback(&self) -> Result<(), ProofMetricsError> {
        Ok(())
    }
}
