//! Prometheus adapter for proof lifecycle metrics.
//!
//! - `culture_proof_verifications_total{outcome}`: verification attempts by
//!   terminal state (`accepted`, `malformed`, `expired`, `replayed`).
//! - `culture_proof_mint_fallbacks_total`: proofs recorded with a placeholder
//!   reference because minting failed.

use async_trait::async_trait;
use prometheus::{IntCounter, IntCounterVec, Opts, Registry};

use crate::domain::ports::{ProofMetrics, ProofMetricsError, VerificationOutcome};

/// Prometheus-backed proof metrics recorder.
pub struct PrometheusProofMetrics {
    verifications_total: IntCounterVec,
    mint_fallbacks_total: IntCounter,
}

impl PrometheusProofMetrics {
    /// Create and register metrics with `registry`.
    ///
    /// # Errors
    ///
    /// Returns an error if either metric is already registered.
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let verifications_total = IntCounterVec::new(
            Opts::new(
                "culture_proof_verifications_total",
                "Attendance code verification attempts by outcome",
            ),
            &["outcome"],
        )?;
        let mint_fallbacks_total = IntCounter::new(
            "culture_proof_mint_fallbacks_total",
            "Proofs recorded with a placeholder reference after a minting failure",
        )?;
        registry.register(Box::new(verifications_total.clone()))?;
        registry.register(Box::new(mint_fallbacks_total.clone()))?;
        Ok(Self {
            verifications_total,
            mint_fallbacks_total,
        })
    }
}

#[async_trait]
impl ProofMetrics for PrometheusProofMetrics {
    async fn record_verification(&self, outcome: VerificationOutcome) -> Result<(), ProofMetricsError> {
        self.verifications_total
            .get_metric_with_label_values(&[outcome.as_label()])
            .map_err(|err| ProofMetricsError::export(err.to_string()))?
            .inc();
        Ok(())
    }

    async fn record_mint_fallback(&self) -> Result<(), ProofMetricsError> {
        self.mint_fallbacks_total.inc();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[tokio::test]
    async fn counts_outcomes_by_label() {
        let registry = Registry::new();
        let metrics = PrometheusProofMetrics::new(&registry).expect("register");

        metrics
            .record_verification(VerificationOutcome::Replayed)
            .await
            .expect("record");
        metrics
            .record_verification(VerificationOutcome::Replayed)
            .await
            .expect("record");
        metrics
            .record_verification(VerificationOutcome::Accepted)
            .await
            .expect("record");

        assert_eq!(metrics.verifications_total.with_label_values(&["replayed"]).get(), 2);
        assert_eq!(metrics.verifications_total.with_label_values(&["accepted"]).get(), 1);
    }

    #[tokio::test]
    async fn counts_mint_fallbacks() {
        let registry = Registry::new();
        let metrics = PrometheusProofMetrics::new(&registry).expect("register");
        metrics.record_mint_fallback().await.expect("record");

        assert_eq!(metrics.mint_fallbacks_total.get(), 1);
        assert!(
            registry
                .gather()
                .iter()
                .any(|family| family.name() == "culture_proof_mint_fallbacks_total")
        );
    }

    #[test]
    fn double_registration_fails() {
        let registry = Registry::new();
        PrometheusProofMetrics::new(&registry).expect("first");
        assert!(PrometheusProofMetrics::new(&registry).is_err());
    }
}
