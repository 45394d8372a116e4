//! Shared harness for integration tests: in-memory adapters and a clock the
//! test can move.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::sync::Arc;

use culture_proof::domain::ports::{DisabledMintingService, MintFailurePolicy, NoOpProofMetrics};
use culture_proof::domain::{
    AttendanceService, AttendanceServiceParts, CodeExpiry, CodeGenerator, CodeVerifier,
    ProofRecorder,
};
use culture_proof::outbound::memory::{
    InMemoryCodeLedger, InMemoryEventRepository, InMemoryProofRepository, demo_events,
};
use culture_proof::outbound::qr::QrCodePngRenderer;
use culture_proof::test_support::MutableClock;

/// Service wired to in-memory stores, plus handles on those stores.
pub struct Harness {
    pub clock: Arc<MutableClock>,
    pub ledger: Arc<InMemoryCodeLedger>,
    pub proofs: Arc<InMemoryProofRepository>,
    pub verifier: CodeVerifier,
    pub service: Arc<AttendanceService>,
}

impl Harness {
    /// Default five-minute window, demo catalogue, minting disabled with
    /// placeholder fallback.
    pub fn start_at(seconds: i64) -> Self {
        let clock = Arc::new(MutableClock::at_unix(seconds));
        let ledger = Arc::new(InMemoryCodeLedger::new());
        let proofs = Arc::new(InMemoryProofRepository::new());
        let expiry = CodeExpiry::default();
        let verifier = CodeVerifier::new(ledger.clone(), clock.clone(), expiry);
        let service = AttendanceService::new(AttendanceServiceParts {
            events: Arc::new(InMemoryEventRepository::with_events(demo_events())),
            generator: CodeGenerator::new(clock.clone(), Arc::new(QrCodePngRenderer::new()), expiry),
            verifier: verifier.clone(),
            recorder: ProofRecorder::new(proofs.clone(), clock.clone()),
            minting: Arc::new(DisabledMintingService),
            metrics: Arc::new(NoOpProofMetrics),
            mint_failure_policy: MintFailurePolicy::Placeholder,
        });
        Self {
            clock,
            ledger,
            proofs,
            verifier,
            service: Arc::new(service),
        }
    }
}
