//! Tests for the attendance use-cases.

use super::*;
use crate::domain::ports::{
    MintReceipt, MintingError, MockCodeLedger, MockEventRepository, MockMintingService,
    MockProofMetrics, MockProofRepository, MockQrRenderer, NoOpProofMetrics, QrImage,
};
use crate::domain::{AttendanceCode, CodeExpiry, ErrorCode, Event, LedgerInsert, Nonce};
use crate::test_support::MutableClock;
use rstest::{fixture, rstest};

const NOW: i64 = 1_000;

struct Doubles {
    events: MockEventRepository,
    ledger: MockCodeLedger,
    proofs: MockProofRepository,
    minting: MockMintingService,
    metrics: Arc<dyn ProofMetrics>,
    policy: MintFailurePolicy,
}

impl Doubles {
    fn build(self) -> AttendanceService {
        let clock = Arc::new(MutableClock::at_unix(NOW));
        let mut renderer = MockQrRenderer::new();
        renderer
            .expect_render()
            .returning(|_| Ok(QrImage::from_data_uri("data:image/png;base64,AA==")));
        let expiry = CodeExpiry::default();
        AttendanceService::new(AttendanceServiceParts {
            events: Arc::new(self.events),
            generator: CodeGenerator::new(clock.clone(), Arc::new(renderer), expiry),
            verifier: CodeVerifier::new(Arc::new(self.ledger), clock.clone(), expiry),
            recorder: ProofRecorder::new(Arc::new(self.proofs), clock),
            minting: Arc::new(self.minting),
            metrics: self.metrics,
            mint_failure_policy: self.policy,
        })
    }
}

#[fixture]
fn doubles() -> Doubles {
    Doubles {
        events: MockEventRepository::new(),
        ledger: MockCodeLedger::new(),
        proofs: MockProofRepository::new(),
        minting: MockMintingService::new(),
        metrics: Arc::new(NoOpProofMetrics),
        policy: MintFailurePolicy::Placeholder,
    }
}

fn event_id(raw: &str) -> EventId {
    EventId::new(raw).expect("event id")
}

fn claim_for(code_event: &str, requested_event: &str) -> ProofClaim {
    ProofClaim {
        code: AttendanceCode::new(event_id(code_event), NOW - 10, Nonce::random()).encode(),
        user_address: UserAddress::new("0xABC").expect("address"),
        event_id: event_id(requested_event),
    }
}

fn accept_codes(ledger: &mut MockCodeLedger) {
    ledger
        .expect_insert_if_absent()
        .returning(|_| Ok(LedgerInsert::Inserted));
}

#[rstest]
#[tokio::test]
async fn issue_returns_event_name_and_window(mut doubles: Doubles) {
    doubles.events.expect_find_by_id().returning(|id| {
        Ok(Some(Event::new(id.clone(), "Cultural Dance Night", "Auditorium")))
    });
    let issued = doubles.build().issue(&event_id("3")).await.expect("issue");
    assert_eq!(issued.event_name, "Cultural Dance Night");
    assert_eq!(issued.issued_at, NOW);
    assert_eq!(issued.expires_at, NOW + 300);
    assert!(issued.code_string.starts_with("3:1000:"));
}

#[rstest]
#[tokio::test]
async fn issue_unknown_event_is_not_found(mut doubles: Doubles) {
    doubles.events.expect_find_by_id().returning(|_| Ok(None));
    let err = doubles.build().issue(&event_id("99")).await.expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "Event not found");
}

#[rstest]
#[tokio::test]
async fn issue_maps_store_outage_to_unavailable(mut doubles: Doubles) {
    doubles
        .events
        .expect_find_by_id()
        .returning(|_| Err(EventRepositoryError::connection("refused")));
    let err = doubles.build().issue(&event_id("1")).await.expect_err("outage");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn claim_records_minted_reference(mut doubles: Doubles) {
    accept_codes(&mut doubles.ledger);
    doubles.minting.expect_mint().times(1).returning(|_| {
        Ok(MintReceipt {
            external_reference: ExternalReference::new("0xabc123"),
            token_id: Some(7),
        })
    });
    doubles.proofs.expect_insert().times(1).returning(|_| Ok(()));

    let receipt = doubles.build().claim(claim_for("1", "1")).await.expect("claim");
    assert_eq!(receipt.proof.external_reference.as_ref(), "0xabc123");
    assert_eq!(receipt.token_id, Some(7));
    assert!(!receipt.placeholder);
}

#[rstest]
#[tokio::test]
async fn claim_falls_back_to_placeholder_and_counts_it(mut doubles: Doubles) {
    accept_codes(&mut doubles.ledger);
    doubles
        .minting
        .expect_mint()
        .returning(|_| Err(MintingError::transport("timeout")));
    doubles.proofs.expect_insert().returning(|_| Ok(()));
    let mut metrics = MockProofMetrics::new();
    metrics
        .expect_record_verification()
        .withf(|outcome| *outcome == VerificationOutcome::Accepted)
        .times(1)
        .returning(|_| Ok(()));
    metrics.expect_record_mint_fallback().times(1).returning(|| Ok(()));
    doubles.metrics = Arc::new(metrics);

    let receipt = doubles.build().claim(claim_for("2", "2")).await.expect("claim");
    assert!(receipt.placeholder);
    assert!(receipt.proof.external_reference.as_ref().starts_with("0x"));
    assert_eq!(receipt.token_id, None);
}

#[rstest]
#[tokio::test]
async fn claim_rejects_when_policy_is_strict(mut doubles: Doubles) {
    accept_codes(&mut doubles.ledger);
    doubles
        .minting
        .expect_mint()
        .returning(|_| Err(MintingError::rejected(502_u16, "bad gateway")));
    doubles.proofs.expect_insert().times(0);
    doubles.policy = MintFailurePolicy::Reject;

    let err = doubles.build().claim(claim_for("1", "1")).await.expect_err("strict");
    assert_eq!(err.code(), ErrorCode::ExternalService);
    assert_eq!(err.message(), "Error minting proof");
}

#[rstest]
#[tokio::test]
async fn claim_records_code_event_when_request_disagrees(mut doubles: Doubles) {
    accept_codes(&mut doubles.ledger);
    doubles.minting.expect_mint().returning(|_| Err(MintingError::not_configured()));
    doubles
        .proofs
        .expect_insert()
        .withf(|proof| proof.event_id.as_ref() == "4")
        .times(1)
        .returning(|_| Ok(()));

    let receipt = doubles.build().claim(claim_for("4", "1")).await.expect("claim");
    assert_eq!(receipt.proof.event_id.as_ref(), "4");
}

#[rstest]
#[tokio::test]
async fn replayed_code_is_bad_request_without_minting(mut doubles: Doubles) {
    doubles
        .ledger
        .expect_insert_if_absent()
        .returning(|_| Ok(LedgerInsert::AlreadyPresent));
    doubles.minting.expect_mint().times(0);
    let mut metrics = MockProofMetrics::new();
    metrics
        .expect_record_verification()
        .withf(|outcome| *outcome == VerificationOutcome::Replayed)
        .times(1)
        .returning(|_| Ok(()));
    doubles.metrics = Arc::new(metrics);

    let err = doubles.build().claim(claim_for("1", "1")).await.expect_err("replay");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), INVALID_CODE_MESSAGE);
    assert_eq!(err.details(), Some(&json!({ "reason": "replayed" })));
}

#[rstest]
#[tokio::test]
async fn malformed_code_is_bad_request(mut doubles: Doubles) {
    doubles.ledger.expect_insert_if_absent().times(0);
    let mut claim = claim_for("1", "1");
    claim.code = "not-a-code".to_owned();

    let err = doubles.build().claim(claim).await.expect_err("malformed");
    assert_eq!(err.details(), Some(&json!({ "reason": "malformed" })));
}

#[rstest]
#[tokio::test]
async fn duplicate_proof_is_conflict(mut doubles: Doubles) {
    accept_codes(&mut doubles.ledger);
    doubles.minting.expect_mint().returning(|_| Err(MintingError::not_configured()));
    doubles
        .proofs
        .expect_insert()
        .returning(|proof| Err(ProofRepositoryError::duplicate_proof(proof.content_hash.to_hex())));

    let err = doubles.build().claim(claim_for("1", "1")).await.expect_err("dup");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn list_maps_query_failures_to_internal(mut doubles: Doubles) {
    doubles
        .proofs
        .expect_list_for_user()
        .returning(|_| Err(ProofRepositoryError::query("syntax")));
    let address = UserAddress::new("0xABC").expect("address");
    let err = doubles.build().list_for_user(&address).await.expect_err("query");
    assert_eq!(err.code(), ErrorCode::InternalError);
}
