//! Single-use code verification.
//!
//! Checks run in a fixed order: parse, then expiry, then the ledger's atomic
//! insert-if-absent. Only the last step mutates state, so malformed and
//! expired submissions leave no trace.

use std::sync::Arc;

use mockable::Clock;
use tracing::{info, warn};

use super::ports::{CodeLedger, CodeLedgerError, VerificationOutcome};
use super::{AttendanceCode, CodeExpiry, CodeParseError, ContentHash, LedgerInsert, UsageRecord};

/// Why a submitted code was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerificationError {
    /// Not a well-formed code.
    #[error("malformed code: {0}")]
    Malformed(#[from] CodeParseError),
    /// Past its validity window.
    #[error("code issued at {issued_at} expired (now {now})")]
    Expired {
        /// Issue time embedded in the code.
        issued_at: i64,
        /// Verification time.
        now: i64,
    },
    /// Already consumed.
    #[error("code {content_hash} already used")]
    Replayed {
        /// Ledger key of the consumed code.
        content_hash: ContentHash,
    },
    /// The ledger could not answer.
    #[error(transparent)]
    Ledger(#[from] CodeLedgerError),
}

impl VerificationError {
    /// Terminal state for refusals; `None` for infrastructure failures.
    #[must_use]
    pub const fn outcome(&self) -> Option<VerificationOutcome> {
        match self {
            Self::Malformed(_) => Some(VerificationOutcome::Malformed),
            Self::Expired { .. } => Some(VerificationOutcome::Expired),
            Self::Replayed { .. } => Some(VerificationOutcome::Replayed),
            Self::Ledger(_) => None,
        }
    }
}

/// Verifies and consumes codes against a [`CodeLedger`].
#[derive(Clone)]
pub struct CodeVerifier {
    ledger: Arc<dyn CodeLedger>,
    clock: Arc<dyn Clock>,
    expiry: CodeExpiry,
}

impl CodeVerifier {
    /// Create a verifier sharing `expiry` with the generator.
    pub fn new(ledger: Arc<dyn CodeLedger>, clock: Arc<dyn Clock>, expiry: CodeExpiry) -> Self {
        Self {
            ledger,
            clock,
            expiry,
        }
    }

    /// Verify `raw` and mark it consumed.
    ///
    /// Returns the stored [`UsageRecord`] on acceptance. At most one caller
    /// ever succeeds for a given code, even under concurrent submission.
    pub async fn verify(&self, raw: &str) -> Result<UsageRecord, VerificationError> {
        let code = AttendanceCode::parse(raw).inspect_err(|error| {
            warn!(outcome = VerificationOutcome::Malformed.as_label(), %error, "code rejected");
        })?;
        let content_hash = code.content_hash();

        let now = self.clock.utc();
        let now_secs = now.timestamp();
        if self.expiry.is_expired(code.issued_at(), now_secs) {
            warn!(
                outcome = VerificationOutcome::Expired.as_label(),
                content_hash = %content_hash,
                event_id = %code.event_id(),
                issued_at = code.issued_at(),
                now = now_secs,
                "code rejected"
            );
            return Err(VerificationError::Expired {
                issued_at: code.issued_at(),
                now: now_secs,
            });
        }

        let record = UsageRecord {
            content_hash,
            event_id: code.event_id().clone(),
            verified_at: now,
        };
        match self.ledger.insert_if_absent(&record).await? {
            LedgerInsert::Inserted => {
                info!(
                    outcome = VerificationOutcome::Accepted.as_label(),
                    content_hash = %content_hash,
                    event_id = %record.event_id,
                    "code accepted"
                );
                Ok(record)
            }
            LedgerInsert::AlreadyPresent => {
                warn!(
                    outcome = VerificationOutcome::Replayed.as_label(),
                    content_hash = %content_hash,
                    event_id = %record.event_id,
                    "code rejected"
                );
                Err(VerificationError::Replayed { content_hash })
            }
        }
    }

    /// Boolean form of [`Self::verify`].
    pub async fn is_valid(&self, raw: &str) -> bool {
        self.verify(raw).await.is_ok()
    }
}
