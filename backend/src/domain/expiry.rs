//! Validity window shared by code generation and verification.

use std::time::Duration;

/// Smallest accepted window.
pub const MIN_EXPIRY_SECONDS: u64 = 1;
/// Largest accepted window (one day).
pub const MAX_EXPIRY_SECONDS: u64 = 86_400;
/// Window used when nothing is configured.
pub const DEFAULT_EXPIRY_SECONDS: u64 = 300;

/// How long a code stays redeemable after issue.
///
/// A code issued at `t` is expired at `now` when `now - t > seconds`; a
/// submission exactly `seconds` after issue is still accepted.
///
/// # Examples
/// ```
/// use culture_proof::domain::CodeExpiry;
///
/// let expiry = CodeExpiry::default();
/// assert!(!expiry.is_expired(1_000, 1_300));
/// assert!(expiry.is_expired(1_000, 1_301));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeExpiry {
    seconds: i64,
}

impl CodeExpiry {
    /// Build a window, clamping into `MIN_EXPIRY_SECONDS..=MAX_EXPIRY_SECONDS`.
    #[must_use]
    pub fn from_seconds(seconds: u64) -> Self {
        let clamped = seconds.clamp(MIN_EXPIRY_SECONDS, MAX_EXPIRY_SECONDS);
        Self {
            seconds: i64::try_from(clamped).unwrap_or(i64::MAX),
        }
    }

    /// Window length in seconds.
    #[must_use]
    pub const fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Window as a [`Duration`].
    #[must_use]
    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(self.seconds.unsigned_abs())
    }

    /// Expiry instant for a code issued at `issued_at`.
    #[must_use]
    pub const fn expires_at(&self, issued_at: i64) -> i64 {
        issued_at.saturating_add(self.seconds)
    }

    /// Whether a code issued at `issued_at` is past its window at `now`.
    ///
    /// Codes stamped in the future are not expired.
    #[must_use]
    pub const fn is_expired(&self, issued_at: i64, now: i64) -> bool {
        now.saturating_sub(issued_at) > self.seconds
    }
}

impl Default for CodeExpiry {
    fn default() -> Self {
        Self::from_seconds(DEFAULT_EXPIRY_SECONDS)
    }
}
