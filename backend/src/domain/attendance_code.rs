//! Attendance codes and their wire format.
//!
//! A code is the ASCII string `"{event_id}:{issued_at}:{nonce}"`. The string
//! is the code; everything else is derived from it. The ledger keys usage by
//! [`ContentHash`], the SHA-256 digest of the canonical encoding, so two
//! spellings of the same timestamp (`"1000"` and `"+1000"`) cannot be used to
//! redeem one code twice.

use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::event::EventId;

const DELIMITER: char = ':';

/// Random, unguessable component of a code.
///
/// Generated nonces are UUID v4 strings. Parsed nonces only need to be
/// non-empty; the ledger does not care how they were produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Nonce(String);

impl Nonce {
    /// Draw a fresh random nonce.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    fn parse(raw: &str) -> Result<Self, CodeParseError> {
        if raw.is_empty() {
            return Err(CodeParseError::EmptyNonce);
        }
        Ok(Self(raw.to_owned()))
    }
}

impl AsRef<str> for Nonce {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Reasons a submitted string is not a well-formed code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodeParseError {
    /// The string did not split into exactly three fields.
    #[error("expected 3 ':'-delimited fields, found {found}")]
    FieldCount {
        /// Number of fields present.
        found: usize,
    },
    /// The event id field was empty or otherwise invalid.
    #[error("invalid event id field")]
    InvalidEventId,
    /// The timestamp field was not an integer.
    #[error("timestamp field is not an integer")]
    InvalidTimestamp,
    /// The nonce field was empty.
    #[error("nonce field is empty")]
    EmptyNonce,
}

/// SHA-256 digest of a canonical code string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Hash an arbitrary code string.
    #[must_use]
    pub fn of(code: &str) -> Self {
        Self(Sha256::digest(code.as_bytes()).into())
    }

    /// Wrap a raw digest.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex rendering.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a 64 character hex digest.
    pub fn from_hex(raw: &str) -> Result<Self, hex::FromHexError> {
        let mut bytes = [0_u8; 32];
        hex::decode_to_slice(raw, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<&[u8]> for ContentHash {
    type Error = std::array::TryFromSliceError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Ok(Self(<[u8; 32]>::try_from(value)?))
    }
}

/// A single-use attendance code.
///
/// # Examples
/// ```
/// use culture_proof::domain::{AttendanceCode, EventId, Nonce};
///
/// let code = AttendanceCode::new(EventId::new("3").expect("id"), 1_000, Nonce::random());
/// let parsed = AttendanceCode::parse(&code.encode()).expect("round trip");
/// assert_eq!(parsed.event_id().as_ref(), "3");
/// assert_eq!(parsed.issued_at(), 1_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceCode {
    event_id: EventId,
    issued_at: i64,
    nonce: Nonce,
}

impl AttendanceCode {
    /// Assemble a code from its parts.
    #[must_use]
    pub const fn new(event_id: EventId, issued_at: i64, nonce: Nonce) -> Self {
        Self {
            event_id,
            issued_at,
            nonce,
        }
    }

    /// Parse the wire form.
    pub fn parse(raw: &str) -> Result<Self, CodeParseError> {
        let fields: Vec<&str> = raw.split(DELIMITER).collect();
        let [event_id, issued_at, nonce] = fields.as_slice() else {
            return Err(CodeParseError::FieldCount {
                found: fields.len(),
            });
        };
        let event_id = EventId::new(*event_id).map_err(|_| CodeParseError::InvalidEventId)?;
        let issued_at = issued_at
            .parse::<i64>()
            .map_err(|_| CodeParseError::InvalidTimestamp)?;
        let nonce = Nonce::parse(nonce)?;
        Ok(Self::new(event_id, issued_at, nonce))
    }

    /// Canonical wire form.
    #[must_use]
    pub fn encode(&self) -> String {
        format!(
            "{}{DELIMITER}{}{DELIMITER}{}",
            self.event_id,
            self.issued_at,
            self.nonce.as_ref()
        )
    }

    /// Ledger key for this code.
    #[must_use]
    pub fn content_hash(&self) -> ContentHash {
        ContentHash::of(&self.encode())
    }

    /// Event the code was issued for.
    #[must_use]
    pub const fn event_id(&self) -> &EventId {
        &self.event_id
    }

    /// Issue time in Unix seconds.
    #[must_use]
    pub const fn issued_at(&self) -> i64 {
        self.issued_at
    }

    /// Random component.
    #[must_use]
    pub const fn nonce(&self) -> &Nonce {
        &self.nonce
    }
}
