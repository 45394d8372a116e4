//! Domain primitives, services and ports.
//!
//! Purpose: model attendance codes, their single-use verification, and the
//! proofs recorded for redeemed codes, independently of HTTP or storage.
//!
//! Public surface:
//! - [`AttendanceCode`] and [`ContentHash`]: the code wire format and ledger key.
//! - [`CodeGenerator`], [`CodeVerifier`], [`ProofRecorder`]: lifecycle steps.
//! - [`AttendanceService`]: implements the driving ports in [`ports`].
//! - [`Error`] and [`ErrorCode`]: transport-agnostic failures.

pub mod attendance_code;
pub mod attendance_service;
pub mod code_generator;
pub mod error;
pub mod event;
pub mod expiry;
pub mod ports;
pub mod proof;
pub mod proof_recorder;
pub mod trace_id;
pub mod usage;
pub mod verifier;

pub use self::attendance_code::{AttendanceCode, CodeParseError, ContentHash, Nonce};
pub use self::attendance_service::{AttendanceService, AttendanceServiceParts, INVALID_CODE_MESSAGE};
pub use self::code_generator::{CodeGenerator, GeneratedCode};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::event::{Event, EventId, EventIdValidationError};
pub use self::expiry::{CodeExpiry, DEFAULT_EXPIRY_SECONDS};
pub use self::proof::{ExternalReference, Proof, UserAddress, UserAddressValidationError};
pub use self::proof_recorder::ProofRecorder;
pub use self::trace_id::TraceId;
pub use self::usage::{LedgerInsert, UsageRecord};
pub use self::verifier::{CodeVerifier, VerificationError};

/// Convenient result alias for domain use-cases.
pub type ApiResult<T> = Result<T, Error>;
