//! Culture proof backend.
//!
//! Issues short-lived single-use attendance codes for cultural events,
//! verifies them exactly once, and records proofs of attendance for the
//! redeeming wallet.
//!
//! - [`domain`]: value types, services and ports.
//! - [`inbound`]: actix-web handlers.
//! - [`outbound`]: storage, minting, QR and metrics adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
