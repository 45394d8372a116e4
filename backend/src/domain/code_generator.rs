//! Attendance code generation.
//!
//! Generation is pure apart from reading the clock and drawing a nonce: it
//! never touches the ledger, and expiry is only enforced at verification.

use std::sync::Arc;

use mockable::Clock;

use super::ports::{QrImage, QrRenderError, QrRenderer};
use super::{AttendanceCode, CodeExpiry, EventId, Nonce};

/// Output of [`CodeGenerator::generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCode {
    /// Structured code.
    pub code: AttendanceCode,
    /// Wire form, the value encoded in the image.
    pub code_string: String,
    /// QR rendering.
    pub image: QrImage,
    /// Issue time in Unix seconds.
    pub issued_at: i64,
    /// `issued_at` plus the expiry window.
    pub expires_at: i64,
}

/// Builds fresh codes from the injected clock and renderer.
#[derive(Clone)]
pub struct CodeGenerator {
    clock: Arc<dyn Clock>,
    renderer: Arc<dyn QrRenderer>,
    expiry: CodeExpiry,
}

impl CodeGenerator {
    /// Create a generator sharing `expiry` with the verifier.
    pub fn new(clock: Arc<dyn Clock>, renderer: Arc<dyn QrRenderer>, expiry: CodeExpiry) -> Self {
        Self {
            clock,
            renderer,
            expiry,
        }
    }

    /// Generate a new code for `event_id`.
    ///
    /// Event existence is checked by the caller.
    pub fn generate(&self, event_id: &EventId) -> Result<GeneratedCode, QrRenderError> {
        let issued_at = self.clock.utc().timestamp();
        let code = AttendanceCode::new(event_id.clone(), issued_at, Nonce::random());
        let code_string = code.encode();
        let image = self.renderer.render(&code_string)?;
        Ok(GeneratedCode {
            code,
            code_string,
            image,
            issued_at,
            expires_at: self.expiry.expires_at(issued_at),
        })
    }
}
