//! Port for turning a code string into a scannable image.

use super::define_port_error;

define_port_error! {
    /// Errors raised while rendering a QR image.
    pub enum QrRenderError {
        /// The payload does not fit in a QR symbol.
        Encode { message: String } => "qr payload could not be encoded: {message}",
        /// The rendered symbol could not be written as an image.
        Image { message: String } => "qr image could not be written: {message}",
    }
}

/// A rendered image as a `data:` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrImage(String);

impl QrImage {
    /// Wrap an already built data URI.
    pub fn from_data_uri(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// The data URI, ready to drop into an `<img src>`.
    #[must_use]
    pub fn as_data_uri(&self) -> &str {
        self.0.as_str()
    }
}

impl From<QrImage> for String {
    fn from(value: QrImage) -> Self {
        value.0
    }
}

/// Renders payloads to images.
///
/// Rendering is CPU-bound and synchronous.
#[cfg_attr(test, mockall::automock)]
pub trait QrRenderer: Send + Sync {
    /// Render `payload` as a QR image.
    fn render(&self, payload: &str) -> Result<QrImage, QrRenderError>;
}
