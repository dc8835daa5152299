//! Error types for qrcraft operations

use thiserror::Error;

/// Result type alias using qrcraft's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for qrcraft operations
#[derive(Error, Debug)]
pub enum Error {
    /// Nothing to encode; the form is empty
    #[error("Nothing to encode: the QR payload is empty")]
    EmptyPayload,

    /// QR code encoding failed
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// QR code decoding failed
    #[error("Failed to decode QR code: {0}")]
    QrDecode(String),

    /// No QR code found in image
    #[error("No QR code found in image")]
    NoQrCodeFound,

    /// Color string could not be parsed
    #[error("Invalid color '{0}': expected #rgb, #rrggbb, #rrggbbaa or a basic color name")]
    InvalidColor(String),

    /// Logo file is missing or not an image
    #[error("Invalid logo {path}: {reason}")]
    InvalidLogo {
        /// Path that was supplied
        path: String,
        /// Why it was rejected
        reason: String,
    },

    /// Every renderer in the fallback chain failed
    #[error("All QR renderers failed; last error: {0}")]
    RenderFailed(String),

    /// Remote rendering API failure
    #[error("Remote renderer {provider} failed: {reason}")]
    Remote {
        /// Provider name
        provider: &'static str,
        /// Failure description
        reason: String,
    },

    /// HTTP client failure outside a specific provider
    #[error("HTTP error: {0}")]
    Http(String),

    /// Sharing is not supported by the active backend
    #[error("Sharing not supported: {0}")]
    ShareUnsupported(String),

    /// User dismissed the share dialog
    #[error("Share cancelled")]
    ShareCancelled,

    /// Native share failed and the payload was copied to the clipboard instead
    #[error("{0}")]
    ShareFallback(String),

    /// Clipboard access failed
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Unknown share target or locale name
    #[error("Unknown {kind} '{value}'")]
    Unknown {
        /// What was being parsed
        kind: &'static str,
        /// Offending input
        value: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Other(format!("JSON error: {}", e))
    }
}

impl From<qrcode::types::QrError> for Error {
    fn from(e: qrcode::types::QrError) -> Self {
        Error::QrEncode(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Http(e.to_string())
    }
}
