//! qrcraft - QR codes for links, text and contact cards
//!
//! Turns form input into a QR payload, renders it with custom colors and an
//! optional centred logo, and offers download, copy and share affordances.
//!
//! # Features
//!
//! - **Payloads**: URL normalisation, free text, vCard 3.0 contact cards
//! - **Customization**: foreground/background colors, logo overlay at 10-30%
//! - **Fallbacks**: local encoder first, then public QR image APIs
//! - **Sharing**: native share chain with clipboard fallback, social deep links
//! - **Localization**: English and Spanish, with a persisted preference
//!
//! # Example
//!
//! ```no_run
//! use qrcraft::{FormState, QrGenerator, RenderOptions, TabType};
//!
//! #[tokio::main]
//! async fn main() -> qrcraft::Result<()> {
//!     let generator = QrGenerator::new(&RenderOptions::default())?;
//!
//!     let mut form = FormState::default();
//!     form.active_tab = TabType::Url;
//!     form.url_input = "example.com".to_string();
//!
//!     if let Some(rendered) = generator.generate(&form).await? {
//!         rendered.image.save("qr-code-url.png")?;
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod color;
pub mod config;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod output;
pub mod payload;
pub mod qr;
pub mod render;
pub mod share;
pub mod uri;

// Re-exports for convenience
pub use error::{Error, Result};

pub use color::Color;
pub use config::{LogRotation, LoggingOptions, OutputOptions, QrcraftConfig, RenderOptions, ShareOptions};
pub use i18n::{Key, Locale, PreferenceStore};
pub use output::OutputFormat;
pub use payload::{ContactInfo, FormState, TabType, format_url, generate_vcard};
pub use qr::{Customization, QrDecoder, QrEncoder, QrPayload, RenderSource, RenderedQr};
pub use render::{QrRenderer, RemoteProvider, RemoteRenderer};
pub use share::{ShareBackend, ShareContext, ShareOutcome, ShareTarget, SystemShare};

/// High-level interface turning form state into rendered codes
pub struct QrGenerator {
    renderer: QrRenderer,
}

impl QrGenerator {
    /// Create a generator with the configured fallback chain
    pub fn new(options: &RenderOptions) -> Result<Self> {
        Ok(Self {
            renderer: QrRenderer::from_options(options)?,
        })
    }

    /// Wrap an existing renderer
    pub fn with_renderer(renderer: QrRenderer) -> Self {
        Self { renderer }
    }

    /// The underlying renderer
    pub fn renderer(&self) -> &QrRenderer {
        &self.renderer
    }

    /// Render the form's payload. `None` means the form is empty and any
    /// previous code should be cleared.
    pub async fn generate(&self, form: &FormState) -> Result<Option<RenderedQr>> {
        let payload = form.payload();
        if payload.trim().is_empty() {
            tracing::debug!(tab = %form.active_tab, "Form is empty, nothing to render");
            return Ok(None);
        }

        let rendered = self.renderer.render(&payload, &form.customization).await?;
        tracing::info!(
            tab = %form.active_tab,
            bytes = payload.len(),
            source = ?rendered.source,
            "Generated QR code"
        );
        Ok(Some(rendered))
    }
}
