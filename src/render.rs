//! Rendering pipeline with a linear fallback chain
//!
//! The in-process encoder is tried first. When it cannot produce a code the
//! payload is handed to remote image APIs in order, and the first image that
//! comes back wins. Remote images ignore colors and logos.

use crate::config::RenderOptions;
use crate::error::{Error, Result};
use crate::qr::{Customization, QrDecoder, QrEncoder, QrPayload, RenderSource, RenderedQr};
use crate::uri::encode_component;
use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;

/// A remote service that turns a payload into a PNG
#[async_trait]
pub trait RemoteRenderer: Send + Sync {
    /// Short provider name for logs and output
    fn name(&self) -> &'static str;

    /// Fetch the encoded image bytes
    async fn fetch(&self, payload: &str, size: u32) -> Result<Bytes>;
}

/// Known public QR image APIs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteProvider {
    /// Google Chart API
    GoogleChart,
    /// goqr.me QR Server API
    QrServer,
}

impl RemoteProvider {
    /// Fallback order
    pub const CHAIN: [RemoteProvider; 2] = [RemoteProvider::GoogleChart, RemoteProvider::QrServer];

    /// Provider name
    pub fn name(self) -> &'static str {
        match self {
            RemoteProvider::GoogleChart => "google-chart",
            RemoteProvider::QrServer => "qrserver",
        }
    }

    /// Image URL for `payload` at `size` x `size` pixels
    pub fn image_url(self, payload: &str, size: u32) -> String {
        let data = encode_component(payload);
        match self {
            RemoteProvider::GoogleChart => format!(
                "https://chart.googleapis.com/chart?chs={size}x{size}&cht=qr&chl={data}&choe=UTF-8"
            ),
            RemoteProvider::QrServer => format!(
                "https://api.qrserver.com/v1/create-qr-code/?size={size}x{size}&data={data}&format=png&margin=10"
            ),
        }
    }
}

/// [`RemoteRenderer`] backed by an HTTP GET
pub struct HttpRemote {
    provider: RemoteProvider,
    client: reqwest::Client,
}

impl HttpRemote {
    /// Wrap `provider` using a shared client
    pub fn new(provider: RemoteProvider, client: reqwest::Client) -> Self {
        Self { provider, client }
    }
}

#[async_trait]
impl RemoteRenderer for HttpRemote {
    fn name(&self) -> &'static str {
        self.provider.name()
    }

    async fn fetch(&self, payload: &str, size: u32) -> Result<Bytes> {
        let url = self.provider.image_url(payload, size);
        let remote_err = |reason: String| Error::Remote {
            provider: self.provider.name(),
            reason,
        };

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| remote_err(e.to_string()))?
            .error_for_status()
            .map_err(|e| remote_err(e.to_string()))?;

        response.bytes().await.map_err(|e| remote_err(e.to_string()))
    }
}

/// Local encoder plus remote fallbacks
pub struct QrRenderer {
    encoder: QrEncoder,
    decoder: QrDecoder,
    remotes: Vec<Box<dyn RemoteRenderer>>,
    verify: bool,
}

impl QrRenderer {
    /// Build a renderer from configuration, wiring the public APIs when enabled.
    pub fn from_options(options: &RenderOptions) -> Result<Self> {
        let mut renderer = Self::local_only(options);

        if options.remote_fallback {
            let client = reqwest::Client::builder()
                .timeout(Duration::from_secs(options.timeout_secs.max(1)))
                .build()?;
            for provider in RemoteProvider::CHAIN {
                renderer = renderer.with_remote(HttpRemote::new(provider, client.clone()));
            }
        }

        Ok(renderer)
    }

    /// Renderer with no remote fallbacks
    pub fn local_only(options: &RenderOptions) -> Self {
        Self {
            encoder: QrEncoder::new().with_canvas_size(options.size),
            decoder: QrDecoder::new(),
            remotes: Vec::new(),
            verify: options.verify,
        }
    }

    /// Append a remote renderer to the end of the chain
    pub fn with_remote(mut self, remote: impl RemoteRenderer + 'static) -> Self {
        self.remotes.push(Box::new(remote));
        self
    }

    /// The in-process encoder
    pub fn encoder(&self) -> &QrEncoder {
        &self.encoder
    }

    /// Render `payload`, falling back to remote APIs if local encoding fails.
    pub async fn render(&self, payload: &str, customization: &Customization) -> Result<RenderedQr> {
        let qr = QrPayload::from_string(payload.to_string());
        if qr.is_blank() {
            return Err(Error::EmptyPayload);
        }

        if customization.low_contrast() {
            tracing::warn!(
                foreground = %customization.foreground,
                background = %customization.background,
                "Low contrast colors may not scan reliably"
            );
        }

        let local_err = match self.encoder.encode(&qr, customization) {
            Ok(image) => {
                if self.verify && customization.logo.is_some() && !self.decoder.verify(&image, payload) {
                    tracing::warn!(
                        logo_size = customization.effective_logo_size(),
                        "Logo overlay may prevent scanning; try a smaller logo"
                    );
                }
                return Ok(RenderedQr {
                    payload: payload.to_string(),
                    image,
                    source: RenderSource::Local,
                });
            }
            Err(err @ Error::InvalidLogo { .. }) => return Err(err),
            Err(err) => err,
        };

        tracing::warn!("Local QR encoding failed: {local_err}");
        let mut last_error = local_err.to_string();

        for remote in &self.remotes {
            tracing::info!(provider = remote.name(), "Trying remote QR renderer");
            let attempt = match remote.fetch(payload, self.encoder.canvas_size()).await {
                Ok(bytes) => image::load_from_memory(&bytes).map_err(Error::from),
                Err(err) => Err(err),
            };

            match attempt {
                Ok(image) => {
                    return Ok(RenderedQr {
                        payload: payload.to_string(),
                        image: image.to_rgba8(),
                        source: RenderSource::Remote(remote.name()),
                    });
                }
                Err(err) => {
                    tracing::warn!(provider = remote.name(), "Remote renderer failed: {err}");
                    last_error = err.to_string();
                }
            }
        }

        Err(Error::RenderFailed(last_error))
    }
}
