//! Share, copy and social deep links
//!
//! Native sharing walks a fixed chain: share the image file, else share the
//! text, else copy the payload to the clipboard and report that sharing was
//! unavailable. A cancelled share is not an error.

mod backend;

pub use backend::{ClipboardHelper, ShareBackend, ShareRequest, SystemShare, serve_clipboard};

use crate::error::{Error, Result};
use crate::i18n::{Key, Locale};
use crate::uri::encode_component;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Lead-in used by every social share message
pub const SHARE_MESSAGE_PREFIX: &str = "Check out this QR code: ";

/// Social destinations reachable through a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareTarget {
    /// wa.me deep link
    WhatsApp,
    /// Telegram share URL
    Telegram,
    /// `mailto:` link
    Email,
    /// Tweet intent
    Twitter,
    /// `sms:` link
    Sms,
    /// LinkedIn share-offsite
    LinkedIn,
}

impl ShareTarget {
    /// All targets in menu order
    pub const ALL: [ShareTarget; 6] = [
        ShareTarget::WhatsApp,
        ShareTarget::Telegram,
        ShareTarget::Email,
        ShareTarget::Twitter,
        ShareTarget::Sms,
        ShareTarget::LinkedIn,
    ];

    /// Identifier accepted by [`FromStr`]
    pub fn as_str(self) -> &'static str {
        match self {
            ShareTarget::WhatsApp => "whatsapp",
            ShareTarget::Telegram => "telegram",
            ShareTarget::Email => "email",
            ShareTarget::Twitter => "twitter",
            ShareTarget::Sms => "sms",
            ShareTarget::LinkedIn => "linkedin",
        }
    }

    /// Deep link sharing `ctx` through this target
    pub fn link(self, ctx: &ShareContext) -> String {
        let message = encode_component(&ctx.message());
        let link = encode_component(&ctx.link);
        match self {
            ShareTarget::WhatsApp => format!("https://wa.me/?text={message}"),
            ShareTarget::Telegram => format!("https://t.me/share/url?url={link}&text={message}"),
            ShareTarget::Email => {
                let mut body = format!("{}\n\n", ctx.message());
                if let Some(image) = &ctx.image_data_url {
                    body.push_str(&format!("QR Code Image: {image}"));
                }
                format!(
                    "mailto:?subject={}&body={}",
                    encode_component(&ctx.subject),
                    encode_component(&body)
                )
            }
            ShareTarget::Twitter => format!("https://twitter.com/intent/tweet?text={message}"),
            ShareTarget::Sms => format!("sms:?body={message}"),
            ShareTarget::LinkedIn => {
                format!("https://www.linkedin.com/sharing/share-offsite/?url={link}")
            }
        }
    }
}

impl fmt::Display for ShareTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShareTarget {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let lowered = value.to_ascii_lowercase();
        match lowered.as_str() {
            "x" => Ok(ShareTarget::Twitter),
            "mail" => Ok(ShareTarget::Email),
            _ => ShareTarget::ALL
                .into_iter()
                .find(|target| target.as_str() == lowered)
                .ok_or_else(|| Error::Unknown {
                    kind: "share target",
                    value: value.to_string(),
                }),
        }
    }
}

/// What a social share talks about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareContext {
    /// Link being shared
    pub link: String,
    /// Email subject
    pub subject: String,
    /// PNG data URL appended to email bodies
    pub image_data_url: Option<String>,
}

impl ShareContext {
    /// Context for `link` with a localized subject
    pub fn new(link: impl Into<String>, locale: Locale) -> Self {
        Self {
            link: link.into(),
            subject: locale.t(Key::ShareQr).to_string(),
            image_data_url: None,
        }
    }

    /// Attach an image for email bodies
    pub fn with_image(mut self, data_url: String) -> Self {
        self.image_data_url = Some(data_url);
        self
    }

    /// `Check out this QR code: <link>`
    pub fn message(&self) -> String {
        format!("{SHARE_MESSAGE_PREFIX}{}", self.link)
    }
}

/// How a native share ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The image file was shared
    SharedFile,
    /// Only the text was shared
    SharedText,
    /// User dismissed the share
    Cancelled,
    /// Nothing to share
    Empty,
}

/// Share `payload` natively, falling back to the clipboard.
///
/// When both file and text sharing fail for a reason other than
/// cancellation, the payload is copied and [`Error::ShareFallback`] carries
/// the localized explanation.
pub fn share_payload<B: ShareBackend + ?Sized>(
    backend: &mut B,
    payload: &str,
    image: Option<&Path>,
    locale: Locale,
) -> Result<ShareOutcome> {
    if payload.is_empty() {
        return Ok(ShareOutcome::Empty);
    }

    let title = locale.t(Key::ShareQr);
    let text_request = ShareRequest {
        title: title.to_string(),
        text: payload.to_string(),
    };

    let attempt = match image {
        Some(file) => {
            let file_request = ShareRequest {
                title: title.to_string(),
                text: format!("{title}: {payload}"),
            };
            match backend.share_file(&file_request, file) {
                Ok(()) => Ok(ShareOutcome::SharedFile),
                Err(Error::ShareUnsupported(reason)) => {
                    tracing::debug!("File share unsupported ({reason}), sharing text");
                    backend
                        .share_text(&text_request)
                        .map(|()| ShareOutcome::SharedText)
                }
                Err(err) => Err(err),
            }
        }
        None => backend
            .share_text(&text_request)
            .map(|()| ShareOutcome::SharedText),
    };

    match attempt {
        Ok(outcome) => Ok(outcome),
        Err(Error::ShareCancelled) => {
            tracing::debug!("Share cancelled by user");
            Ok(ShareOutcome::Cancelled)
        }
        Err(err) => {
            tracing::warn!("Native share failed: {err}; copying payload instead");
            backend.copy_text(payload)?;
            Err(Error::ShareFallback(locale.t(Key::ShareError).to_string()))
        }
    }
}

/// Open the deep link for `target` and return it
pub fn share_to<B: ShareBackend + ?Sized>(
    backend: &mut B,
    target: ShareTarget,
    ctx: &ShareContext,
) -> Result<String> {
    let url = target.link(ctx);
    tracing::info!(%target, "Opening share link");
    backend.open_link(&url)?;
    Ok(url)
}

/// Copy the payload to the clipboard. Returns `false` when there was nothing to copy.
pub fn copy_payload<B: ShareBackend + ?Sized>(backend: &mut B, payload: &str) -> Result<bool> {
    if payload.is_empty() {
        return Ok(false);
    }
    backend.copy_text(payload)?;
    Ok(true)
}
