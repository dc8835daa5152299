//! Helpers for saving rendered codes and presenting results

use crate::error::{Error, Result};
use crate::i18n::{Key, Locale};
use crate::payload::TabType;
use crate::qr::{Customization, QrEncoder, QrPayload, RenderSource, RenderedQr};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// What the CLI emits for a rendered code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// PNG file on disk
    Png,
    /// SVG file on disk
    Svg,
    /// Unicode art on stdout
    Terminal,
    /// `data:image/png;base64,...` on stdout
    DataUrl,
}

impl OutputFormat {
    /// Identifier accepted by [`FromStr`]
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Terminal => "terminal",
            OutputFormat::DataUrl => "data-url",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            "terminal" | "tty" => Ok(OutputFormat::Terminal),
            "data-url" | "dataurl" => Ok(OutputFormat::DataUrl),
            _ => Err(Error::Unknown {
                kind: "output format",
                value: value.to_string(),
            }),
        }
    }
}

/// Encode an image as PNG bytes
pub fn png_bytes(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// `data:` URL of the image as PNG
pub fn data_url(image: &RgbaImage) -> Result<String> {
    let encoded = STANDARD.encode(png_bytes(image)?);
    Ok(format!("data:image/png;base64,{encoded}"))
}

/// Write `contents` to `<directory>/<name>.<extension>`, creating the directory.
pub fn save_file(directory: &Path, name: &str, extension: &str, contents: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(directory)?;
    let path = directory.join(format!("{name}.{extension}"));
    std::fs::write(&path, contents)?;
    tracing::info!(path = %path.display(), bytes = contents.len(), "Saved QR code");
    Ok(path)
}

/// Save the rendered code as `<directory>/<name>.png`
pub fn download(rendered: &RenderedQr, directory: &Path, name: &str) -> Result<PathBuf> {
    save_file(directory, name, "png", &png_bytes(&rendered.image)?)
}

/// Where a rendered code ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Written {
    /// Saved to disk
    File(PathBuf),
    /// Text for stdout: terminal art or a data URL
    Inline {
        /// Format the text was produced in
        format: OutputFormat,
        /// The rendering itself
        content: String,
    },
}

impl Written {
    /// Path of the saved file, if any
    pub fn saved_path(&self) -> Option<&Path> {
        match self {
            Written::File(path) => Some(path),
            Written::Inline { .. } => None,
        }
    }
}

/// Write a rendered code as `format`. File formats land in `directory`;
/// terminal and data-URL output is returned for the caller to print.
pub fn write_rendered(
    rendered: &RenderedQr,
    encoder: &QrEncoder,
    customization: &Customization,
    format: OutputFormat,
    directory: &Path,
    name: &str,
) -> Result<Written> {
    let mut format = format;
    if rendered.source != RenderSource::Local
        && matches!(format, OutputFormat::Svg | OutputFormat::Terminal)
    {
        tracing::warn!(%format, "Remote renderers only return PNG; saving PNG instead");
        format = OutputFormat::Png;
    }

    let payload = QrPayload::from_string(rendered.payload.clone());
    match format {
        OutputFormat::Png => download(rendered, directory, name).map(Written::File),
        OutputFormat::Svg => {
            let svg = encoder.to_svg(&payload, customization)?;
            save_file(directory, name, "svg", svg.as_bytes()).map(Written::File)
        }
        OutputFormat::Terminal => Ok(Written::Inline {
            format,
            content: encoder.to_terminal(&payload)?,
        }),
        OutputFormat::DataUrl => Ok(Written::Inline {
            format,
            content: data_url(&rendered.image)?,
        }),
    }
}

/// Text destined for each standard stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Machine-consumable output
    pub stdout: String,
    /// Messages for the person at the terminal
    pub stderr: String,
}

/// Lay out a summary and any inline rendering across stdout and stderr.
///
/// stdout carries exactly one artifact: the JSON document when `json` is set
/// (with inline renderings folded in as `terminal` or `data_url`), otherwise
/// the inline rendering, otherwise the human summary.
pub fn report(summary: &RenderedSummary, written: Option<&Written>, json: bool) -> Result<Report> {
    let inline = match written {
        Some(Written::Inline { format, content }) => Some((*format, content)),
        _ => None,
    };

    if json {
        let mut doc = summary.json.clone();
        if let (Some((format, content)), Value::Object(map)) = (inline, &mut doc) {
            let key = match format {
                OutputFormat::Terminal => "terminal",
                _ => "data_url",
            };
            map.insert(key.to_string(), Value::String(content.clone()));
        }
        return Ok(Report {
            stdout: format!("{}\n", serde_json::to_string_pretty(&doc)?),
            stderr: String::new(),
        });
    }

    let mut human = String::new();
    for line in &summary.human {
        human.push_str(line);
        human.push('\n');
    }

    Ok(match inline {
        Some((_, content)) => Report {
            stdout: format!("{content}\n"),
            stderr: human,
        },
        None => Report {
            stdout: human,
            stderr: String::new(),
        },
    })
}

/// Structured and human-readable views of a generation result
#[derive(Debug, Clone)]
pub struct RenderedSummary {
    /// Structured JSON representation
    pub json: Value,
    /// Human-readable lines for terminal presentation
    pub human: Vec<String>,
}

/// Describe a generation result in the user's language.
///
/// `rendered` is `None` when the form produced no payload.
pub fn summarize(
    locale: Locale,
    tab: TabType,
    rendered: Option<&RenderedQr>,
    saved_to: Option<&Path>,
) -> RenderedSummary {
    let Some(rendered) = rendered else {
        return RenderedSummary {
            json: json!({ "tab": tab.as_str(), "payload": Value::Null }),
            human: vec![locale.t(Key::FillFormPrompt).to_string()],
        };
    };

    let source = match rendered.source {
        RenderSource::Local => "local".to_string(),
        RenderSource::Remote(provider) => format!("remote:{provider}"),
    };

    let mut human = vec![
        locale.t(Key::GeneratedQrCode).to_string(),
        format!("  {}", locale.t(Key::ScanQrCode)),
    ];
    if let Some(path) = saved_to {
        human.push(format!("  {}: {}", locale.t(Key::Saved), path.display()));
    }
    if let RenderSource::Remote(provider) = rendered.source {
        human.push(format!("  Rendered by {provider} (customization not applied)"));
    }
    human.push(String::new());
    human.push(format!("{}:", locale.t(Key::QrCodeData)));
    human.extend(rendered.payload.lines().map(|line| format!("  {line}")));

    let json = json!({
        "tab": tab.as_str(),
        "payload": rendered.payload,
        "width": rendered.image.width(),
        "height": rendered.image.height(),
        "source": source,
        "saved_to": saved_to.map(|p| p.display().to_string()),
    });

    RenderedSummary { json, human }
}
