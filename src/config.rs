//! qrcraft runtime configuration handling

use crate::color::Color;
use crate::error::{Error, Result};
use crate::output::OutputFormat;
use crate::qr::{CANVAS_SIZE_RANGE, Customization, DEFAULT_CANVAS_SIZE, DEFAULT_LOGO_SIZE};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration structure persisted to disk or environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QrcraftConfig {
    /// Rendering defaults
    pub render: RenderOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
    /// Share link configuration
    pub share: ShareOptions,
    /// Where and how results are written
    pub output: OutputOptions,
    /// Preferred locale tag (e.g. `es-ES`); the stored preference wins over this
    pub locale: Option<String>,
}

impl QrcraftConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit_path {
            Self::from_file(path)?
        } else if let Some(path) = Self::discover_file()? {
            tracing::info!("Using configuration file: {}", path.display());
            Self::from_file(&path)?
        } else {
            tracing::debug!("No qrcraft.toml / qrcraft.yaml found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Attempt to locate a configuration file in common locations.
    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        for candidate in ["qrcraft.toml", "qrcraft.yaml", "qrcraft.yml"] {
            let path = cwd.join(candidate);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME") {
            let base = PathBuf::from(xdg_config).join("qrcraft");
            for candidate in ["config.toml", "config.yaml"] {
                let path = base.join(candidate);
                if path.exists() {
                    return Ok(Some(path));
                }
            }
        }

        Ok(None)
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml",
                other
            ))),
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Apply `QRCRAFT_*` overrides from an arbitrary lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        self.render.apply_overrides(&lookup);
        self.logging.apply_overrides(&lookup);
        self.share.apply_overrides(&lookup);
        self.output.apply_overrides(&lookup);
        if let Some(locale) = lookup("QRCRAFT_LOCALE") {
            self.locale = Some(locale);
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// Rendering defaults merged under CLI flags
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Canvas side in pixels
    pub size: u32,
    /// Dark module color
    pub foreground: Color,
    /// Light module and canvas color
    pub background: Color,
    /// Default logo image
    pub logo: Option<PathBuf>,
    /// Logo side in percent of the canvas (10..=30)
    pub logo_size: u8,
    /// Try remote image APIs when local encoding fails
    pub remote_fallback: bool,
    /// Decode logo-overlaid codes to check they still scan
    pub verify: bool,
    /// Timeout for each remote request
    pub timeout_secs: u64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: DEFAULT_CANVAS_SIZE,
            foreground: Color::BLACK,
            background: Color::WHITE,
            logo: None,
            logo_size: DEFAULT_LOGO_SIZE,
            remote_fallback: true,
            verify: true,
            timeout_secs: 10,
        }
    }
}

impl RenderOptions {
    fn apply_overrides<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(size) = lookup("QRCRAFT_SIZE").and_then(|v| v.parse::<u32>().ok()) {
            let bounded = size.clamp(*CANVAS_SIZE_RANGE.start(), *CANVAS_SIZE_RANGE.end());
            if bounded != size {
                tracing::warn!(size, bounded, "QRCRAFT_SIZE out of range, clamping");
            }
            self.size = bounded;
        }
        if let Some(fg) = lookup("QRCRAFT_FOREGROUND") {
            match Color::parse(&fg) {
                Ok(color) => self.foreground = color,
                Err(err) => tracing::warn!("Ignoring QRCRAFT_FOREGROUND: {err}"),
            }
        }
        if let Some(bg) = lookup("QRCRAFT_BACKGROUND") {
            match Color::parse(&bg) {
                Ok(color) => self.background = color,
                Err(err) => tracing::warn!("Ignoring QRCRAFT_BACKGROUND: {err}"),
            }
        }
        if let Some(logo) = lookup("QRCRAFT_LOGO") {
            self.logo = if logo.trim().is_empty() {
                None
            } else {
                Some(PathBuf::from(logo))
            };
        }
        if let Some(size) = lookup("QRCRAFT_LOGO_SIZE").and_then(|v| v.parse::<u8>().ok()) {
            self.logo_size = size;
        }
        if let Some(flag) = lookup("QRCRAFT_REMOTE_FALLBACK").and_then(|v| parse_flag(&v)) {
            self.remote_fallback = flag;
        }
        if let Some(flag) = lookup("QRCRAFT_VERIFY").and_then(|v| parse_flag(&v)) {
            self.verify = flag;
        }
        if let Some(secs) = lookup("QRCRAFT_TIMEOUT_SECS").and_then(|v| v.parse::<u64>().ok()) {
            self.timeout_secs = secs.max(1);
        }
    }

    /// Customization seeded from these defaults
    pub fn customization(&self) -> Customization {
        Customization {
            foreground: self.foreground,
            background: self.background,
            logo: self.logo.clone(),
            logo_size: self.logo_size,
        }
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `QRCRAFT_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in console logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    fn apply_overrides<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("QRCRAFT_LOG_LEVEL") {
            self.level = level;
        }
        if let Some(file) = lookup("QRCRAFT_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Some(color) = lookup("QRCRAFT_LOG_COLOR").and_then(|v| parse_flag(&v)) {
            self.color = color;
        }
        if let Some(rotation) = lookup("QRCRAFT_LOG_ROTATION") {
            if let Some(parsed) = LogRotation::parse(&rotation) {
                self.rotation = Some(parsed);
            }
        }
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}

/// Share link settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareOptions {
    /// Link placed in share messages; the payload itself when unset
    pub link: Option<String>,
    /// Attach the PNG as a data URL in email bodies
    pub email_image: bool,
}

impl ShareOptions {
    fn apply_overrides<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(link) = lookup("QRCRAFT_SHARE_LINK") {
            self.link = Some(link).filter(|l| !l.trim().is_empty());
        }
        if let Some(flag) = lookup("QRCRAFT_SHARE_EMAIL_IMAGE").and_then(|v| parse_flag(&v)) {
            self.email_image = flag;
        }
    }
}

/// Output destination settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Directory downloads are written to
    pub directory: PathBuf,
    /// Default output format
    pub format: OutputFormat,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            format: OutputFormat::Png,
        }
    }
}

impl OutputOptions {
    fn apply_overrides<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("QRCRAFT_OUTPUT_DIR") {
            self.directory = PathBuf::from(dir);
        }
        if let Some(format) = lookup("QRCRAFT_OUTPUT_FORMAT") {
            match format.parse::<OutputFormat>() {
                Ok(parsed) => self.format = parsed,
                Err(err) => tracing::warn!("Ignoring QRCRAFT_OUTPUT_FORMAT: {err}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_form_defaults() {
        let config = QrcraftConfig::default();
        assert_eq!(config.render.customization(), Customization::default());
        assert_eq!(config.render.size, 300);
        assert!(config.render.remote_fallback);
        assert_eq!(config.output.format, OutputFormat::Png);
    }

    #[test]
    fn loads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qrcraft.toml");
        fs::write(
            &path,
            r##"
locale = "es-ES"

[render]
foreground = "#ff6600"
logo_size = 25
remote_fallback = false

[output]
format = "svg"
"##,
        )
        .unwrap();

        let config = QrcraftConfig::from_file(&path).unwrap();
        assert_eq!(config.locale.as_deref(), Some("es-ES"));
        assert_eq!(config.render.foreground, Color::rgb(0xff, 0x66, 0x00));
        assert_eq!(config.render.background, Color::WHITE);
        assert_eq!(config.render.logo_size, 25);
        assert!(!config.render.remote_fallback);
        assert_eq!(config.output.format, OutputFormat::Svg);
    }

    #[test]
    fn loads_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qrcraft.yaml");
        fs::write(&path, "render:\n  background: \"#000\"\nshare:\n  link: https://x.test\n").unwrap();
        let config = QrcraftConfig::from_file(&path).unwrap();
        assert_eq!(config.render.background, Color::BLACK);
        assert_eq!(config.share.link.as_deref(), Some("https://x.test"));
    }

    #[test]
    fn rejects_bad_color_and_unknown_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[render]\nforeground = \"mauve-ish\"\n").unwrap();
        assert!(matches!(QrcraftConfig::from_file(&path), Err(Error::Config(_))));

        let ini = dir.path().join("qrcraft.ini");
        fs::write(&ini, "").unwrap();
        assert!(matches!(QrcraftConfig::from_file(&ini), Err(Error::Config(_))));
    }

    #[test]
    fn overrides_apply_from_lookup() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("QRCRAFT_FOREGROUND", "#123456"),
            ("QRCRAFT_BACKGROUND", "not-a-color"),
            ("QRCRAFT_REMOTE_FALLBACK", "off"),
            ("QRCRAFT_LOG_LEVEL", "debug"),
            ("QRCRAFT_OUTPUT_FORMAT", "data-url"),
            ("QRCRAFT_LOCALE", "es"),
            ("QRCRAFT_SHARE_LINK", " "),
        ]);
        let mut config = QrcraftConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.render.foreground, Color::rgb(0x12, 0x34, 0x56));
        assert_eq!(config.render.background, Color::WHITE);
        assert!(!config.render.remote_fallback);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.output.format, OutputFormat::DataUrl);
        assert_eq!(config.locale.as_deref(), Some("es"));
        assert!(config.share.link.is_none());
    }

    #[test]
    fn size_override_is_clamped() {
        let mut config = QrcraftConfig::default();
        config.apply_overrides(|key| (key == "QRCRAFT_SIZE").then(|| "100000".to_string()));
        assert_eq!(config.render.size, 4096);

        config.apply_overrides(|key| (key == "QRCRAFT_SIZE").then(|| "5".to_string()));
        assert_eq!(config.render.size, 21);

        config.apply_overrides(|key| (key == "QRCRAFT_SIZE").then(|| "512".to_string()));
        assert_eq!(config.render.size, 512);
    }
}
