//! qrcraft command-line entrypoint

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use qrcraft::i18n::{self, find_matching_locale};
use qrcraft::output::{self, RenderedSummary, Written};
use qrcraft::share::{self, ClipboardHelper, ShareOutcome};
use qrcraft::{
    Color, ContactInfo, Error, FormState, Locale, OutputFormat, PreferenceStore, QrGenerator,
    QrcraftConfig, RenderedQr, ShareContext, ShareTarget, SystemShare,
    TabType, logging,
};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "qrcraft",
    version,
    about = "Generate QR codes for links, text and contact cards"
)]
struct Cli {
    /// Optional configuration file (toml/yaml). Defaults to qrcraft.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Interface language for this run (e.g. en-US, es-ES)
    #[arg(long, value_name = "LOCALE", global = true)]
    lang: Option<String>,

    /// Output results as formatted JSON instead of human-readable text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a website address (https:// is added when missing)
    Url {
        /// Address to encode
        url: String,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Encode free text; reads stdin when TEXT is omitted or `-`
    Text {
        /// Text to encode
        text: Option<String>,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Encode a vCard contact
    Contact {
        #[command(flatten)]
        contact: ContactArgs,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Show, set or clear the saved interface language
    Lang {
        /// Locale to save (e.g. es-ES, es, en)
        locale: Option<String>,
        /// Forget the saved language
        #[arg(long, conflicts_with = "locale")]
        reset: bool,
    },
    /// Keep copied text on the clipboard after the main process exits
    #[command(name = CLIPBOARD_SERVE, hide = true)]
    ClipboardServe,
}

/// Hidden subcommand the clipboard helper is started with
const CLIPBOARD_SERVE: &str = "clipboard-serve";

#[derive(Args, Debug, Default)]
struct ContactArgs {
    /// Given name
    #[arg(long, default_value = "")]
    first_name: String,
    /// Family name
    #[arg(long, default_value = "")]
    last_name: String,
    /// Phone number
    #[arg(long, default_value = "")]
    phone: String,
    /// Email address
    #[arg(long, default_value = "")]
    email: String,
    /// Company or organization
    #[arg(long = "org", default_value = "")]
    organization: String,
    /// Website
    #[arg(long = "website", default_value = "")]
    url: String,
}

impl From<ContactArgs> for ContactInfo {
    fn from(args: ContactArgs) -> Self {
        ContactInfo {
            first_name: args.first_name,
            last_name: args.last_name,
            phone: args.phone,
            email: args.email,
            organization: args.organization,
            url: args.url,
        }
    }
}

#[derive(Args, Debug, Default)]
struct RenderArgs {
    /// Dark module color (#rrggbb or a basic color name)
    #[arg(long, value_name = "COLOR")]
    fg: Option<String>,

    /// Background color
    #[arg(long, value_name = "COLOR")]
    bg: Option<String>,

    /// Image drawn at the centre of the code
    #[arg(long, value_name = "PATH")]
    logo: Option<PathBuf>,

    /// Logo side in percent of the code (10-30)
    #[arg(long, value_name = "PERCENT", value_parser = clap::value_parser!(u8).range(10..=30))]
    logo_size: Option<u8>,

    /// Canvas side in pixels (21-4096)
    #[arg(long, value_name = "PX", value_parser = clap::value_parser!(u32).range(21..=4096))]
    size: Option<u32>,

    /// Output format: png, svg, terminal or data-url
    #[arg(long, value_name = "FORMAT")]
    format: Option<String>,

    /// Directory for saved files
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,

    /// File name without extension (defaults to qr-code-<tab>)
    #[arg(long, value_name = "NAME")]
    name: Option<String>,

    /// Copy the payload to the clipboard
    #[arg(long)]
    copy: bool,

    /// Share natively (`native`) or through whatsapp, telegram, email, twitter, sms, linkedin
    #[arg(long, value_name = "TARGET")]
    share: Option<String>,

    /// Do not contact remote QR APIs when local encoding fails
    #[arg(long)]
    no_fallback: bool,
}

impl RenderArgs {
    fn apply(&self, config: &mut QrcraftConfig) -> qrcraft::Result<()> {
        if let Some(fg) = &self.fg {
            config.render.foreground = Color::parse(fg)?;
        }
        if let Some(bg) = &self.bg {
            config.render.background = Color::parse(bg)?;
        }
        if let Some(logo) = &self.logo {
            config.render.logo = Some(logo.clone());
        }
        if let Some(size) = self.logo_size {
            config.render.logo_size = size;
        }
        if let Some(size) = self.size {
            config.render.size = size;
        }
        if let Some(format) = &self.format {
            config.output.format = format.parse::<OutputFormat>()?;
        }
        if let Some(out) = &self.out {
            config.output.directory = out.clone();
        }
        if self.no_fallback {
            config.render.remote_fallback = false;
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if let Command::ClipboardServe = cli.command {
        return serve_clipboard();
    }

    let mut config = QrcraftConfig::load(cli.config.as_deref())?;
    if let Command::Url { render, .. } | Command::Text { render, .. } | Command::Contact { render, .. } =
        &cli.command
    {
        render.apply(&mut config)?;
    }

    logging::init(&config.logging)?;

    let preferences = match PreferenceStore::system() {
        Ok(store) => Some(store),
        Err(err) => {
            tracing::warn!("Language preference unavailable: {err}");
            None
        }
    };
    let stored = preferences
        .as_ref()
        .and_then(|store| store.load_tag().ok().flatten());
    let system = i18n::system_locale_tag(|key| std::env::var(key).ok());
    let locale = i18n::resolve_locale(
        cli.lang.as_deref(),
        stored.as_deref(),
        config.locale.as_deref(),
        system.as_deref(),
    );
    tracing::debug!(%locale, "Resolved interface language");

    let (form, render) = match cli.command {
        Command::Lang { locale: choice, reset } => {
            return handle_lang(preferences.as_ref(), locale, choice.as_deref(), reset, cli.json);
        }
        Command::ClipboardServe => return serve_clipboard(),
        Command::Url { url, render } => {
            let mut form = FormState::with_customization(config.render.customization());
            form.active_tab = TabType::Url;
            form.url_input = url;
            (form, render)
        }
        Command::Text { text, render } => {
            let mut form = FormState::with_customization(config.render.customization());
            form.active_tab = TabType::Text;
            form.text_input = match text.as_deref() {
                None | Some("-") => read_stdin()?,
                Some(text) => text.to_string(),
            };
            (form, render)
        }
        Command::Contact { contact, render } => {
            let mut form = FormState::with_customization(config.render.customization());
            form.active_tab = TabType::Contact;
            form.contact = contact.into();
            (form, render)
        }
    };

    let generator = QrGenerator::new(&config.render)?;
    let Some(rendered) = generator.generate(&form).await? else {
        let summary = output::summarize(locale, form.active_tab, None, None);
        emit(&summary, None, cli.json)?;
        return Ok(());
    };

    let name = render.name.clone().unwrap_or_else(|| form.download_name());
    let written = output::write_rendered(
        &rendered,
        generator.renderer().encoder(),
        &form.customization,
        config.output.format,
        &config.output.directory,
        &name,
    )?;
    let saved = written.saved_path();

    let mut backend = system_share();
    if render.copy && share::copy_payload(&mut backend, &rendered.payload)? {
        eprintln!("{}", locale.t(qrcraft::Key::Copied));
    }

    if let Some(target) = render.share.as_deref() {
        run_share(&mut backend, &config, locale, target, &rendered, saved, &name)?;
    }

    let summary = output::summarize(locale, form.active_tab, Some(&rendered), saved);
    emit(&summary, Some(&written), cli.json)?;
    Ok(())
}

/// Share backend whose copies survive the process on Linux
fn system_share() -> SystemShare {
    let backend = SystemShare::new();
    if !cfg!(target_os = "linux") {
        return backend;
    }
    match std::env::current_exe() {
        Ok(exe) => backend.with_clipboard_helper(ClipboardHelper::new(exe).arg(CLIPBOARD_SERVE)),
        Err(err) => {
            tracing::warn!("Cannot locate own executable for the clipboard helper: {err}");
            backend
        }
    }
}

fn serve_clipboard() -> anyhow::Result<()> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("failed to read clipboard text from stdin")?;
    share::serve_clipboard(text)?;
    Ok(())
}

fn read_stdin() -> anyhow::Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read text from stdin")?;
    Ok(buf.trim_end_matches(['\r', '\n']).to_string())
}

fn run_share(
    backend: &mut SystemShare,
    config: &QrcraftConfig,
    locale: Locale,
    target: &str,
    rendered: &RenderedQr,
    saved: Option<&Path>,
    name: &str,
) -> qrcraft::Result<()> {
    if target.eq_ignore_ascii_case("native") {
        // The share sheet needs a PNG on disk even when the output was something else
        let png = match saved.filter(|p| p.extension().is_some_and(|ext| ext == "png")) {
            Some(path) => path.to_path_buf(),
            None => output::download(rendered, &std::env::temp_dir(), name)?,
        };
        return match share::share_payload(backend, &rendered.payload, Some(&png), locale) {
            Ok(ShareOutcome::Cancelled) | Ok(ShareOutcome::Empty) => Ok(()),
            Ok(outcome) => {
                tracing::info!(?outcome, "Shared QR code");
                Ok(())
            }
            Err(Error::ShareFallback(message)) => {
                eprintln!("{message}");
                Ok(())
            }
            Err(err) => Err(err),
        };
    }

    let target = target.parse::<ShareTarget>()?;
    let link = config
        .share
        .link
        .clone()
        .unwrap_or_else(|| rendered.payload.clone());
    let mut ctx = ShareContext::new(link, locale);
    if target == ShareTarget::Email && config.share.email_image {
        ctx = ctx.with_image(output::data_url(&rendered.image)?);
    }
    let url = share::share_to(backend, target, &ctx)?;
    tracing::debug!(%url, "Share link opened");
    Ok(())
}

fn emit(summary: &RenderedSummary, written: Option<&Written>, json: bool) -> qrcraft::Result<()> {
    let report = output::report(summary, written, json)?;
    print!("{}", report.stdout);
    eprint!("{}", report.stderr);
    Ok(())
}

fn handle_lang(
    store: Option<&PreferenceStore>,
    current: Locale,
    choice: Option<&str>,
    reset: bool,
    json: bool,
) -> anyhow::Result<()> {
    let store = store.context("no configuration directory to store the language in")?;

    let active = if reset {
        store.clear()?;
        None
    } else if let Some(tag) = choice {
        let locale = find_matching_locale(tag);
        store.save(locale)?;
        Some(locale)
    } else {
        Some(current)
    };

    if json {
        let value = serde_json::json!({
            "locale": active.map(Locale::tag),
            "available": Locale::ALL.iter().map(|l| l.tag()).collect::<Vec<_>>(),
            "path": store.path().display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    for locale in Locale::ALL {
        let marker = if Some(locale) == active { '*' } else { ' ' };
        println!("{marker} {} ({})", locale.display_name(), locale.tag());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_flag_is_bounded() {
        assert!(Cli::try_parse_from(["qrcraft", "text", "hi", "--size", "100000"]).is_err());
        assert!(Cli::try_parse_from(["qrcraft", "text", "hi", "--size", "20"]).is_err());

        let cli = Cli::try_parse_from(["qrcraft", "text", "hi", "--size", "4096"]).unwrap();
        let Command::Text { render, .. } = cli.command else {
            panic!("expected text command");
        };
        assert_eq!(render.size, Some(4096));
    }

    #[test]
    fn clipboard_helper_subcommand_is_hidden() {
        let cli = Cli::try_parse_from(["qrcraft", CLIPBOARD_SERVE]).unwrap();
        assert!(matches!(cli.command, Command::ClipboardServe));

        let help = <Cli as clap::CommandFactory>::command().render_help().to_string();
        assert!(!help.contains(CLIPBOARD_SERVE));
    }
}
