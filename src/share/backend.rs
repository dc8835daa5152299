//! Platform hooks used by the share chain

use crate::error::{Error, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Title and text accompanying a share
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    /// Share sheet title
    pub title: String,
    /// Message body
    pub text: String,
}

/// Platform integration for sharing, copying and opening links.
///
/// `share_file` and `share_text` return [`Error::ShareUnsupported`] when the
/// platform has no such facility and [`Error::ShareCancelled`] when the user
/// backs out.
pub trait ShareBackend {
    /// Hand an image file to the platform share facility
    fn share_file(&mut self, request: &ShareRequest, file: &Path) -> Result<()>;

    /// Share plain text through the platform share facility
    fn share_text(&mut self, request: &ShareRequest) -> Result<()>;

    /// Place text on the clipboard
    fn copy_text(&mut self, text: &str) -> Result<()>;

    /// Open a URL (web link, `mailto:`, `sms:`) with the default handler
    fn open_link(&mut self, url: &str) -> Result<()>;
}

/// Detached process that owns copied text after we exit.
///
/// X11 and Wayland selections live only as long as the process that set
/// them. The helper is started with the text on stdin and is expected to
/// call [`serve_clipboard`], which blocks until another application takes
/// the clipboard over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardHelper {
    program: PathBuf,
    args: Vec<String>,
}

impl ClipboardHelper {
    /// Helper running `program` with no arguments
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append an argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Start the helper and hand it `text`. Does not wait for it to exit.
    pub fn spawn(&self, text: &str) -> Result<()> {
        let helper_err = |e: std::io::Error| Error::Clipboard(format!("clipboard helper: {e}"));

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(helper_err)?;
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::Clipboard("clipboard helper has no stdin".to_string()))?;
        stdin.write_all(text.as_bytes()).map_err(helper_err)?;
        drop(stdin);

        tracing::debug!(pid = child.id(), bytes = text.len(), "Clipboard helper started");
        Ok(())
    }
}

/// Own the clipboard with `text` until another application replaces it.
///
/// On Linux this blocks; run it from a [`ClipboardHelper`] process.
pub fn serve_clipboard(text: String) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().map_err(|e| Error::Clipboard(e.to_string()))?;

    #[cfg(target_os = "linux")]
    let set = {
        use arboard::SetExtLinux;
        clipboard.set().wait().text(text)
    };
    #[cfg(not(target_os = "linux"))]
    let set = clipboard.set_text(text);

    set.map_err(|e| Error::Clipboard(e.to_string()))
}

/// Desktop backend: the default image viewer stands in for a share sheet,
/// the system clipboard is used for copies.
#[derive(Default)]
pub struct SystemShare {
    clipboard: Option<arboard::Clipboard>,
    helper: Option<ClipboardHelper>,
}

impl SystemShare {
    /// Create a backend; the clipboard is opened lazily
    pub fn new() -> Self {
        Self::default()
    }

    /// Route copies through a detached helper so they outlive this process
    pub fn with_clipboard_helper(mut self, helper: ClipboardHelper) -> Self {
        self.helper = Some(helper);
        self
    }

    fn clipboard(&mut self) -> Result<&mut arboard::Clipboard> {
        if self.clipboard.is_none() {
            let clipboard =
                arboard::Clipboard::new().map_err(|e| Error::Clipboard(e.to_string()))?;
            self.clipboard = Some(clipboard);
        }
        self.clipboard
            .as_mut()
            .ok_or_else(|| Error::Clipboard("clipboard unavailable".to_string()))
    }
}

impl ShareBackend for SystemShare {
    fn share_file(&mut self, request: &ShareRequest, file: &Path) -> Result<()> {
        tracing::debug!(title = %request.title, file = %file.display(), "Handing QR image to system");
        open::that(file).map_err(|e| Error::Other(format!("Failed to open {}: {e}", file.display())))
    }

    fn share_text(&mut self, _request: &ShareRequest) -> Result<()> {
        Err(Error::ShareUnsupported(
            "no text share facility on this platform".to_string(),
        ))
    }

    fn copy_text(&mut self, text: &str) -> Result<()> {
        if let Some(helper) = &self.helper {
            return helper.spawn(text);
        }
        if cfg!(target_os = "linux") {
            tracing::warn!("No clipboard helper; the copy lasts only while this process runs");
        }
        self.clipboard()?
            .set_text(text.to_string())
            .map_err(|e| Error::Clipboard(e.to_string()))
    }

    fn open_link(&mut self, url: &str) -> Result<()> {
        open::that(url).map_err(|e| Error::Other(format!("Failed to open link: {e}")))
    }
}
