//! Interactive "download" of a snapshot
//!
//! A download hands the serialized document to whatever save dialog the
//! platform offers. Without one (headless host, CI, server) the request fails
//! with [`ExportError::Unavailable`] instead of quietly doing nothing.

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, IsTerminal, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::constants::{download, env};
use crate::error::ExportError;
use crate::serializer::{download_filename, serialize};
use crate::snapshot::ExportDocument;

/// Platform capability that receives a downloaded file
pub trait SaveDialog {
    /// Persist `contents` under (a variant of) `file_name`; returns where it landed
    fn save(&self, file_name: &str, contents: &[u8]) -> Result<PathBuf, ExportError>;
}

/// Browser-style download into a folder
///
/// Existing files are never replaced; a ` (n)` suffix is appended instead.
#[derive(Debug, Clone)]
pub struct DownloadsFolder {
    dir: PathBuf,
}

impl DownloadsFolder {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn candidate(&self, file_name: &str, attempt: u32) -> PathBuf {
        if attempt == 0 {
            return self.dir.join(file_name);
        }
        let path = Path::new(file_name);
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();
        let name = match path.extension() {
            Some(ext) => format!("{stem} ({attempt}).{}", ext.to_string_lossy()),
            None => format!("{stem} ({attempt})"),
        };
        self.dir.join(name)
    }
}

impl SaveDialog for DownloadsFolder {
    fn save(&self, file_name: &str, contents: &[u8]) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.dir).map_err(|e| ExportError::io(&self.dir, e))?;

        for attempt in 0..=download::MAX_DUPLICATE_SUFFIX {
            let path = self.candidate(file_name, attempt);
            // create_new makes the existence check and the create one step
            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(ExportError::io(&path, e)),
            };
            file.write_all(contents)
                .map_err(|e| ExportError::io(&path, e))?;
            return Ok(path);
        }

        Err(ExportError::io(
            self.candidate(file_name, download::MAX_DUPLICATE_SUFFIX),
            std::io::Error::new(
                ErrorKind::AlreadyExists,
                "no free download filename left",
            ),
        ))
    }
}

/// No save dialog: every download is refused
#[derive(Debug, Clone, Copy, Default)]
pub struct Headless;

impl SaveDialog for Headless {
    fn save(&self, file_name: &str, _contents: &[u8]) -> Result<PathBuf, ExportError> {
        Err(ExportError::Unavailable(format!(
            "no interactive session to save {file_name}; write the snapshot to a file instead"
        )))
    }
}

/// Pick the save dialog available on this host
pub fn detect_save_dialog() -> Box<dyn SaveDialog> {
    detect_save_dialog_with(
        |var| std::env::var_os(var),
        std::io::stderr().is_terminal(),
        dirs::download_dir(),
    )
}

/// [`detect_save_dialog`] with the environment, terminal state and download
/// directory supplied by the caller
pub fn detect_save_dialog_with(
    var: impl Fn(&str) -> Option<OsString>,
    terminal: bool,
    download_dir: Option<PathBuf>,
) -> Box<dyn SaveDialog> {
    if !has_graphical_session(&var, terminal, NEEDS_DISPLAY_SERVER) {
        info!("No graphical session detected, interactive download disabled");
        return Box::new(Headless);
    }

    match download_dir {
        Some(dir) => {
            let folder = DownloadsFolder::new(dir);
            info!(dir = %folder.dir().display(), "Interactive download enabled");
            Box::new(folder)
        }
        None => {
            warn!("Graphical session without a download directory, interactive download disabled");
            Box::new(Headless)
        }
    }
}

/// X11/Wayland desktops announce themselves through the environment; macOS and
/// Windows have no such marker
const NEEDS_DISPLAY_SERVER: bool = cfg!(all(unix, not(target_os = "macos")));

fn is_set(var: &impl Fn(&str) -> Option<OsString>, name: &str) -> bool {
    var(name).is_some_and(|v| !v.is_empty())
}

/// A remote or CI session never counts as interactive. Otherwise a display
/// server is required where one exists, and an attached terminal elsewhere.
fn has_graphical_session(
    var: &impl Fn(&str) -> Option<OsString>,
    terminal: bool,
    needs_display_server: bool,
) -> bool {
    if [env::SSH_CONNECTION, env::SSH_TTY, env::CI]
        .iter()
        .any(|name| is_set(var, name))
    {
        return false;
    }

    if needs_display_server {
        [env::DISPLAY, env::WAYLAND_DISPLAY]
            .iter()
            .any(|name| is_set(var, name))
    } else {
        terminal
    }
}

/// Serialize `document` and hand it to `dialog` as `deliops-alldata-<date>.json`
pub fn trigger_download(
    document: &ExportDocument,
    dialog: &dyn SaveDialog,
) -> Result<PathBuf, ExportError> {
    let file_name = download_filename(document);
    let json = serialize(document);
    let path = dialog.save(&file_name, json.as_bytes())?;
    info!(path = %path.display(), "Downloaded export snapshot");
    Ok(path)
}
