//! Application-wide constants
//!
//! Schema identifiers, sentinel values and default locations used by the
//! export pipeline, kept in one place so the builder, the writers and the
//! CLI agree on them.

/// Export document schema
pub mod schema {
    /// Revision of the data model the snapshot builder implements
    pub const VERSION: &str = "1.0";

    /// `exportedBy` value when no user is bound to the session
    pub const SYSTEM_EXPORTER: &str = "system";
}

/// Download naming
pub mod download {
    /// Prefix of interactive download filenames (`deliops-alldata-<date>.json`)
    pub const FILENAME_PREFIX: &str = "deliops-alldata-";

    pub const FILENAME_EXTENSION: &str = "json";

    /// Date portion of the filename (export date truncated to the day)
    pub const DATE_FORMAT: &str = "%Y-%m-%d";

    /// Give up looking for a free `name (n).json` slot after this many tries
    pub const MAX_DUPLICATE_SUFFIX: u32 = 999;
}

/// Default user preferences written into `settings`
pub mod settings {
    pub const LANGUAGE: &str = "en";

    pub const TIMEZONE: &str = "UTC+4";

    pub const NOTIFY_EMAIL: bool = true;
    pub const NOTIFY_PUSH: bool = true;
    pub const NOTIFY_SMS: bool = false;
    pub const NOTIFY_MARKETING: bool = false;
}

/// Configuration file location
pub mod config {
    /// Directory under the platform config dir
    pub const APP_DIR: &str = "deliops";

    pub const FILENAME: &str = "export.toml";
}

/// Batch generator defaults
pub mod output {
    /// Where the fixture snapshot lands when no path is given
    pub const DEFAULT_PATH: &str = "data/alldata.json";
}

/// Environment variables consulted at runtime
pub mod env {
    pub const LOG_LEVEL: &str = "LOG_LEVEL";

    /// X11 session marker
    pub const DISPLAY: &str = "DISPLAY";

    /// Wayland session marker
    pub const WAYLAND_DISPLAY: &str = "WAYLAND_DISPLAY";

    /// Set inside an SSH login
    pub const SSH_CONNECTION: &str = "SSH_CONNECTION";
    pub const SSH_TTY: &str = "SSH_TTY";

    /// Set by CI runners
    pub const CI: &str = "CI";
}
