//! DeliOps "export all data" snapshot
//!
//! Builds a versioned JSON snapshot of the fleet state (drivers, vehicles,
//! assets, SIM cards, clients, assignments, audit logs) and writes it to a
//! file or hands it to an interactive save dialog.

#![forbid(unsafe_code)]

pub mod config;
pub mod constants;
pub mod download;
pub mod error;
pub mod fixture;
pub mod serializer;
pub mod snapshot;
pub mod state;
pub mod types;

pub use config::ExportConfig;
pub use download::{
    detect_save_dialog, detect_save_dialog_with, trigger_download, DownloadsFolder, Headless,
    SaveDialog,
};
pub use error::ExportError;
pub use serializer::{download_filename, read_from_file, serialize, write_to_file};
pub use snapshot::{build_snapshot, build_snapshot_at, DataCounts, ExportDocument, Settings};
pub use state::{AppState, StateView};
