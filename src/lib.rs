//! Headless core of a browser file-manager widget.
//!
//! - [`models`] - item model ([`FmFile`], [`FmFolder`], [`FmItem`]) and native upload handles
//! - [`core`] - connector abstraction, in-memory connector, browser/dialog/upload controllers
//! - [`config`] - constants and the [`FmConfig`] options
//! - [`utils`] - path and size helpers
//!
//! Rendering is left to the host; every controller exposes plain state and
//! async operations driven by user interaction.

pub mod config;
pub mod core;
pub mod models;
pub mod utils;

pub use config::{FmConfig, ViewType};
pub use crate::core::{
    AcceptAll, Browser, BrowserDialog, BrowserError, BrowserSession, ConfigError, Connector,
    ConnectorError, DefaultValidator, DialogData, DialogError, DialogResult, DialogService,
    ExtensionAllowList, FileValidator, Manifest, ManifestFile, MemoryConnector, Operation,
    PickMode, ReadError, UploadEntry, UploadQueue, UploadStatus, UploadSummary,
};
pub use models::{FileRecord, FmFile, FmFolder, FmItem, ItemType, NativeFile};
pub use utils::HumanSize;
