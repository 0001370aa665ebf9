//! Core logic of the file manager.
//!
//! This module provides:
//! - [`Connector`] storage abstraction and the [`MemoryConnector`] reference backend
//! - [`Browser`] controller for the current folder
//! - [`BrowserDialog`], [`DialogService`] and [`BrowserSession`] for modal browsing
//! - [`UploadQueue`] and [`FileValidator`] strategies for uploads

mod browser;
mod connector;
mod dialog;
pub mod error;
mod memory;
mod upload;
pub mod validator;

pub use browser::Browser;
pub use connector::Connector;
pub use dialog::{BrowserDialog, BrowserSession, DialogData, DialogResult, DialogService, PickMode};
pub use error::{BrowserError, ConfigError, ConnectorError, DialogError, Operation, ReadError};
pub use memory::{Manifest, ManifestFile, MemoryConnector};
pub use upload::{UploadEntry, UploadQueue, UploadStatus, UploadSummary};
pub use validator::{AcceptAll, DefaultValidator, ExtensionAllowList, FileValidator};
