//! Error types for the file manager.
//!
//! One enum per domain:
//!
//! - [`ConfigError`] - missing required dialog inputs (fatal to initialization)
//! - [`ReadError`] - reading file content that is not available
//! - [`ConnectorError`] - storage backend failures
//! - [`BrowserError`] - browser operations (permissions, lookups)
//! - [`DialogError`] - dialog sessions

use std::fmt;

use thiserror::Error;

/// Invalid dialog configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No start path passed to the dialog
    #[error("dialog requires a `path`")]
    MissingPath,
    /// No mount root passed to the dialog
    #[error("dialog requires a `root`")]
    MissingRoot,
}

/// File content could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    /// The file describes a listed entry, not a pending upload
    #[error("cannot read '{name}': no native file attached")]
    Unreadable { name: String },
    /// The browser rejected the read
    #[error("read failed: {0}")]
    ReadFailed(String),
}

/// Failures reported by a [`Connector`](super::Connector).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectorError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("not a folder: {0}")]
    NotAFolder(String),
    #[error("already exists: {0}")]
    AlreadyExists(String),
    #[error("invalid name: '{0}'")]
    InvalidName(String),
    /// Mount roots cannot be renamed or removed
    #[error("mount root cannot be modified: {0}")]
    RootLocked(String),
    #[error(transparent)]
    Read(#[from] ReadError),
    /// Any other backend failure (network, quota, ...)
    #[error("backend error: {0}")]
    Backend(String),
}

/// Mutating browser operations, checked against [`FmConfig`](crate::FmConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Upload,
    CreateFolder,
    Delete,
    Rename,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upload => write!(f, "upload"),
            Self::CreateFolder => write!(f, "create folder"),
            Self::Delete => write!(f, "delete"),
            Self::Rename => write!(f, "rename"),
        }
    }
}

/// Browser controller errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrowserError {
    #[error("{0} is disabled")]
    NotAllowed(Operation),
    #[error("no such item: {0}")]
    NoSuchItem(String),
    #[error(transparent)]
    Connector(#[from] ConnectorError),
}

/// Dialog session errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialogError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Browser(#[from] BrowserError),
    /// The pick mode does not accept this item
    #[error("cannot pick '{0}'")]
    NotPickable(String),
}

impl From<ConnectorError> for DialogError {
    fn from(err: ConnectorError) -> Self {
        DialogError::Browser(BrowserError::Connector(err))
    }
}
