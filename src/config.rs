//! Widget configuration.
//!
//! Centralizes the constants used throughout the crate and the per-dialog
//! [`FmConfig`] options a host can override.

use serde::{Deserialize, Serialize};

// =============================================================================
// Dialog
// =============================================================================

/// Title shown when the host does not pass one.
pub const DEFAULT_DIALOG_TITLE: &str = "File Browser";

// =============================================================================
// Sizes
// =============================================================================

/// Units used by [`HumanSize`](crate::utils::HumanSize), smallest first.
pub const SIZE_UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];

/// Factor between two consecutive size units.
pub const SIZE_STEP: f64 = 1024.0;

// =============================================================================
// Content
// =============================================================================

/// MIME type used for data URLs when a file has no type.
pub const DEFAULT_MIME: &str = "application/octet-stream";

/// Base URL for files served by the in-memory connector.
pub const MEMORY_BASE_URL: &str = "memory:/";

// =============================================================================
// Browser Options
// =============================================================================

/// Layout of the browser grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    /// List view (default)
    #[default]
    List,
    /// Grid view
    Grid,
}

/// Options for a browser/dialog instance.
///
/// Every field has a default so hosts can pass partial JSON objects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FmConfig {
    /// Show entries whose name starts with `.`
    pub show_hidden: bool,
    /// Allow uploading into the current folder
    pub allow_upload: bool,
    /// Allow creating sub-folders
    pub allow_create_folder: bool,
    /// Allow removing files and folders
    pub allow_delete: bool,
    /// Allow renaming files and folders
    pub allow_rename: bool,
    /// Keep files visible while a folder is being picked
    pub show_files_when_picking_folder: bool,
    /// Grid layout
    pub view: ViewType,
}

impl Default for FmConfig {
    fn default() -> Self {
        Self {
            show_hidden: false,
            allow_upload: true,
            allow_create_folder: true,
            allow_delete: true,
            allow_rename: true,
            show_files_when_picking_folder: true,
            view: ViewType::List,
        }
    }
}

impl FmConfig {
    /// Configuration that only allows browsing.
    pub fn read_only() -> Self {
        Self {
            allow_upload: false,
            allow_create_folder: false,
            allow_delete: false,
            allow_rename: false,
            ..Self::default()
        }
    }
}
