//! Item model for the file manager.
//!
//! Contains:
//! - [`FmItem`], [`ItemType`] - entries of a listing
//! - [`FmFolder`] - folder location with lazily attached children
//! - [`FmFile`], [`FileRecord`] - file descriptors and connector records
//! - [`NativeFile`] - owned content of a pending upload

mod file;
mod folder;
mod item;
mod native;

pub use file::{FileRecord, FmFile};
pub use folder::FmFolder;
pub use item::{FmItem, ItemType};
pub use native::NativeFile;
