//! Storage connector abstraction.
//!
//! A [`Connector`] is the backend behind a browser: it lists folders and
//! performs mutations. Implementations reject their future on failure; the
//! controllers pass the error on to the host unchanged.
//!
//! Everything runs on the UI thread, so futures are not required to be `Send`
//! and connectors are shared as `Rc<dyn Connector>`.

use async_trait::async_trait;

use super::error::ConnectorError;
use crate::models::{FmFile, FmFolder, FmItem, NativeFile};

#[async_trait(?Send)]
pub trait Connector {
    /// List the children of `folder`.
    async fn list(&self, folder: &FmFolder) -> Result<Vec<FmItem>, ConnectorError>;

    /// Store `native` inside `folder` and describe the stored file.
    async fn upload(
        &self,
        native: NativeFile,
        folder: &FmFolder,
    ) -> Result<FmFile, ConnectorError>;

    /// Create a sub-folder named `name`.
    async fn create_folder(
        &self,
        parent: &FmFolder,
        name: &str,
    ) -> Result<FmFolder, ConnectorError>;

    /// Remove a file, or a folder with everything below it.
    async fn remove(&self, item: &FmItem) -> Result<(), ConnectorError>;

    /// Rename an entry inside its folder and describe the renamed entry.
    async fn rename(&self, item: &FmItem, new_name: &str) -> Result<FmItem, ConnectorError>;
}
