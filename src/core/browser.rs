//! Browser controller.
//!
//! Owns the folder currently shown, issues connector calls on navigation and
//! mutation, and refreshes the listing afterwards. Rendering is up to the host.

use std::rc::Rc;

use super::connector::Connector;
use super::dialog::PickMode;
use super::error::{BrowserError, Operation};
use super::upload::{UploadQueue, UploadSummary};
use crate::config::FmConfig;
use crate::models::{FmFolder, FmItem, NativeFile};

/// State of one browser grid.
pub struct Browser {
    connector: Rc<dyn Connector>,
    config: FmConfig,
    pick: Option<PickMode>,
    folder: FmFolder,
}

impl Browser {
    /// Open `folder` and load its listing.
    pub async fn open(
        connector: Rc<dyn Connector>,
        config: FmConfig,
        pick: Option<PickMode>,
        folder: FmFolder,
    ) -> Result<Self, BrowserError> {
        let mut browser = Self {
            connector,
            config,
            pick,
            folder: folder.unloaded(),
        };
        browser.refresh().await?;
        Ok(browser)
    }

    /// Current folder, with its listing attached.
    pub fn folder(&self) -> &FmFolder {
        &self.folder
    }

    pub fn config(&self) -> &FmConfig {
        &self.config
    }

    pub fn pick(&self) -> Option<PickMode> {
        self.pick
    }

    /// All entries of the current folder.
    pub fn items(&self) -> &[FmItem] {
        self.folder.children().unwrap_or(&[])
    }

    /// Entries to display: hidden ones only with `show_hidden`, files only
    /// when not restricted by a folder pick.
    pub fn visible_items(&self) -> Vec<&FmItem> {
        self.items().iter().filter(|i| self.is_visible(i)).collect()
    }

    fn is_visible(&self, item: &FmItem) -> bool {
        if item.is_hidden() && !self.config.show_hidden {
            return false;
        }
        !(self.pick == Some(PickMode::Folder)
            && !item.is_folder()
            && !self.config.show_files_when_picking_folder)
    }

    /// Visible entry named `name`.
    pub fn find(&self, name: &str) -> Option<&FmItem> {
        self.items()
            .iter()
            .find(|i| i.name() == name && self.is_visible(i))
    }

    fn require(&self, name: &str) -> Result<FmItem, BrowserError> {
        self.find(name)
            .cloned()
            .ok_or_else(|| BrowserError::NoSuchItem(name.to_string()))
    }

    /// Check if the pick mode accepts `item`.
    pub fn can_pick(&self, item: &FmItem) -> bool {
        self.pick.is_some_and(|mode| mode.accepts(item.item_type()))
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Show another folder. The current folder is kept when listing fails.
    pub async fn navigate(&mut self, folder: FmFolder) -> Result<&FmFolder, BrowserError> {
        let mut folder = folder.unloaded();
        let items = self.connector.list(&folder).await?;
        folder.set_children(items);
        self.folder = folder;

        tracing::debug!(path = ?self.folder.full_path(), "navigated");
        Ok(&self.folder)
    }

    /// Enter the visible sub-folder named `name`.
    pub async fn enter(&mut self, name: &str) -> Result<&FmFolder, BrowserError> {
        let target = match self.find(name) {
            Some(FmItem::Folder(folder)) => folder.unloaded(),
            _ => return Err(BrowserError::NoSuchItem(name.to_string())),
        };
        self.navigate(target).await
    }

    /// Go one level up. Returns `false` at the mount root.
    pub async fn up(&mut self) -> Result<bool, BrowserError> {
        match self.folder.parent() {
            Some(parent) => {
                self.navigate(parent).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Reload the current listing.
    pub async fn refresh(&mut self) -> Result<(), BrowserError> {
        let items = self.connector.list(&self.folder).await?;
        self.folder.set_children(items);
        Ok(())
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    fn allow(&self, operation: Operation) -> Result<(), BrowserError> {
        let allowed = match operation {
            Operation::Upload => self.config.allow_upload,
            Operation::CreateFolder => self.config.allow_create_folder,
            Operation::Delete => self.config.allow_delete,
            Operation::Rename => self.config.allow_rename,
        };
        if allowed {
            Ok(())
        } else {
            Err(BrowserError::NotAllowed(operation))
        }
    }

    /// Create a sub-folder in the current folder.
    pub async fn create_folder(&mut self, name: &str) -> Result<FmFolder, BrowserError> {
        self.allow(Operation::CreateFolder)?;
        let created = self.connector.create_folder(&self.folder, name).await?;
        self.refresh().await?;
        Ok(created)
    }

    /// Remove the visible entry named `name`.
    pub async fn remove(&mut self, name: &str) -> Result<(), BrowserError> {
        self.allow(Operation::Delete)?;
        let item = self.require(name)?;
        self.connector.remove(&item).await?;
        self.refresh().await
    }

    /// Rename the visible entry named `name`.
    pub async fn rename(&mut self, name: &str, new_name: &str) -> Result<FmItem, BrowserError> {
        self.allow(Operation::Rename)?;
        let item = self.require(name)?;
        let renamed = self.connector.rename(&item, new_name).await?;
        self.refresh().await?;
        Ok(renamed)
    }

    /// Empty upload queue targeting the current folder.
    pub fn upload_queue(&self) -> Result<UploadQueue, BrowserError> {
        self.allow(Operation::Upload)?;
        Ok(UploadQueue::new(self.folder.unloaded()))
    }

    /// Run a prepared queue and reload the listing.
    pub async fn run_upload(
        &mut self,
        queue: &mut UploadQueue,
    ) -> Result<UploadSummary, BrowserError> {
        self.allow(Operation::Upload)?;
        let summary = queue.run(self.connector.as_ref()).await;
        if queue.folder().same_location(&self.folder) {
            self.refresh().await?;
        }
        Ok(summary)
    }

    /// Validate and upload `natives` into the current folder.
    pub async fn upload(
        &mut self,
        natives: Vec<NativeFile>,
    ) -> Result<UploadSummary, BrowserError> {
        let mut queue = self.upload_queue()?;
        queue.extend(natives);
        self.run_upload(&mut queue).await
    }
}
