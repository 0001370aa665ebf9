//! Browser dialog.
//!
//! [`BrowserDialog`] holds the state a host renders in a modal: title,
//! observed path/root and pick mode. [`DialogService`] opens dialogs backed by
//! a connector passed in at construction, and [`BrowserSession`] keeps the
//! dialog in sync with its [`Browser`].

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::browser::Browser;
use super::connector::Connector;
use super::error::{ConfigError, DialogError};
use crate::config::{DEFAULT_DIALOG_TITLE, FmConfig};
use crate::models::{FmFolder, FmItem, ItemType};

// =============================================================================
// Dialog Input
// =============================================================================

/// What a dialog lets the user choose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PickMode {
    File,
    Folder,
}

impl PickMode {
    /// Check if items of `item_type` can be picked.
    pub fn accepts(self, item_type: ItemType) -> bool {
        matches!(
            (self, item_type),
            (PickMode::File, ItemType::File) | (PickMode::Folder, ItemType::Folder)
        )
    }
}

/// Data a host passes when opening a dialog.
///
/// `path` and `root` are required; see [`BrowserDialog::init`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogData {
    pub path: Option<Vec<String>>,
    pub root: Option<Vec<String>>,
    pub title: Option<String>,
    pub pick: Option<PickMode>,
    pub config: Option<FmConfig>,
}

impl DialogData {
    pub fn new<P, R, S, T>(path: P, root: R) -> Self
    where
        P: IntoIterator<Item = S>,
        R: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            path: Some(path.into_iter().map(Into::into).collect()),
            root: Some(root.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_pick(mut self, pick: PickMode) -> Self {
        self.pick = Some(pick);
        self
    }

    pub fn with_config(mut self, config: FmConfig) -> Self {
        self.config = Some(config);
        self
    }
}

// =============================================================================
// BrowserDialog
// =============================================================================

/// How a dialog ended.
#[derive(Clone, Debug)]
pub enum DialogResult {
    Picked(FmItem),
    Dismissed,
}

impl DialogResult {
    /// The picked item, if any.
    pub fn into_item(self) -> Option<FmItem> {
        match self {
            DialogResult::Picked(item) => Some(item),
            DialogResult::Dismissed => None,
        }
    }
}

/// State of an open browser dialog.
#[derive(Clone, Debug)]
pub struct BrowserDialog {
    title: String,
    path: Vec<String>,
    root: Vec<String>,
    pick: Option<PickMode>,
    config: FmConfig,
}

impl BrowserDialog {
    /// Validate the host data.
    ///
    /// Fails when `path` or `root` is absent. Empty sequences are accepted
    /// and point at the top level.
    pub fn init(data: DialogData) -> Result<Self, ConfigError> {
        let path = data.path.ok_or(ConfigError::MissingPath)?;
        let root = data.root.ok_or(ConfigError::MissingRoot)?;
        let title = data
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_DIALOG_TITLE.to_string());

        Ok(Self {
            title,
            path,
            root,
            pick: data.pick,
            config: data.config.unwrap_or_default(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Observed path below the root.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Observed mount root.
    pub fn root(&self) -> &[String] {
        &self.root
    }

    pub fn pick(&self) -> Option<PickMode> {
        self.pick
    }

    pub fn config(&self) -> &FmConfig {
        &self.config
    }

    /// Folder at the observed path/root (not loaded).
    pub fn folder(&self) -> FmFolder {
        FmFolder::from_segments(self.path.clone(), self.root.clone())
    }

    /// Follow the browser into `folder`.
    pub fn navigated(&mut self, folder: &FmFolder) {
        self.path = folder.path().to_vec();
        self.root = folder.root().to_vec();
    }

    /// Check if the pick mode accepts `item`. Without a pick mode nothing
    /// can be picked.
    pub fn can_pick(&self, item: &FmItem) -> bool {
        self.pick.is_some_and(|mode| mode.accepts(item.item_type()))
    }

    /// Close the dialog with `item`.
    pub fn picked(self, item: FmItem) -> DialogResult {
        tracing::debug!(name = %item.name(), "dialog picked");
        DialogResult::Picked(item)
    }

    /// Close the dialog without a choice.
    pub fn dismiss(self) -> DialogResult {
        DialogResult::Dismissed
    }
}

// =============================================================================
// DialogService
// =============================================================================

/// Opens browser dialogs against one connector.
#[derive(Clone)]
pub struct DialogService {
    connector: Rc<dyn Connector>,
    config: FmConfig,
}

impl DialogService {
    pub fn new(connector: Rc<dyn Connector>) -> Self {
        Self {
            connector,
            config: FmConfig::default(),
        }
    }

    /// Options used when the dialog data carries none.
    pub fn with_config(mut self, config: FmConfig) -> Self {
        self.config = config;
        self
    }

    pub fn connector(&self) -> Rc<dyn Connector> {
        Rc::clone(&self.connector)
    }

    /// Validate `data` and open a browser at its path/root.
    pub async fn open(&self, mut data: DialogData) -> Result<BrowserSession, DialogError> {
        if data.config.is_none() {
            data.config = Some(self.config.clone());
        }
        let dialog = BrowserDialog::init(data)?;
        let browser = Browser::open(
            self.connector(),
            dialog.config().clone(),
            dialog.pick(),
            dialog.folder(),
        )
        .await?;

        tracing::debug!(title = %dialog.title(), "dialog opened");
        Ok(BrowserSession { dialog, browser })
    }
}

// =============================================================================
// BrowserSession
// =============================================================================

/// An open dialog together with its browser.
pub struct BrowserSession {
    dialog: BrowserDialog,
    browser: Browser,
}

impl BrowserSession {
    pub fn dialog(&self) -> &BrowserDialog {
        &self.dialog
    }

    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Direct access for mutations (upload, rename, ...).
    pub fn browser_mut(&mut self) -> &mut Browser {
        &mut self.browser
    }

    fn sync(&mut self) {
        self.dialog.navigated(self.browser.folder());
    }

    pub async fn navigate(&mut self, folder: FmFolder) -> Result<(), DialogError> {
        self.browser.navigate(folder).await?;
        self.sync();
        Ok(())
    }

    pub async fn enter(&mut self, name: &str) -> Result<(), DialogError> {
        self.browser.enter(name).await?;
        self.sync();
        Ok(())
    }

    /// Go one level up; `false` at the mount root.
    pub async fn up(&mut self) -> Result<bool, DialogError> {
        let moved = self.browser.up().await?;
        self.sync();
        Ok(moved)
    }

    /// The visible item named `name`, if the pick mode accepts it.
    pub fn pickable(&self, name: &str) -> Result<FmItem, DialogError> {
        self.browser
            .find(name)
            .filter(|item| self.dialog.can_pick(item))
            .cloned()
            .ok_or_else(|| DialogError::NotPickable(name.to_string()))
    }

    /// Close with the visible item named `name`.
    ///
    /// Use [`pickable`](Self::pickable) first to keep the session open on
    /// failure.
    pub fn pick(self, name: &str) -> Result<DialogResult, DialogError> {
        let item = self.pickable(name)?;
        Ok(self.dialog.picked(item))
    }

    /// Close with the current folder (folder pick mode).
    pub fn pick_current(self) -> Result<DialogResult, DialogError> {
        let folder = FmItem::Folder(self.browser.folder().unloaded());
        if !self.dialog.can_pick(&folder) {
            return Err(DialogError::NotPickable(folder.name().to_string()));
        }
        Ok(self.dialog.picked(folder))
    }

    pub fn dismiss(self) -> DialogResult {
        self.dialog.dismiss()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FileRecord;
    use crate::models::FmFile;

    #[test]
    fn test_init_requires_path_and_root() {
        let missing_root = DialogData {
            path: Some(vec![]),
            ..Default::default()
        };
        assert_eq!(
            BrowserDialog::init(missing_root).unwrap_err(),
            ConfigError::MissingRoot
        );

        let missing_path = DialogData {
            root: Some(vec!["home".to_string()]),
            ..Default::default()
        };
        assert_eq!(
            BrowserDialog::init(missing_path).unwrap_err(),
            ConfigError::MissingPath
        );

        assert!(BrowserDialog::init(DialogData::default()).is_err());
    }

    #[test]
    fn test_init_defaults() {
        let dialog = BrowserDialog::init(DialogData::new(Vec::<String>::new(), ["home"])).unwrap();
        assert_eq!(dialog.title(), "File Browser");
        assert_eq!(dialog.pick(), None);
        assert_eq!(dialog.config(), &FmConfig::default());
        assert!(dialog.folder().is_root());

        let dialog =
            BrowserDialog::init(DialogData::new(["a"], ["home"]).with_title("")).unwrap();
        assert_eq!(dialog.title(), "File Browser");
    }

    #[test]
    fn test_init_from_json() {
        let data: DialogData = serde_json::from_str(
            r#"{"path": ["docs"], "root": ["home"], "title": "Pick a file", "pick": "file",
                "config": {"show_hidden": true}}"#,
        )
        .unwrap();
        let dialog = BrowserDialog::init(data).unwrap();
        assert_eq!(dialog.title(), "Pick a file");
        assert_eq!(dialog.pick(), Some(PickMode::File));
        assert!(dialog.config().show_hidden);
        assert_eq!(dialog.folder().full_path(), ["home", "docs"]);
    }

    #[test]
    fn test_navigated() {
        let mut dialog = BrowserDialog::init(DialogData::new(["a"], ["home"])).unwrap();
        let folder = FmFolder::new(["b", "c"], ["work"]);
        dialog.navigated(&folder);
        assert_eq!(dialog.path(), ["b", "c"]);
        assert_eq!(dialog.root(), ["work"]);
    }

    #[test]
    fn test_picked_and_dismissed() {
        let dialog = BrowserDialog::init(DialogData::new(["a"], ["home"]).with_pick(PickMode::File))
            .unwrap();
        let folder = dialog.folder();
        let file = FmItem::File(FmFile::from_record(&folder, FileRecord::new("x.txt", 1, "")));
        assert!(dialog.can_pick(&file));
        assert!(!dialog.can_pick(&FmItem::Folder(folder.child("sub"))));

        let picked = dialog.clone().picked(file).into_item().unwrap();
        assert_eq!(picked.full_path(), ["home", "a", "x.txt"]);
        assert!(dialog.dismiss().into_item().is_none());
    }

    #[test]
    fn test_pick_mode_accepts() {
        assert!(PickMode::File.accepts(ItemType::File));
        assert!(!PickMode::File.accepts(ItemType::Folder));
        assert!(PickMode::Folder.accepts(ItemType::Folder));
    }
}
