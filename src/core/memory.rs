//! In-memory reference connector.
//!
//! Keeps a whole tree in memory; nothing survives a reload. Useful for demos
//! and tests, and as the default backend of a freshly embedded widget.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::connector::Connector;
use super::error::ConnectorError;
use crate::config::MEMORY_BASE_URL;
use crate::models::{FileRecord, FmFile, FmFolder, FmItem, NativeFile};
use crate::utils::path;

// =============================================================================
// Manifest
// =============================================================================

/// Initial content of a [`MemoryConnector`].
///
/// Paths are slash-separated and include the mount root, e.g.
/// `home/blog/post.md`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// File entries (parent folders are created as needed)
    pub files: Vec<ManifestFile>,
    /// Folders that must exist even when empty
    pub folders: Vec<String>,
}

/// File entry of a [`Manifest`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestFile {
    pub path: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub mime: String,
    /// Explicit URL; generated from the base URL when absent
    pub url: Option<String>,
    pub modified: Option<u64>,
}

// =============================================================================
// Tree
// =============================================================================

#[derive(Clone, Debug)]
enum Node {
    Folder {
        children: HashMap<String, Node>,
    },
    File {
        size: u64,
        mime: String,
        url: Option<String>,
        modified: Option<u64>,
        content: Option<Vec<u8>>,
    },
}

impl Node {
    fn folder() -> Self {
        Node::Folder {
            children: HashMap::new(),
        }
    }

    fn is_folder(&self) -> bool {
        matches!(self, Node::Folder { .. })
    }

    fn get(&self, segments: &[String]) -> Option<&Node> {
        let mut current = self;
        for segment in segments {
            current = match current {
                Node::Folder { children } => children.get(segment)?,
                Node::File { .. } => return None,
            };
        }
        Some(current)
    }

    fn get_mut(&mut self, segments: &[String]) -> Option<&mut Node> {
        let mut current = self;
        for segment in segments {
            current = match current {
                Node::Folder { children } => children.get_mut(segment)?,
                Node::File { .. } => return None,
            };
        }
        Some(current)
    }

    /// Children of the folder at `segments`.
    fn children_mut(
        &mut self,
        segments: &[String],
    ) -> Result<&mut HashMap<String, Node>, ConnectorError> {
        match self.get_mut(segments) {
            Some(Node::Folder { children }) => Ok(children),
            Some(Node::File { .. }) => Err(ConnectorError::NotAFolder(path::join(segments))),
            None => Err(ConnectorError::NotFound(path::join(segments))),
        }
    }

    /// Walk to `segments`, creating missing folders.
    ///
    /// Returns `None` when a file blocks the way.
    fn ensure_folder(&mut self, segments: &[String]) -> Option<&mut HashMap<String, Node>> {
        let mut current = self;
        for segment in segments {
            let children = match current {
                Node::Folder { children } => children,
                Node::File { .. } => return None,
            };
            current = children.entry(segment.clone()).or_insert_with(Node::folder);
        }
        match current {
            Node::Folder { children } => Some(children),
            Node::File { .. } => None,
        }
    }
}

// =============================================================================
// MemoryConnector
// =============================================================================

/// Connector backed by an in-memory tree.
///
/// Single-threaded; borrows of the tree never outlive a method call.
#[derive(Debug)]
pub struct MemoryConnector {
    base_url: String,
    tree: RefCell<Node>,
}

impl MemoryConnector {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            base_url: MEMORY_BASE_URL.to_string(),
            tree: RefCell::new(Node::folder()),
        }
    }

    /// Create a tree from a manifest.
    ///
    /// A file standing where the manifest expects a folder wins; the
    /// conflicting entry is skipped.
    pub fn from_manifest(manifest: &Manifest) -> Self {
        let mut root = Node::folder();

        for file in &manifest.files {
            let segments = path::split(&file.path);
            let Some((name, dirs)) = segments.split_last() else {
                continue;
            };
            match root.ensure_folder(dirs) {
                Some(children) if !children.get(name).is_some_and(Node::is_folder) => {
                    children.insert(
                        name.clone(),
                        Node::File {
                            size: file.size,
                            mime: file.mime.clone(),
                            url: file.url.clone(),
                            modified: file.modified,
                            content: None,
                        },
                    );
                }
                _ => tracing::warn!(path = %file.path, "manifest conflict: file skipped"),
            }
        }

        for folder in &manifest.folders {
            if root.ensure_folder(&path::split(folder)).is_none() {
                tracing::warn!(path = %folder, "manifest conflict: folder blocked by file");
            }
        }

        Self {
            base_url: MEMORY_BASE_URL.to_string(),
            tree: RefCell::new(root),
        }
    }

    /// Serve files under another base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// URL of the file at `full_path`.
    pub fn url_for(&self, full_path: &[String]) -> String {
        format!("{}/{}", self.base_url, path::join(full_path))
    }

    /// Stored content of an uploaded file.
    pub fn file_bytes(&self, full_path: &[String]) -> Option<Vec<u8>> {
        match self.tree.borrow().get(full_path)? {
            Node::File { content, .. } => content.clone(),
            Node::Folder { .. } => None,
        }
    }

    /// Check if anything exists at `full_path`.
    pub fn exists(&self, full_path: &[String]) -> bool {
        self.tree.borrow().get(full_path).is_some()
    }

    fn record(&self, name: &str, node: &Node, full_path: &[String]) -> Option<FileRecord> {
        match node {
            Node::File {
                size,
                mime,
                url,
                modified,
                ..
            } => Some(FileRecord {
                name: name.to_string(),
                size: *size,
                mime: mime.clone(),
                url: Some(url.clone().unwrap_or_else(|| self.url_for(full_path))),
                modified: *modified,
                ..Default::default()
            }),
            Node::Folder { .. } => None,
        }
    }

    fn item(&self, folder: &FmFolder, name: &str, node: &Node) -> FmItem {
        let full_path = path::child(folder.full_path(), name);
        match self.record(name, node, &full_path) {
            Some(record) => FmItem::File(FmFile::from_record(folder, record)),
            None => FmItem::Folder(folder.child(name)),
        }
    }
}

impl Default for MemoryConnector {
    fn default() -> Self {
        Self::new()
    }
}

/// Folders first, then files; hidden entries last within each group.
fn listing_order(a: &FmItem, b: &FmItem) -> Ordering {
    b.is_folder()
        .cmp(&a.is_folder())
        .then_with(|| a.is_hidden().cmp(&b.is_hidden()))
        .then_with(|| a.name().cmp(b.name()))
}

fn check_name(name: &str) -> Result<(), ConnectorError> {
    if path::is_valid_segment(name) {
        Ok(())
    } else {
        Err(ConnectorError::InvalidName(name.to_string()))
    }
}

/// Require an entry named `name` of the same kind as `item`.
fn check_kind(
    children: &HashMap<String, Node>,
    name: &str,
    item: &FmItem,
) -> Result<(), ConnectorError> {
    match children.get(name) {
        Some(node) if node.is_folder() == item.is_folder() => Ok(()),
        _ => Err(ConnectorError::NotFound(path::join(item.full_path()))),
    }
}

/// Split an item path into (parent segments, name), refusing mount roots.
fn locate(item: &FmItem) -> Result<(&[String], &String), ConnectorError> {
    if let FmItem::Folder(folder) = item
        && folder.is_root()
    {
        return Err(ConnectorError::RootLocked(path::join(folder.full_path())));
    }
    item.full_path()
        .split_last()
        .map(|(name, parent)| (parent, name))
        .ok_or_else(|| ConnectorError::RootLocked(String::new()))
}

#[async_trait(?Send)]
impl Connector for MemoryConnector {
    async fn list(&self, folder: &FmFolder) -> Result<Vec<FmItem>, ConnectorError> {
        let tree = self.tree.borrow();
        let children = match tree.get(folder.full_path()) {
            Some(Node::Folder { children }) => children,
            Some(Node::File { .. }) => {
                return Err(ConnectorError::NotAFolder(path::join(folder.full_path())));
            }
            None => return Err(ConnectorError::NotFound(path::join(folder.full_path()))),
        };

        let mut items: Vec<FmItem> = children
            .iter()
            .map(|(name, node)| self.item(folder, name, node))
            .collect();
        items.sort_by(listing_order);

        tracing::debug!(folder = %path::join(folder.full_path()), count = items.len(), "listed");
        Ok(items)
    }

    async fn upload(
        &self,
        native: NativeFile,
        folder: &FmFolder,
    ) -> Result<FmFile, ConnectorError> {
        check_name(native.name())?;
        let content = native.bytes().await?;
        let name = native.name().to_string();
        let full_path = path::child(folder.full_path(), &name);

        let record = FileRecord {
            name: name.clone(),
            size: content.len() as u64,
            mime: native.mime().to_string(),
            url: Some(self.url_for(&full_path)),
            modified: native.modified(),
            ..Default::default()
        };
        let node = Node::File {
            size: record.size,
            mime: record.mime.clone(),
            url: None,
            modified: record.modified,
            content: Some(content),
        };

        {
            let mut tree = self.tree.borrow_mut();
            let children = tree.children_mut(folder.full_path())?;
            if children.get(&name).is_some_and(Node::is_folder) {
                return Err(ConnectorError::AlreadyExists(path::join(&full_path)));
            }
            children.insert(name.clone(), node);
        }

        tracing::info!(path = %path::join(&full_path), "uploaded");
        Ok(FmFile::from_record(folder, record))
    }

    async fn create_folder(
        &self,
        parent: &FmFolder,
        name: &str,
    ) -> Result<FmFolder, ConnectorError> {
        check_name(name)?;
        let mut tree = self.tree.borrow_mut();
        let children = tree.children_mut(parent.full_path())?;
        if children.contains_key(name) {
            return Err(ConnectorError::AlreadyExists(path::join(&path::child(
                parent.full_path(),
                name,
            ))));
        }
        children.insert(name.to_string(), Node::folder());

        let folder = parent.child(name);
        tracing::info!(path = %path::join(folder.full_path()), "folder created");
        Ok(folder)
    }

    async fn remove(&self, item: &FmItem) -> Result<(), ConnectorError> {
        let (parent, name) = locate(item)?;
        let mut tree = self.tree.borrow_mut();
        let children = tree.children_mut(parent)?;
        check_kind(children, name, item)?;
        children.remove(name);

        tracing::info!(path = %path::join(item.full_path()), "removed");
        Ok(())
    }

    async fn rename(&self, item: &FmItem, new_name: &str) -> Result<FmItem, ConnectorError> {
        check_name(new_name)?;
        let (parent, name) = locate(item)?;

        {
            let mut tree = self.tree.borrow_mut();
            let children = tree.children_mut(parent)?;
            check_kind(children, name, item)?;
            if name != new_name {
                if children.contains_key(new_name) {
                    return Err(ConnectorError::AlreadyExists(path::join(&path::child(
                        parent, new_name,
                    ))));
                }
                if let Some(node) = children.remove(name) {
                    children.insert(new_name.to_string(), node);
                }
            }
        }

        tracing::info!(from = %path::join(item.full_path()), to = %new_name, "renamed");
        let renamed = match item {
            FmItem::Folder(folder) => match folder.parent() {
                Some(up) => FmItem::Folder(up.child(new_name)),
                None => return Err(ConnectorError::RootLocked(path::join(folder.full_path()))),
            },
            FmItem::File(file) => {
                let folder = file.folder();
                let tree = self.tree.borrow();
                let full_path = path::child(folder.full_path(), new_name);
                let node = tree
                    .get(&full_path)
                    .ok_or_else(|| ConnectorError::NotFound(path::join(&full_path)))?;
                self.item(folder, new_name, node)
            }
        };
        Ok(renamed)
    }
}
