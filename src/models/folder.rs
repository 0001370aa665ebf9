use serde::Serialize;

use super::FmItem;
use crate::utils::path;

/// A folder in the browsed tree.
///
/// A folder is located by `root` (the mount root) and `path` (segments below
/// the root). Its children are filled in lazily from a connector listing.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FmFolder {
    name: String,
    path: Vec<String>,
    root: Vec<String>,
    full_path: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    children: Option<Vec<FmItem>>,
}

impl FmFolder {
    /// Create a folder at `path` below `root`.
    pub fn new<P, R, S, T>(path: P, root: R) -> Self
    where
        P: IntoIterator<Item = S>,
        R: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self::from_segments(
            path.into_iter().map(Into::into).collect(),
            root.into_iter().map(Into::into).collect(),
        )
    }

    /// The root folder of a mount.
    pub fn at_root<R, T>(root: R) -> Self
    where
        R: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::from_segments(Vec::new(), root.into_iter().map(Into::into).collect())
    }

    pub(crate) fn from_segments(path: Vec<String>, root: Vec<String>) -> Self {
        let full_path = path::concat(&root, &path);
        let name = full_path.last().cloned().unwrap_or_default();
        Self {
            name,
            path,
            root,
            full_path,
            children: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Segments relative to the root.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Segments identifying the mount root.
    pub fn root(&self) -> &[String] {
        &self.root
    }

    /// `root` followed by `path`.
    pub fn full_path(&self) -> &[String] {
        &self.full_path
    }

    /// Check if this folder is the mount root.
    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Listing attached by the last connector call, if any.
    pub fn children(&self) -> Option<&[FmItem]> {
        self.children.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.children.is_some()
    }

    /// Replace the listing.
    pub fn set_children(&mut self, children: Vec<FmItem>) {
        self.children = Some(children);
    }

    /// Folder one level deeper (not loaded).
    pub fn child(&self, name: &str) -> FmFolder {
        Self::from_segments(path::child(&self.path, name), self.root.clone())
    }

    /// Folder one level up; `None` at the mount root.
    pub fn parent(&self) -> Option<FmFolder> {
        path::parent(&self.path).map(|p| Self::from_segments(p, self.root.clone()))
    }

    /// Same location without the listing.
    pub fn unloaded(&self) -> FmFolder {
        Self::from_segments(self.path.clone(), self.root.clone())
    }

    /// Check if both folders point at the same location.
    pub fn same_location(&self, other: &FmFolder) -> bool {
        self.root == other.root && self.path == other.path
    }
}
