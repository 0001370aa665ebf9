use serde::Serialize;

use super::{FmFile, FmFolder};

/// Kind of a browsed entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    File,
    Folder,
}

/// A file or folder entry.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "itemType", rename_all = "lowercase")]
pub enum FmItem {
    File(FmFile),
    Folder(FmFolder),
}

impl FmItem {
    pub fn name(&self) -> &str {
        match self {
            FmItem::File(file) => file.name(),
            FmItem::Folder(folder) => folder.name(),
        }
    }

    pub fn full_path(&self) -> &[String] {
        match self {
            FmItem::File(file) => file.full_path(),
            FmItem::Folder(folder) => folder.full_path(),
        }
    }

    pub fn item_type(&self) -> ItemType {
        match self {
            FmItem::File(_) => ItemType::File,
            FmItem::Folder(_) => ItemType::Folder,
        }
    }

    /// Check if this entry is a folder.
    pub fn is_folder(&self) -> bool {
        matches!(self, FmItem::Folder(_))
    }

    /// Check if this entry is hidden (dot-name).
    pub fn is_hidden(&self) -> bool {
        self.name().starts_with('.')
    }

    pub fn as_file(&self) -> Option<&FmFile> {
        match self {
            FmItem::File(file) => Some(file),
            FmItem::Folder(_) => None,
        }
    }

    pub fn as_folder(&self) -> Option<&FmFolder> {
        match self {
            FmItem::Folder(folder) => Some(folder),
            FmItem::File(_) => None,
        }
    }
}

impl From<FmFile> for FmItem {
    fn from(file: FmFile) -> Self {
        FmItem::File(file)
    }
}

impl From<FmFolder> for FmItem {
    fn from(folder: FmFolder) -> Self {
        FmItem::Folder(folder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FileRecord;

    #[test]
    fn test_item_accessors() {
        let folder = FmFolder::new(["docs"], ["home"]);
        let file: FmItem = FmFile::from_record(&folder, FileRecord::new(".env", 3, "")).into();
        assert_eq!(file.item_type(), ItemType::File);
        assert_eq!(file.full_path(), ["home", "docs", ".env"]);
        assert!(file.is_hidden());
        assert!(file.as_folder().is_none());

        let sub: FmItem = folder.child("img").into();
        assert_eq!(sub.item_type(), ItemType::Folder);
        assert_eq!(sub.name(), "img");
        assert!(sub.is_folder());
    }

    #[test]
    fn test_item_type_tag() {
        let folder = FmFolder::at_root(["home"]);
        let json = serde_json::to_value(FmItem::Folder(folder.child("a"))).unwrap();
        assert_eq!(json["itemType"], "folder");
        assert_eq!(json["fullPath"], serde_json::json!(["home", "a"]));

        let file = FmItem::File(FmFile::from_record(&folder, FileRecord::new("a.txt", 1, "")));
        let json = serde_json::to_value(file).unwrap();
        assert_eq!(json["itemType"], "file");
        assert_eq!(serde_json::to_value(ItemType::File).unwrap(), "file");
    }
}
