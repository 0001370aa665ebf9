//! Upload queue.
//!
//! Collects native files picked by the user, validates them and uploads the
//! valid ones one after another.

use std::rc::Rc;

use super::connector::Connector;
use super::validator::{DefaultValidator, FileValidator};
use crate::models::{FmFile, FmFolder, NativeFile};

/// State of a queued file.
#[derive(Clone, Debug)]
pub enum UploadStatus {
    /// Waiting for [`UploadQueue::run`]
    Pending,
    /// Rejected by the validator; never uploaded
    Skipped,
    /// Stored by the connector
    Done(FmFile),
    /// The connector rejected the upload
    Failed(String),
}

/// A queued file with its state.
#[derive(Debug)]
pub struct UploadEntry {
    pub file: FmFile,
    pub status: UploadStatus,
}

/// Outcome counts of [`UploadQueue::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UploadSummary {
    pub uploaded: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Pending uploads into one folder.
pub struct UploadQueue {
    folder: FmFolder,
    validator: Rc<dyn FileValidator>,
    entries: Vec<UploadEntry>,
}

impl UploadQueue {
    pub fn new(folder: FmFolder) -> Self {
        Self {
            folder,
            validator: Rc::new(DefaultValidator),
            entries: Vec::new(),
        }
    }

    /// Use another validity strategy for files added from now on.
    pub fn with_validator(mut self, validator: Rc<dyn FileValidator>) -> Self {
        self.validator = validator;
        self
    }

    /// Target folder.
    pub fn folder(&self) -> &FmFolder {
        &self.folder
    }

    pub fn entries(&self) -> &[UploadEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Queue a file; invalid files are kept as [`UploadStatus::Skipped`].
    pub fn add(&mut self, native: NativeFile) -> &UploadEntry {
        let file = FmFile::from_native(&self.folder, native).validated_by(self.validator.as_ref());
        let status = if file.is_valid() {
            UploadStatus::Pending
        } else {
            tracing::debug!(name = %file.name(), "invalid file skipped");
            UploadStatus::Skipped
        };
        self.entries.push(UploadEntry { file, status });
        &self.entries[self.entries.len() - 1]
    }

    /// Queue several files.
    pub fn extend(&mut self, natives: impl IntoIterator<Item = NativeFile>) {
        for native in natives {
            self.add(native);
        }
    }

    /// Drop a queued entry that has not been uploaded.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|e| e.file.name() != name || matches!(e.status, UploadStatus::Done(_)));
        self.entries.len() != before
    }

    /// Check if no entry is waiting.
    pub fn is_finished(&self) -> bool {
        !self
            .entries
            .iter()
            .any(|e| matches!(e.status, UploadStatus::Pending))
    }

    /// Upload every pending entry in order.
    ///
    /// A failed upload is recorded and the queue moves on.
    pub async fn run(&mut self, connector: &dyn Connector) -> UploadSummary {
        for entry in self
            .entries
            .iter_mut()
            .filter(|e| matches!(e.status, UploadStatus::Pending))
        {
            let Some(native) = entry.file.take_native() else {
                entry.status = UploadStatus::Failed("no native file attached".to_string());
                continue;
            };
            entry.status = match connector.upload(native, &self.folder).await {
                Ok(stored) => UploadStatus::Done(stored),
                Err(err) => {
                    tracing::warn!(name = %entry.file.name(), error = %err, "upload failed");
                    UploadStatus::Failed(err.to_string())
                }
            };
        }

        let summary = self.summary();
        tracing::info!(
            uploaded = summary.uploaded,
            skipped = summary.skipped,
            failed = summary.failed,
            "upload finished"
        );
        summary
    }

    /// Count entries by state.
    pub fn summary(&self) -> UploadSummary {
        let mut summary = UploadSummary::default();
        for entry in &self.entries {
            match entry.status {
                UploadStatus::Done(_) => summary.uploaded += 1,
                UploadStatus::Skipped => summary.skipped += 1,
                UploadStatus::Failed(_) => summary.failed += 1,
                UploadStatus::Pending => {}
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AcceptAll, MemoryConnector};
    use crate::models::FmItem;

    fn native(name: &str, content: &[u8]) -> NativeFile {
        NativeFile::from_bytes(name, "text/plain", content.to_vec())
    }

    #[test]
    fn test_add_validates() {
        let mut queue = UploadQueue::new(FmFolder::at_root(["home"]));
        assert!(matches!(queue.add(native("a.txt", b"a")).status, UploadStatus::Pending));
        assert!(matches!(queue.add(native("empty.txt", b"")).status, UploadStatus::Skipped));
        assert!(matches!(queue.add(native("folder", b"xx")).status, UploadStatus::Skipped));
        assert!(!queue.is_finished());
        assert_eq!(queue.entries()[0].file.full_path(), ["home", "a.txt"]);
    }

    #[test]
    fn test_custom_validator() {
        let mut queue =
            UploadQueue::new(FmFolder::at_root(["home"])).with_validator(Rc::new(AcceptAll));
        assert!(matches!(queue.add(native("README", b"")).status, UploadStatus::Pending));
    }

    #[tokio::test]
    async fn test_run() {
        let fs = MemoryConnector::new();
        fs.create_folder(&FmFolder::default(), "home").await.unwrap();

        let mut queue = UploadQueue::new(FmFolder::at_root(["home"]));
        queue.extend([native("a.txt", b"aa"), native("skip", b""), native("b.txt", b"b")]);

        let summary = queue.run(&fs).await;
        assert_eq!(
            summary,
            UploadSummary {
                uploaded: 2,
                skipped: 1,
                failed: 0
            }
        );
        assert!(queue.is_finished());
        match &queue.entries()[0].status {
            UploadStatus::Done(file) => assert_eq!(file.url(), "memory://home/a.txt"),
            other => panic!("unexpected status: {:?}", other),
        }
        assert_eq!(
            fs.file_bytes(&crate::utils::path::segments(&["home", "b.txt"])),
            Some(b"b".to_vec())
        );
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_queue() {
        let fs = MemoryConnector::new();
        let home = fs.create_folder(&FmFolder::default(), "home").await.unwrap();
        fs.create_folder(&home, "taken.txt").await.unwrap();

        let mut queue = UploadQueue::new(FmFolder::at_root(["home"]));
        queue.extend([native("taken.txt", b"x"), native("ok.txt", b"y")]);
        let summary = queue.run(&fs).await;
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.uploaded, 1);
        assert!(matches!(queue.entries()[0].status, UploadStatus::Failed(_)));

        let listing = fs.list(&home).await.unwrap();
        assert!(listing.iter().any(|i| matches!(i, FmItem::File(f) if f.name() == "ok.txt")));
    }

    #[test]
    fn test_remove_entry() {
        let mut queue = UploadQueue::new(FmFolder::at_root(["home"]));
        queue.add(native("a.txt", b"a"));
        assert!(queue.remove("a.txt"));
        assert!(!queue.remove("a.txt"));
        assert!(queue.is_empty());
    }
}
