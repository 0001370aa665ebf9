//! File validity strategies.
//!
//! Decides which files may be uploaded. Hosts can plug their own
//! [`FileValidator`] into an [`UploadQueue`](super::UploadQueue).

use std::sync::LazyLock;

use regex::Regex;

use crate::models::FmFile;

/// Dot-files such as `.htaccess`.
static DOT_FILE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^\.[^.]+").ok());

/// Decides whether a file is valid.
pub trait FileValidator {
    fn is_valid(&self, file: &FmFile) -> bool;
}

/// Non-empty files with an extension, or dot-files.
///
/// Empty or extension-less files are likely folders dropped by the user.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultValidator;

impl DefaultValidator {
    fn is_dot_file(name: &str) -> bool {
        DOT_FILE.as_ref().is_some_and(|re| re.is_match(name))
    }
}

impl FileValidator for DefaultValidator {
    fn is_valid(&self, file: &FmFile) -> bool {
        file.size() > 0 && (!file.extension().is_empty() || Self::is_dot_file(file.name()))
    }
}

/// Accepts every file.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAll;

impl FileValidator for AcceptAll {
    fn is_valid(&self, _file: &FmFile) -> bool {
        true
    }
}

/// Non-empty files whose extension is in a fixed list (case-insensitive).
#[derive(Clone, Debug, Default)]
pub struct ExtensionAllowList {
    extensions: Vec<String>,
}

impl ExtensionAllowList {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }
}

impl FileValidator for ExtensionAllowList {
    fn is_valid(&self, file: &FmFile) -> bool {
        file.size() > 0 && self.extensions.iter().any(|e| e == file.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FileRecord, FmFolder};

    fn file(name: &str, size: u64) -> FmFile {
        FmFile::from_record(&FmFolder::at_root(["r"]), FileRecord::new(name, size, ""))
    }

    #[test]
    fn test_default_validator() {
        assert!(DefaultValidator.is_valid(&file("a.txt", 1)));
        assert!(DefaultValidator.is_valid(&file(".htaccess", 1)));
        assert!(!DefaultValidator.is_valid(&file("a.txt", 0)));
        assert!(!DefaultValidator.is_valid(&file("README", 10)));
        assert!(!DefaultValidator.is_valid(&file("", 0)));
    }

    #[test]
    fn test_dot_file_pattern() {
        assert!(DefaultValidator::is_dot_file(".env"));
        assert!(!DefaultValidator::is_dot_file(".."));
        assert!(!DefaultValidator::is_dot_file("env."));
    }

    #[test]
    fn test_accept_all() {
        assert!(AcceptAll.is_valid(&file("README", 0)));
    }

    #[test]
    fn test_extension_allow_list() {
        let images = ExtensionAllowList::new([".PNG", "jpg"]);
        assert!(images.is_valid(&file("cat.png", 5)));
        assert!(images.is_valid(&file("cat.JPG", 5)));
        assert!(!images.is_valid(&file("cat.gif", 5)));
        assert!(!images.is_valid(&file("cat.png", 0)));
    }

    #[test]
    fn test_revalidate() {
        let mut readme = file("README", 10);
        assert!(!readme.is_valid());
        readme.revalidate(&AcceptAll);
        assert!(readme.is_valid());
    }
}
