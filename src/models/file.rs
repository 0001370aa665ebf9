//! File descriptors.
//!
//! An [`FmFile`] describes either an entry of a connector listing (built from
//! a [`FileRecord`]) or a pending upload (built from a [`NativeFile`]). Only
//! the latter can be read.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::de::{Deserializer, IgnoredAny};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

use super::{FmFolder, NativeFile};
use crate::config::DEFAULT_MIME;
use crate::core::error::ReadError;
use crate::core::validator::{DefaultValidator, FileValidator};
use crate::utils::{HumanSize, path};

// =============================================================================
// FileRecord
// =============================================================================

/// Plain file record as returned by a connector.
///
/// Every field is optional when deserializing. Malformed `size` or `type`
/// values fall back to `0` and `""` instead of failing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRecord {
    /// File name including extension
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    /// Size in bytes
    #[serde(deserialize_with = "lenient_size")]
    pub size: u64,
    /// MIME type, e.g. `image/jpeg`
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub mime: String,
    /// URL where the file is served
    pub url: Option<String>,
    /// Download URL, when different from `url`
    pub download: Option<String>,
    /// Thumbnail URL
    pub thumbnail: Option<String>,
    /// Preview URL
    pub preview: Option<String>,
    /// Last modification time as Unix timestamp in milliseconds
    pub modified: Option<u64>,
}

impl FileRecord {
    pub fn new(name: impl Into<String>, size: u64, mime: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime: mime.into(),
            ..Default::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

#[allow(dead_code)]
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSize {
    Int(u64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

fn positive(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value as u64
    } else {
        0
    }
}

fn lenient_size<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    Ok(match RawSize::deserialize(deserializer)? {
        RawSize::Int(n) => n,
        RawSize::Float(f) => positive(f),
        RawSize::Text(s) => s.trim().parse::<f64>().map(positive).unwrap_or(0),
        RawSize::Other(_) => 0,
    })
}

#[allow(dead_code)]
#[derive(Deserialize)]
#[serde(untagged)]
enum RawString {
    Text(String),
    Other(IgnoredAny),
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match RawString::deserialize(deserializer)? {
        RawString::Text(s) => s,
        RawString::Other(_) => String::new(),
    })
}

// =============================================================================
// FmFile
// =============================================================================

/// A file entry with its derived display fields.
#[derive(Debug)]
pub struct FmFile {
    name: String,
    size: u64,
    mime: String,
    modified: Option<u64>,
    folder: FmFolder,
    full_path: Vec<String>,
    extension: String,
    is_valid: bool,
    human_size: HumanSize,
    url: String,
    download: Option<String>,
    thumbnail: Option<String>,
    preview: Option<String>,
    native: Option<NativeFile>,
}

impl FmFile {
    /// Build a descriptor for a listed file inside `folder`.
    pub fn from_record(folder: &FmFolder, record: FileRecord) -> Self {
        let mut file = Self::build(folder, record.name, record.size, &record.mime, record.modified);
        file.url = record.url.unwrap_or_default();
        file.download = record.download;
        file.thumbnail = record.thumbnail;
        file.preview = record.preview;
        file
    }

    /// Build a descriptor for a pending upload into `folder`.
    pub fn from_native(folder: &FmFolder, native: NativeFile) -> Self {
        let mut file = Self::build(
            folder,
            native.name().to_string(),
            native.size(),
            native.mime(),
            native.modified(),
        );
        file.native = Some(native);
        file
    }

    fn build(
        folder: &FmFolder,
        name: String,
        size: u64,
        mime: &str,
        modified: Option<u64>,
    ) -> Self {
        let extension = extension_of(&name);
        let mut file = Self {
            full_path: path::child(folder.full_path(), &name),
            folder: folder.unloaded(),
            name,
            size,
            mime: mime.to_lowercase(),
            modified,
            extension,
            is_valid: false,
            human_size: HumanSize::from_bytes(size),
            url: String::new(),
            download: None,
            thumbnail: None,
            preview: None,
            native: None,
        };
        file.is_valid = DefaultValidator.is_valid(&file);
        file
    }

    /// Recompute `is_valid` with another strategy.
    pub fn revalidate(&mut self, validator: &dyn FileValidator) {
        self.is_valid = validator.is_valid(self);
    }

    /// Builder form of [`revalidate`](Self::revalidate).
    pub fn validated_by(mut self, validator: &dyn FileValidator) -> Self {
        self.revalidate(validator);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size in bytes
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Lower-case MIME type, e.g. `image/jpeg`
    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn modified(&self) -> Option<u64> {
        self.modified
    }

    /// Containing folder (without its listing).
    pub fn folder(&self) -> &FmFolder {
        &self.folder
    }

    /// Parent folder path followed by the file name.
    pub fn full_path(&self) -> &[String] {
        &self.full_path
    }

    /// Lower-case extension without the dot, e.g. `jpg`.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Invalid files (e.g. empty ones, possibly folders) must not be uploaded.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn human_size(&self) -> HumanSize {
        self.human_size
    }

    /// URL where the file is served (empty when unknown).
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Download URL; falls back to [`url`](Self::url).
    pub fn download(&self) -> &str {
        non_empty(self.download.as_deref()).unwrap_or(&self.url)
    }

    /// Thumbnail URL; falls back to `url` for images.
    pub fn thumbnail(&self) -> Option<&str> {
        non_empty(self.thumbnail.as_deref()).or_else(|| self.image_url())
    }

    /// Preview URL; falls back to `url` for images.
    pub fn preview(&self) -> Option<&str> {
        non_empty(self.preview.as_deref()).or_else(|| self.image_url())
    }

    fn image_url(&self) -> Option<&str> {
        if self.is_image() {
            non_empty(Some(&self.url))
        } else {
            None
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime.contains("image")
    }

    pub fn is_video(&self) -> bool {
        self.mime.contains("video")
    }

    pub fn is_text(&self) -> bool {
        self.mime.contains("text")
    }

    pub fn is_audio(&self) -> bool {
        self.mime.contains("audio")
    }

    /// Check if this file is hidden (dot-file).
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }

    // =========================================================================
    // Native handle
    // =========================================================================

    /// Check if the content can be read (a native handle is attached).
    pub fn is_readable(&self) -> bool {
        self.native.is_some()
    }

    pub fn native(&self) -> Option<&NativeFile> {
        self.native.as_ref()
    }

    /// Move the native handle out, e.g. to hand it to a connector.
    pub fn take_native(&mut self) -> Option<NativeFile> {
        self.native.take()
    }

    fn reader(&self) -> Result<&NativeFile, ReadError> {
        self.native.as_ref().ok_or_else(|| ReadError::Unreadable {
            name: self.name.clone(),
        })
    }

    /// Read the content as UTF-8 text (invalid sequences are replaced).
    ///
    /// Fails with [`ReadError::Unreadable`] before reading anything when no
    /// native handle is attached.
    pub async fn read_text(&self) -> Result<String, ReadError> {
        let bytes = self.reader()?.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Read the content as a base64 `data:` URL.
    pub async fn read_data_url(&self) -> Result<String, ReadError> {
        let native = self.reader()?;
        let bytes = native.bytes().await?;
        let mime = if self.mime.is_empty() {
            DEFAULT_MIME
        } else {
            self.mime.as_str()
        };
        Ok(format!("data:{};base64,{}", mime, BASE64.encode(bytes)))
    }

    /// Read the raw content.
    pub async fn read_array_buffer(&self) -> Result<Vec<u8>, ReadError> {
        self.reader()?.bytes().await
    }

    /// Read the content as a binary string, one char per byte.
    pub async fn read_binary_string(&self) -> Result<String, ReadError> {
        let bytes = self.reader()?.bytes().await?;
        Ok(bytes.iter().map(|&b| char::from(b)).collect())
    }
}

/// Cloning drops the native handle; the clone only describes the file.
impl Clone for FmFile {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            size: self.size,
            mime: self.mime.clone(),
            modified: self.modified,
            folder: self.folder.clone(),
            full_path: self.full_path.clone(),
            extension: self.extension.clone(),
            is_valid: self.is_valid,
            human_size: self.human_size,
            url: self.url.clone(),
            download: self.download.clone(),
            thumbnail: self.thumbnail.clone(),
            preview: self.preview.clone(),
            native: None,
        }
    }
}

impl Serialize for FmFile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("FmFile", 13)?;
        s.serialize_field("name", &self.name)?;
        s.serialize_field("size", &self.size)?;
        s.serialize_field("type", &self.mime)?;
        s.serialize_field("modified", &self.modified)?;
        s.serialize_field("fullPath", &self.full_path)?;
        s.serialize_field("extension", &self.extension)?;
        s.serialize_field("isValid", &self.is_valid)?;
        s.serialize_field("humanSize", &self.human_size)?;
        s.serialize_field("url", &self.url)?;
        s.serialize_field("download", self.download())?;
        s.serialize_field("thumbnail", &self.thumbnail())?;
        s.serialize_field("preview", &self.preview())?;
        s.serialize_field("pending", &self.is_readable())?;
        s.end()
    }
}

/// Everything after the first run of dots, lower-cased (`archive.TAR.gz` -> `tar.gz`).
fn extension_of(name: &str) -> String {
    name.split_once('.')
        .map(|(_, ext)| ext.trim_start_matches('.').to_lowercase())
        .unwrap_or_default()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
