//! Native file handles for pending uploads.
//!
//! A [`NativeFile`] owns the content of a file the user picked for upload.
//! Natively that is an in-memory buffer; in the browser it wraps the
//! `File` object handed over by an `<input type="file">` or a drop event.

use std::fmt;

use crate::core::error::ReadError;

enum Source {
    Memory(Vec<u8>),
    #[cfg(target_arch = "wasm32")]
    Web(web_sys::File),
}

/// Handle to the bytes of a file that has not been uploaded yet.
///
/// Not `Clone`: the handle belongs to exactly one [`FmFile`](crate::FmFile).
pub struct NativeFile {
    name: String,
    mime: String,
    size: u64,
    /// Last modification time as Unix timestamp in milliseconds
    modified: Option<u64>,
    source: Source,
}

impl NativeFile {
    /// Create a handle over an in-memory buffer.
    pub fn from_bytes(
        name: impl Into<String>,
        mime: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        let bytes = bytes.into();
        Self {
            name: name.into(),
            mime: mime.into(),
            size: bytes.len() as u64,
            modified: None,
            source: Source::Memory(bytes),
        }
    }

    /// Wrap a browser `File`.
    #[cfg(target_arch = "wasm32")]
    pub fn from_web_file(file: web_sys::File) -> Self {
        Self {
            name: file.name(),
            mime: file.type_(),
            size: file.size().max(0.0) as u64,
            modified: Some(file.last_modified().max(0.0) as u64),
            source: Source::Web(file),
        }
    }

    /// Set the modification time (Unix milliseconds).
    pub fn with_modified(mut self, modified: u64) -> Self {
        self.modified = Some(modified);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn modified(&self) -> Option<u64> {
        self.modified
    }

    /// Read the whole content.
    ///
    /// Every call produces an independent read; in the browser this goes
    /// through the `File`'s `arrayBuffer()` promise.
    pub async fn bytes(&self) -> Result<Vec<u8>, ReadError> {
        match &self.source {
            Source::Memory(bytes) => Ok(bytes.clone()),
            #[cfg(target_arch = "wasm32")]
            Source::Web(file) => read_web_file(file).await,
        }
    }
}

impl fmt::Debug for NativeFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFile")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("size", &self.size)
            .field("modified", &self.modified)
            .finish_non_exhaustive()
    }
}

#[cfg(target_arch = "wasm32")]
async fn read_web_file(file: &web_sys::File) -> Result<Vec<u8>, ReadError> {
    use wasm_bindgen_futures::JsFuture;

    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| {
            ReadError::ReadFailed(e.as_string().unwrap_or_else(|| "Unknown error".to_string()))
        })?;

    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_from_bytes() {
        let native = NativeFile::from_bytes("a.txt", "text/plain", b"hello".to_vec())
            .with_modified(1_704_067_200_000);
        assert_eq!(native.name(), "a.txt");
        assert_eq!(native.size(), 5);
        assert_eq!(native.modified(), Some(1_704_067_200_000));
        assert_eq!(native.bytes().await.unwrap(), b"hello");
        // Reads are repeatable
        assert_eq!(native.bytes().await.unwrap(), b"hello");
    }

    #[test]
    fn test_debug_hides_content() {
        let native = NativeFile::from_bytes("secret.bin", "", vec![0u8; 4]);
        let debug = format!("{:?}", native);
        assert!(debug.contains("secret.bin"));
        assert!(!debug.contains("[0, 0"));
    }
}
