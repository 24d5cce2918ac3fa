use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::{ContentError, Result};

/// One item returned by a contents backend
///
/// Mirrors the GitHub contents object. Directory listings carry no `content`;
/// a single-file response carries the blob in `content`, encoded as `encoding`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEntry {
    /// Name of the file or folder
    pub name: String,
    /// Path relative to the repository root
    #[serde(default)]
    pub path: String,
    /// Size in bytes as reported by the backend
    #[serde(default)]
    pub size: u64,
    /// Raw kind string (`file`, `dir`, `symlink`, `submodule`, ...)
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub sha: Option<String>,
    #[serde(default)]
    pub encoding: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Kind of a remote entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Other,
}

impl RemoteEntry {
    /// A file entry holding `data`, base64 encoded the way the contents API ships it.
    pub fn file(name: impl Into<String>, path: impl Into<String>, data: impl AsRef<[u8]>) -> Self {
        let data = data.as_ref();
        Self {
            name: name.into(),
            path: path.into(),
            size: data.len() as u64,
            kind: "file".to_string(),
            sha: None,
            encoding: Some("base64".to_string()),
            content: Some(STANDARD.encode(data)),
        }
    }

    /// A directory entry as it appears inside a listing.
    pub fn dir(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            size: 0,
            kind: "dir".to_string(),
            sha: None,
            encoding: None,
            content: None,
        }
    }

    pub fn entry_kind(&self) -> EntryKind {
        match self.kind.as_str() {
            "file" => EntryKind::File,
            "dir" => EntryKind::Dir,
            _ => EntryKind::Other,
        }
    }

    /// Decode the embedded content blob into raw bytes
    ///
    /// An absent or empty encoding means the content is stored verbatim.
    /// `none` is what the API reports for blobs too large to embed.
    pub fn decode_content(&self) -> Result<Bytes> {
        let content = self.content.as_deref().unwrap_or_default();
        match self.encoding.as_deref().unwrap_or_default() {
            "base64" => {
                // The API wraps encoded content at 60 columns
                let compact: String = content.split_ascii_whitespace().collect();
                Ok(Bytes::from(STANDARD.decode(compact)?))
            }
            "" => Ok(Bytes::copy_from_slice(content.as_bytes())),
            other => Err(ContentError::UnsupportedEncoding {
                encoding: other.to_string(),
            }),
        }
    }
}

/// Result of a single contents lookup
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Contents {
    /// The path denotes a directory
    Listing(Vec<RemoteEntry>),
    /// The path denotes one file
    File(RemoteEntry),
}
