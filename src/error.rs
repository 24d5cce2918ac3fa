use std::io;

use thiserror::Error;

/// Errors reported by a contents backend
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Content not found: {path}")]
    NotFound { path: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Rate limited by remote service: {message}")]
    RateLimited { message: String },

    #[error("Invalid remote structure: {message}")]
    InvalidStructure { message: String },

    #[error("Unsupported content encoding: {encoding}")]
    UnsupportedEncoding { encoding: String },

    #[error("Content decode error: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for backend operations
pub type Result<T> = std::result::Result<T, ContentError>;

/// Errors returned by the filesystem facade and its handles
///
/// Every variant except [`FsError::Eof`] names the operation and the path it
/// was applied to, so the rendered message reads like `open docs/x: file does not exist`.
#[derive(Error, Debug)]
pub enum FsError {
    #[error("{op} {path}: invalid argument")]
    Invalid { op: &'static str, path: String },

    #[error("{op} {path}: file does not exist")]
    NotExist { op: &'static str, path: String },

    #[error("{op} {path}: is a directory")]
    IsADirectory { op: &'static str, path: String },

    /// No more bytes or entries. Not a failure.
    #[error("end of data")]
    Eof,

    #[error("{op} {path}: {source}")]
    Upstream {
        op: &'static str,
        path: String,
        #[source]
        source: ContentError,
    },
}

impl FsError {
    pub(crate) fn invalid(op: &'static str, path: impl Into<String>) -> Self {
        FsError::Invalid { op, path: path.into() }
    }

    pub(crate) fn not_exist(op: &'static str, path: impl Into<String>) -> Self {
        FsError::NotExist { op, path: path.into() }
    }

    pub(crate) fn upstream(op: &'static str, path: impl Into<String>, source: ContentError) -> Self {
        FsError::Upstream {
            op,
            path: path.into(),
            source,
        }
    }

    /// True for a kind mismatch and for a path the backend could not find.
    pub fn is_not_exist(&self) -> bool {
        matches!(
            self,
            FsError::NotExist { .. }
                | FsError::Upstream {
                    source: ContentError::NotFound { .. },
                    ..
                }
        )
    }

    pub fn is_eof(&self) -> bool {
        matches!(self, FsError::Eof)
    }
}

impl From<FsError> for io::Error {
    fn from(err: FsError) -> Self {
        let kind = match &err {
            FsError::Invalid { .. } => io::ErrorKind::InvalidInput,
            FsError::IsADirectory { .. } => io::ErrorKind::IsADirectory,
            FsError::Eof => io::ErrorKind::UnexpectedEof,
            e if e.is_not_exist() => io::ErrorKind::NotFound,
            _ => io::ErrorKind::Other,
        };
        io::Error::new(kind, err)
    }
}
