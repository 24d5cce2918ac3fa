use async_trait::async_trait;
use crate::{error::Result, types::Contents};

/// Backend that answers repository contents lookups
///
/// Given an owner, a repository and a path, an implementor returns either the
/// single file at that path or the listing of the directory at that path.
/// An empty path denotes the repository root.
///
/// Implementors own transport, authentication and any retry policy;
/// callers in this crate issue exactly one lookup per operation.
#[async_trait]
pub trait ContentsApi: Send + Sync {
    /// Look up `path` in `owner/repo`
    ///
    /// Returns `ContentError::NotFound` if nothing exists at the path
    async fn get_contents(&self, owner: &str, repo: &str, path: &str) -> Result<Contents>;

    /// Get a human-readable identifier for this backend (for logging/debugging)
    fn identifier(&self) -> String;
}
