use std::sync::Arc;

use crate::{error::Result, source::ContentsApi, types::Contents};

/// Looks up paths in one repository through a [`ContentsApi`]
///
/// One backend call per lookup: no retries, no caching, no merging.
/// Backend errors are returned exactly as produced.
#[derive(Clone)]
pub struct ContentResolver {
    api: Arc<dyn ContentsApi>,
    owner: String,
    repo: String,
}

impl ContentResolver {
    pub fn new(api: Arc<dyn ContentsApi>, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            api,
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Resolve an already validated API path to a file or a listing
    #[tracing::instrument(level = "debug", skip(self), fields(owner = %self.owner, repo = %self.repo))]
    pub async fn resolve(&self, path: &str) -> Result<Contents> {
        let contents = self.api.get_contents(&self.owner, &self.repo, path).await?;
        match &contents {
            Contents::File(entry) => tracing::debug!(size = entry.size, "resolved file"),
            Contents::Listing(entries) => tracing::debug!(entries = entries.len(), "resolved listing"),
        }
        Ok(contents)
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContentError;
    use crate::types::RemoteEntry;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingApi {
        calls: Mutex<Vec<(String, String, String)>>,
    }

    #[async_trait]
    impl ContentsApi for RecordingApi {
        async fn get_contents(&self, owner: &str, repo: &str, path: &str) -> Result<Contents> {
            self.calls
                .lock()
                .unwrap()
                .push((owner.to_string(), repo.to_string(), path.to_string()));
            match path {
                "" => Ok(Contents::Listing(vec![RemoteEntry::dir("src", "src")])),
                "limited" => Err(ContentError::RateLimited {
                    message: "try later".to_string(),
                }),
                _ => Ok(Contents::File(RemoteEntry::file(path, path, b"data"))),
            }
        }

        fn identifier(&self) -> String {
            "recording".to_string()
        }
    }

    #[tokio::test]
    async fn test_resolve_passes_owner_repo_path() {
        let api = Arc::new(RecordingApi {
            calls: Mutex::new(Vec::new()),
        });
        let resolver = ContentResolver::new(api.clone(), "golang", "time");

        assert!(matches!(resolver.resolve("").await, Ok(Contents::Listing(_))));
        assert!(matches!(resolver.resolve("go.mod").await, Ok(Contents::File(_))));

        let calls = api.calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![
                ("golang".to_string(), "time".to_string(), "".to_string()),
                ("golang".to_string(), "time".to_string(), "go.mod".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_errors_surface_unchanged_without_retry() {
        let api = Arc::new(RecordingApi {
            calls: Mutex::new(Vec::new()),
        });
        let resolver = ContentResolver::new(api.clone(), "o", "r");

        match resolver.resolve("limited").await {
            Err(ContentError::RateLimited { message }) => assert_eq!(message, "try later"),
            other => panic!("Expected RateLimited, got {:?}", other),
        }
        assert_eq!(api.calls.lock().unwrap().len(), 1);
    }
}
