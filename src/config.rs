use reqwest::Url;
use serde::Deserialize;

use crate::error::{ContentError, Result};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Settings for [`GitHubSource`](crate::GitHubSource)
///
/// Supplied once at construction. Every field has a default, so a partial
/// JSON document deserializes into a usable configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Base URL of the REST API
    pub api_url: String,
    /// Branch, tag or commit to read; the repository default branch when unset
    pub git_ref: Option<String>,
    /// Token sent as bearer authorization
    pub token: Option<String>,
    pub user_agent: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            git_ref: None,
            token: None,
            user_agent: concat!("repo-fs/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl GitHubConfig {
    /// Defaults overridden by `REPO_FS_API_URL`, `REPO_FS_REF` and `GITHUB_TOKEN`
    ///
    /// CI runners export `GITHUB_REF` and `GITHUB_API_URL` for the workflow's
    /// own repository, so those are never read.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let set = |key: &str| var(key).filter(|v| !v.is_empty());
        let mut config = Self::default();
        if let Some(url) = set("REPO_FS_API_URL") {
            config.api_url = url;
        }
        config.git_ref = set("REPO_FS_REF");
        config.token = set("GITHUB_TOKEN");
        config
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_ref(mut self, git_ref: impl Into<String>) -> Self {
        self.git_ref = Some(git_ref.into());
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Parse and check `api_url`, and reject an empty token
    pub fn validate(&self) -> Result<Url> {
        let url = Url::parse(&self.api_url).map_err(|e| ContentError::InvalidConfig {
            message: format!("api_url {:?}: {}", self.api_url, e),
        })?;

        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(ContentError::InvalidConfig {
                message: format!("api_url {:?} is not an http(s) base URL", self.api_url),
            });
        }

        if matches!(self.token.as_deref(), Some("")) {
            return Err(ContentError::InvalidConfig {
                message: "token is empty".to_string(),
            });
        }

        Ok(url)
    }
}
