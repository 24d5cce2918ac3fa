use async_trait::async_trait;
use reqwest::{header, Client, StatusCode, Url};

use crate::{
    config::GitHubConfig,
    error::{ContentError, Result},
    source::ContentsApi,
    types::Contents,
};

/// GitHub-backed contents API
///
/// Issues one `GET /repos/{owner}/{repo}/contents/{path}` per lookup. A JSON
/// object response is a single file with its content embedded; a JSON array
/// is a directory listing.
#[derive(Clone)]
pub struct GitHubSource {
    client: Client,
    base_url: Url,
    config: GitHubConfig,
}

impl GitHubSource {
    pub fn new(config: GitHubConfig) -> Result<Self> {
        let base_url = config.validate()?;
        let client = Client::builder().user_agent(&config.user_agent).build()?;

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    /// Build the contents URL for a path, one encoded segment per path element
    fn contents_url(&self, owner: &str, repo: &str, path: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ContentError::InvalidConfig {
                message: format!("api_url {:?} cannot be a base", self.config.api_url),
            })?
            .pop_if_empty()
            .extend(["repos", owner, repo, "contents"])
            .extend(path.split('/').filter(|s| !s.is_empty()));

        if let Some(git_ref) = &self.config.git_ref {
            url.query_pairs_mut().append_pair("ref", git_ref);
        }
        Ok(url)
    }

    /// Check if a status is a rate limit response
    fn is_rate_limit_error(&self, status: StatusCode) -> bool {
        status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS
    }
}

#[async_trait]
impl ContentsApi for GitHubSource {
    async fn get_contents(&self, owner: &str, repo: &str, path: &str) -> Result<Contents> {
        let url = self.contents_url(owner, repo, path)?;
        tracing::debug!(%url, "requesting repository contents");

        let mut request = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/vnd.github.v3+json");
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(%status, path, "contents response");

        match status {
            StatusCode::OK => {
                let body = response.bytes().await?;
                Ok(serde_json::from_slice(&body)?)
            }
            StatusCode::NOT_FOUND => Err(ContentError::NotFound {
                path: path.to_string(),
            }),
            status if self.is_rate_limit_error(status) => {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "GitHub API rate limit exceeded".to_string());
                Err(ContentError::RateLimited { message })
            }
            status => {
                let message = format!(
                    "Unexpected status {}: {}",
                    status,
                    response.text().await.unwrap_or_default()
                );
                Err(ContentError::InvalidStructure { message })
            }
        }
    }

    fn identifier(&self) -> String {
        format!(
            "github+{}@{}",
            self.config.api_url,
            self.config.git_ref.as_deref().unwrap_or("HEAD")
        )
    }
}
