/// HTTP client for the remote post collection
///
/// # Endpoints
///
/// - `GET {base_url}/posts` - the whole collection
/// - `GET {base_url}/posts/{id}` - a single post
///
/// Any non-2xx status is an error. A failed call never returns partial data.

use super::{Post, PostSource, TransportError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default remote endpoint
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Remote client configuration
#[derive(Debug, Clone)]
pub struct PostsConfig {
    /// Base URL, without the `/posts` suffix
    pub base_url: String,

    /// Whole-request timeout (seconds)
    ///
    /// Default: 10
    pub timeout_seconds: u64,
}

impl Default for PostsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 10,
        }
    }
}

/// reqwest-backed `PostSource`
#[derive(Debug, Clone)]
pub struct PostsClient {
    client: Client,
    base_url: String,
}

impl PostsClient {
    /// Builds a client with its own connection pool and timeout
    pub fn new(config: PostsConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self::with_client(client, config.base_url))
    }

    /// Uses an existing reqwest client
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, TransportError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "Fetching remote resource");

        let response = self.client.get(&url).send().await.map_err(|e| {
            let err = TransportError::from(e);
            warn!(%url, error = %err, "Remote request failed");
            err
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "Remote request returned error status");
            return Err(TransportError::Status(status.as_u16()));
        }

        response.json::<T>().await.map_err(|e| {
            let err = TransportError::from(e);
            warn!(%url, error = %err, "Remote response could not be read");
            err
        })
    }
}

#[async_trait]
impl PostSource for PostsClient {
    async fn list_posts(&self) -> Result<Vec<Post>, TransportError> {
        let posts: Vec<Post> = self.get_json("/posts").await?;
        info!(count = posts.len(), "Loaded remote posts");
        Ok(posts)
    }

    async fn get_post(&self, id: i64) -> Result<Post, TransportError> {
        self.get_json(&format!("/posts/{}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posts_config_default() {
        let config = PostsConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_seconds, 10);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = PostsClient::with_client(Client::new(), "http://localhost:9999/");
        assert_eq!(client.base_url(), "http://localhost:9999");
    }

    // Tests against a local stub server are in tests/remote_client_tests.rs
}
