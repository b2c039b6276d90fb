/// Remote post collection
///
/// A read-only fetch of posts from a remote JSON endpoint. It is unrelated to
/// the record store: posts are shown and never persisted.
///
/// The client is built explicitly and handed to whoever issues requests.
/// Requests are independent. Nothing is cached, deduplicated or cancelled.
///
/// # Modules
///
/// - `client`: reqwest-backed `PostsClient`
///
/// # Example
///
/// ```no_run
/// use roster_shared::remote::{PostSource, PostsClient, PostsConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = PostsClient::new(PostsConfig::default())?;
///
/// match client.list_posts().await {
///     Ok(posts) => println!("Loaded {} posts", posts.len()),
///     Err(e) => println!("{}", e.user_message()),
/// }
/// # Ok(())
/// # }
/// ```

pub mod client;

pub use client::{PostsClient, PostsConfig};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A post from the remote collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Author id, when the endpoint sends one
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,

    /// Post id
    pub id: i64,

    /// Title line
    pub title: String,

    /// Body text
    pub body: String,
}

/// Remote fetch failures
///
/// Every variant has its own user-facing message (`user_message`).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Host unreachable or connection refused
    #[error("No connectivity: {0}")]
    NoConnectivity(String),

    /// The request did not complete in time
    #[error("Request timed out")]
    TimedOut,

    /// The server answered with a non-success status
    #[error("Unexpected response status: {0}")]
    Status(u16),

    /// The body was not the expected JSON
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// Any other I/O or client error
    #[error("Transport error: {0}")]
    Other(String),
}

impl TransportError {
    /// Message suitable for showing to a user
    pub fn user_message(&self) -> String {
        match self {
            TransportError::NoConnectivity(_) => "No internet connection".to_string(),
            TransportError::TimedOut => "The request timed out".to_string(),
            TransportError::Status(code) => format!("The server responded with status {}", code),
            TransportError::Decode(_) => "The server sent an unexpected response".to_string(),
            TransportError::Other(msg) => format!("Network error: {}", msg),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        // Connect timeouts report both is_timeout and is_connect
        if err.is_timeout() {
            TransportError::TimedOut
        } else if err.is_connect() {
            TransportError::NoConnectivity(err.to_string())
        } else if err.is_decode() {
            TransportError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            TransportError::Status(status.as_u16())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

/// Source of remote posts
///
/// `PostsClient` is the HTTP implementation; tests and callers can supply
/// their own.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Fetches the whole collection
    async fn list_posts(&self) -> Result<Vec<Post>, TransportError>;

    /// Fetches a single post
    async fn get_post(&self, id: i64) -> Result<Post, TransportError>;
}
