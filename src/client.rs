//! Canvas API client.
//!
//! Low-level HTTP client that handles authentication and raw requests.
//! Higher-level operations live on the entity types in [`crate::models`].

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Response};
use serde::Serialize;
use url::Url;

use crate::error::{CanvasError, Result};

const USER_AGENT: &str = concat!("canvasapi/", env!("CARGO_PKG_VERSION"));

/// Low-level Canvas API client.
///
/// Holds the base URL and API token, attaches authentication, and maps
/// non-2xx responses to typed errors. Entity-specific operations are
/// implemented on the model types, which borrow the client per call.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use canvasapi::CanvasClient;
///
/// # fn example() -> canvasapi::Result<()> {
/// let client = CanvasClient::new("your-api-token", "https://canvas.example.edu")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CanvasClient {
    http: Client,
    base_url: Arc<Url>,
    token: String,
}

impl std::fmt::Debug for CanvasClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl CanvasClient {
    /// Create a new client with the provided token and base URL.
    ///
    /// The base URL is the root of the Canvas instance (e.g.
    /// `https://canvas.example.edu`); the `api/v1/` prefix is appended
    /// here so request paths stay relative (`courses/1`, …).
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(token: &str, base_url: &str) -> Result<Self> {
        // Ensure base URL ends with / so joins append instead of replace
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?.join("api/v1/")?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(CanvasError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token: token.to_string(),
        })
    }

    /// Get the base URL (including the `api/v1/` prefix).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Make a GET request.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = self.base_url.join(path)?;
        self.get_url(url).await
    }

    /// Make a GET request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await
            .map_err(CanvasError::HttpError)?;

        Self::check_response(response).await
    }

    /// Make a GET request against an absolute URL.
    ///
    /// Used by the paginator to follow `Link` headers, which carry full
    /// URLs rather than relative paths.
    pub(crate) async fn get_url(&self, url: Url) -> Result<Response> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(CanvasError::HttpError)?;

        Self::check_response(response).await
    }

    /// Make a POST request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .map_err(CanvasError::HttpError)?;

        Self::check_response(response).await
    }

    /// Make a PUT request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .put(url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .map_err(CanvasError::HttpError)?;

        Self::check_response(response).await
    }

    /// Make a DELETE request.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .delete(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(CanvasError::HttpError)?;

        Self::check_response(response).await
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        // Handle rate limiting
        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(CanvasError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let message = Self::extract_error_message(response, status).await;
        Err(CanvasError::ApiError {
            message,
            status_code: Some(status.as_u16()),
        })
    }

    /// Extract error message from a failed response.
    ///
    /// Canvas error bodies are usually `{"errors": [{"message": "..."}]}`,
    /// occasionally a bare `{"message": "..."}`.
    async fn extract_error_message(response: Response, status: reqwest::StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return format!("HTTP {status}"),
        };

        if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) {
            if let Some(msg) = json
                .get("errors")
                .and_then(|e| e.as_array())
                .and_then(|a| a.first())
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
            {
                return msg.to_string();
            }
            if let Some(msg) = json.get("message").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
        }

        if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let client = CanvasClient::new("test-token", "https://canvas.example.edu").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("CanvasClient"));
        assert!(debug.contains("base_url"));
        // Token should not be in debug output
        assert!(!debug.contains("test-token"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = CanvasClient::new("token", "https://canvas.example.edu").unwrap();
        let client2 = CanvasClient::new("token", "https://canvas.example.edu/").unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }

    #[test]
    fn test_base_url_gets_api_prefix() {
        let client = CanvasClient::new("token", "https://canvas.example.edu").unwrap();
        assert_eq!(
            client.base_url().as_str(),
            "https://canvas.example.edu/api/v1/"
        );
    }
}
