//! HTTP client for the remote task endpoint.
//!
//! Four REST calls over plain JSON: list, create, update, delete. Every
//! method returns a typed result; callers decide what to do with a
//! failure (the UI logs and moves on — there is no retry).

use std::time::Duration;

use thiserror::Error;

use crate::task::Task;

/// Placeholder endpoint used when no `--api-url` is given.
pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com/posts";

/// Errors from talking to the task endpoint.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport or decode error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },
}

/// Blocking client for the task endpoint.
pub struct ApiClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given base URL.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::blocking::Client` fails to
    /// build.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::blocking::Client::builder()
                .user_agent(concat!("tugas/", env!("CARGO_PKG_VERSION")))
                .timeout(Duration::from_secs(10))
                .build()
                .expect("reqwest client should build"),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Base URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch all tasks.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails, the endpoint returns a
    /// non-success status, or the response cannot be decoded.
    pub fn list(&self) -> Result<Vec<Task>, ApiError> {
        let resp = check_response(self.http.get(&self.base_url).send()?)?;
        Ok(resp.json()?)
    }

    /// Create a task and return the server's representation of it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails, the endpoint returns a
    /// non-success status, or the response cannot be decoded.
    pub fn create(&self, task: &Task) -> Result<Task, ApiError> {
        let resp = check_response(self.http.post(&self.base_url).json(task).send()?)?;
        Ok(resp.json()?)
    }

    /// Patch the task with the given id and return the server's merged
    /// representation.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails, the endpoint returns a
    /// non-success status, or the response cannot be decoded.
    pub fn update(&self, id: u64, task: &Task) -> Result<Task, ApiError> {
        let resp = check_response(self.http.patch(self.item_url(id)).json(task).send()?)?;
        Ok(resp.json()?)
    }

    /// Delete the task with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the endpoint returns
    /// a non-success status.
    pub fn delete(&self, id: u64) -> Result<(), ApiError> {
        check_response(self.http.delete(self.item_url(id)).send()?)?;
        Ok(())
    }

    fn item_url(&self, id: u64) -> String {
        format!("{}/{id}", self.base_url)
    }
}

/// Map a non-success status to [`ApiError::Api`], passing the response
/// through unchanged otherwise.
fn check_response(
    resp: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, ApiError> {
    if !resp.status().is_success() {
        return Err(ApiError::Api {
            status: resp.status().as_u16(),
            message: resp.text().unwrap_or_default(),
        });
    }
    Ok(resp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn item_url_joins_with_single_slash() {
        let client = ApiClient::new("https://example.com/posts");
        assert_eq!(client.item_url(3), "https://example.com/posts/3");
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = ApiClient::new("https://example.com/posts/");
        assert_eq!(client.base_url(), "https://example.com/posts");
        assert_eq!(client.item_url(3), "https://example.com/posts/3");
    }

    #[test]
    fn api_error_display_includes_status_and_body() {
        let err = ApiError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API error (500): boom");
    }
}
