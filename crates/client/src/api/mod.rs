//! Catalog REST API client.
//!
//! A thin, typed layer over the backend's HTTP+JSON/multipart endpoints.
//! All calls attach a bearer token when the injected [`CredentialProvider`]
//! supplies one; a missing token is not an error here - the backend enforces
//! auth.
//!
//! # Error convention
//!
//! Non-2xx responses carry a JSON body with a `message` field. That message
//! is surfaced verbatim when present, otherwise a generic description.

pub mod categories;
pub mod images;
pub mod products;
pub mod types;
pub mod variants;

pub use images::ImageUpload;

use std::sync::Arc;

use reqwest::Method;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::CatalogConfig;
use crate::credentials::{CredentialProvider, NoToken, StaticToken};

/// Errors that can occur when interacting with the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Unauthorized (missing or rejected token).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Catalog API client.
///
/// Cheap to clone; all clones share one connection pool and credential
/// provider.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    /// Base URL without a trailing slash.
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl CatalogClient {
    /// Create a new client with an explicit credential provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(
        config: &CatalogConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder().build()?;
        let base_url = config.base_url.as_str().trim_end_matches('/').to_string();

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url,
                credentials,
            }),
        })
    }

    /// Create a client whose credentials come from the config's token field.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let credentials: Arc<dyn CredentialProvider> = match &config.token {
            Some(token) => Arc::new(StaticToken::new(token.clone())),
            None => Arc::new(NoToken),
        };
        Self::new(config, credentials)
    }

    /// Get the base URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{path}", self.inner.base_url);
        let mut builder = self.inner.client.request(method, url);
        if let Some(token) = self.inner.credentials.bearer_token() {
            builder = builder.bearer_auth(token.expose_secret());
        }
        builder
    }

    /// Execute a GET request against the catalog API.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let response = self.request(Method::GET, path).send().await?;
        self.handle_response(response).await
    }

    /// Execute a POST request with a JSON body.
    pub(crate) async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, CatalogError> {
        let response = self.request(Method::POST, path).json(body).send().await?;
        self.handle_response(response).await
    }

    /// Execute a PUT request with a JSON body.
    pub(crate) async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, CatalogError> {
        let response = self.request(Method::PUT, path).json(body).send().await?;
        self.handle_response(response).await
    }

    /// Execute a PATCH request with a JSON body.
    pub(crate) async fn patch<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, CatalogError> {
        let response = self.request(Method::PATCH, path).json(body).send().await?;
        self.handle_response(response).await
    }

    /// Execute a DELETE request.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), CatalogError> {
        let response = self.request(Method::DELETE, path).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        Err(Self::parse_error(response).await)
    }

    /// Execute a multipart POST (image uploads).
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, CatalogError> {
        let response = self
            .request(Method::POST, path)
            .multipart(form)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Handle API response and parse JSON.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, CatalogError> {
        let status = response.status();

        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| CatalogError::Parse(format!("Failed to parse response: {e}")));
        }

        Err(Self::parse_error(response).await)
    }

    /// Map a non-2xx response to an error, surfacing the backend's
    /// `message` field verbatim when present.
    async fn parse_error(response: reqwest::Response) -> CatalogError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str::<serde_json::Value>(&body).ok())
            .and_then(|value| {
                value
                    .get("message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "API request failed".to_string());

        match status {
            401 | 403 => CatalogError::Unauthorized(message),
            404 => CatalogError::NotFound(message),
            _ => CatalogError::Api { status, message },
        }
    }
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CatalogError::Api {
            status: 422,
            message: "Price must be positive".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 422 - Price must be positive");
    }

    #[test]
    fn test_not_found_display() {
        let err = CatalogError::NotFound("Product not found".to_string());
        assert_eq!(err.to_string(), "Not found: Product not found");
    }

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let config = CatalogConfig::new("https://api.example.com/v1/", None).expect("url");
        let client = CatalogClient::from_config(&config).expect("client");
        assert_eq!(client.base_url(), "https://api.example.com/v1");
    }
}
