//! HTTP client abstraction.
//!
//! Wraps a [`reqwest::Client`] configured the way the portal expects a
//! browser to behave: persistent cookie jar, browser user agent, redirect
//! following. The cookie jar is owned by this client and is the actual
//! carrier of the authenticated session; sharing a client between two
//! logical sessions is not supported.

use crate::error::FetchError;
use reqwest::header::HeaderMap;
use reqwest::{Client, Response};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Browser user agent sent on every request. The portal rejects obvious
/// non-browser agents.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// HTTP client with an owned cookie jar.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying client cannot be
    /// built, which indicates a broken TLS configuration.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new HTTP client with a custom timeout.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying client cannot be
    /// built.
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .build()?;

        Ok(Self { inner: client })
    }

    /// Performs a GET request.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] on transport failure. Non-success
    /// statuses are returned to the caller for classification.
    pub async fn get(&self, url: &str) -> Result<Response, FetchError> {
        debug!(url = %url, "GET");
        Ok(self.inner.get(url).send().await?)
    }

    /// Performs a GET request with query parameters and extra headers.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] on transport failure.
    pub async fn get_with(
        &self,
        url: &str,
        query: &[(&str, &str)],
        headers: HeaderMap,
    ) -> Result<Response, FetchError> {
        debug!(url = %url, params = query.len(), "GET with query");
        Ok(self
            .inner
            .get(url)
            .query(query)
            .headers(headers)
            .send()
            .await?)
    }

    /// Performs a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] on transport failure.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<Response, FetchError> {
        debug!(url = %url, "POST json");
        Ok(self.inner.post(url).json(body).send().await?)
    }

    /// Performs a POST request with a form-encoded body and extra headers.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] on transport failure.
    pub async fn post_form<T: Serialize + ?Sized>(
        &self,
        url: &str,
        form: &T,
        headers: HeaderMap,
    ) -> Result<Response, FetchError> {
        debug!(url = %url, "POST form");
        Ok(self
            .inner
            .post(url)
            .headers(headers)
            .form(form)
            .send()
            .await?)
    }
}
