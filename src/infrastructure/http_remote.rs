use crate::domain::ports::RemoteApi;
use crate::error::RemoteError;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use std::time::Duration;
use tracing::debug;

/// Client for the remote verification service.
///
/// Base URL and basic-auth credentials are fixed at construction. The
/// underlying `reqwest::Client` pools connections and is reused for every call.
#[derive(Clone)]
pub struct HttpRemoteApi {
    base_url: String,
    username: String,
    password: String,
    http_client: Client,
}

impl HttpRemoteApi {
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, RemoteError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(RemoteError::Client)?;

        Ok(Self::with_client(base_url, username, password, http_client))
    }

    /// Uses a caller-configured client, e.g. one with custom proxy or TLS settings.
    pub fn with_client(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        http_client: Client,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            username: username.into(),
            password: password.into(),
            http_client,
        }
    }
}

#[async_trait]
impl RemoteApi for HttpRemoteApi {
    async fn call(
        &self,
        method: Method,
        function: &str,
        payload: Option<Vec<u8>>,
    ) -> Result<Vec<u8>, RemoteError> {
        let url = format!("{}{}", self.base_url, function);
        debug!(%method, %url, "Calling remote API");

        let mut request = self
            .http_client
            .request(method, &url)
            .basic_auth(&self.username, Some(&self.password));

        if let Some(body) = payload {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let request = request.build().map_err(|source| RemoteError::InvalidUrl {
            url: url.clone(),
            source,
        })?;

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|source| RemoteError::Transport {
                url: url.clone(),
                source,
            })?;

        debug!(status = response.status().as_u16(), "Remote API replied");

        // Status is the caller's concern; the body is returned either way.
        let body = response
            .bytes()
            .await
            .map_err(|source| RemoteError::Transport { url, source })?;

        Ok(body.to_vec())
    }
}
