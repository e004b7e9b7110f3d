use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::{config::Config, error::GatewayError};

/// Stateless wrapper around the resource API.
///
/// Every call takes the caller's access token; the gateway never stores,
/// checks or refreshes it. Remote failures are translated once, here, and
/// nothing is retried.
#[derive(Debug, Clone)]
pub struct Gateway {
    http: Client,
    api_url: String,
    max_page_limit: u32,
}

impl Gateway {
    pub fn new(http: Client, api_url: impl Into<String>, max_page_limit: u32) -> Self {
        Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            max_page_limit,
        }
    }

    pub fn from_config(http: Client, config: &Config) -> Self {
        Self::new(http, &config.api_url, config.max_page_limit)
    }

    pub fn max_page_limit(&self) -> u32 {
        self.max_page_limit
    }

    /// Resource URL for `segments`, each percent-encoded as one path segment.
    pub(super) fn endpoint(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| GatewayError::Unknown(format!("invalid api url: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| GatewayError::Unknown("api url cannot take a path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(super) fn get(
        &self,
        token: &str,
        segments: &[&str],
    ) -> Result<RequestBuilder, GatewayError> {
        Ok(self.http.get(self.endpoint(segments)?).bearer_auth(token))
    }

    pub(super) fn post(
        &self,
        token: &str,
        segments: &[&str],
    ) -> Result<RequestBuilder, GatewayError> {
        Ok(self.http.post(self.endpoint(segments)?).bearer_auth(token))
    }

    /// Sends `request` and decodes a 2xx body into `T`.
    ///
    /// Non-2xx answers become [`GatewayError::Remote`] with the status and
    /// body untouched. Transport failures and undecodable bodies become
    /// [`GatewayError::Unknown`].
    pub(super) async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, GatewayError> {
        let res = request
            .send()
            .await
            .map_err(|e| GatewayError::Unknown(format!("no response from remote service: {e}")))?;

        let status = res.status();
        let body = res
            .bytes()
            .await
            .map_err(|e| GatewayError::Unknown(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            let body = serde_json::from_slice::<Value>(&body).unwrap_or_else(|_| {
                if body.is_empty() {
                    Value::Null
                } else {
                    Value::String(String::from_utf8_lossy(&body).into_owned())
                }
            });
            tracing::warn!(status = status.as_u16(), "remote service returned an error");
            return Err(GatewayError::Remote {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_slice(&body)
            .map_err(|e| GatewayError::Unknown(format!("malformed response body: {e}")))
    }
}
