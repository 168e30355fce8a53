//! Typed API client
//!
//! Every call goes through an [`Endpoint`] constant, so the request body and
//! the decoded response are the exact types the server handler uses.

use curriculum::presentation::endpoint::Endpoint;
use kernel::error::body::ErrorBody;
use reqwest::Client;
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::PortalConfig;
use crate::error::{PortalError, PortalResult};

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    /// `Cookie` header copied from the incoming page request
    forwarded_cookie: Option<HeaderValue>,
}

impl ApiClient {
    /// Client with its own cookie jar (ambient credentials)
    pub fn new(config: &PortalConfig) -> PortalResult<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            forwarded_cookie: None,
        })
    }

    /// Copy of this client that sends `pairs` as the `Cookie` header on
    /// every call. Used when a page is rendered on the server for a user.
    pub fn with_forwarded_cookies<K, V>(&self, pairs: &[(K, V)]) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self {
            forwarded_cookie: platform::cookie::join_cookie_header(pairs),
            ..self.clone()
        }
    }

    /// Forward every cookie of an incoming request
    pub fn with_forwarded_headers(&self, headers: &HeaderMap) -> Self {
        self.with_forwarded_cookies(&platform::cookie::cookie_pairs(headers))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Call an endpoint.
    ///
    /// `params` fill the path template in order. A 204 decodes as `()`.
    /// Non-2xx responses become [`PortalError::Api`] carrying the server's
    /// error body.
    pub async fn call<Req, Res>(
        &self,
        endpoint: Endpoint<Req, Res>,
        params: &[&str],
        body: Option<&Req>,
    ) -> PortalResult<Res>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let path = endpoint
            .path_with(params)
            .map_err(|source| PortalError::InvalidPath {
                endpoint: format!("{endpoint:?}"),
                source,
            })?;
        let url = format!("{}{}", self.base_url, path);

        let mut req = self.http.request(endpoint.method.as_method(), &url);
        if let Some(cookie) = &self.forwarded_cookie {
            req = req.header(header::COOKIE, cookie.clone());
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            tracing::debug!(
                endpoint = ?endpoint,
                status = status.as_u16(),
                "API call rejected"
            );
            let body = serde_json::from_str::<ErrorBody>(&text).unwrap_or_else(|_| {
                let details = Some(text.as_str()).filter(|t| !t.trim().is_empty());
                ErrorBody::new(format!("HTTP {}", status.as_u16()), details)
            });
            return Err(PortalError::Api { status, body });
        }

        let payload = if text.trim().is_empty() {
            "null"
        } else {
            text.as_str()
        };
        Ok(serde_json::from_str(payload)?)
    }
}
