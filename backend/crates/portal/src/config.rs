//! Portal configuration

use std::env;
use std::time::Duration;

use crate::error::{PortalError, PortalResult};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:31113/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Base URL the endpoint templates are appended to, ending in `/api`
    pub api_base_url: String,
    pub request_timeout: Duration,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl PortalConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Read `PORTAL_API_BASE_URL` and `PORTAL_TIMEOUT_SECS`, falling back to
    /// the defaults when unset
    pub fn from_env() -> PortalResult<Self> {
        let mut config = match env::var("PORTAL_API_BASE_URL") {
            Ok(url) => Self::new(url),
            Err(_) => Self::default(),
        };

        if let Ok(raw) = env::var("PORTAL_TIMEOUT_SECS") {
            let secs: u64 = raw
                .parse()
                .map_err(|_| PortalError::Config(format!("PORTAL_TIMEOUT_SECS: {raw}")))?;
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
