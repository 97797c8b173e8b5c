//! WTL client configuration.

use serde::{Deserialize, Serialize};

use crate::auth::WtlCredentials;
use crate::error::{WtlError, WtlResult};

/// Default HTTP timeout for requests to the WTL system, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default provisioning endpoint path.
pub const DEFAULT_PROV_PATH: &str = "/prov";

/// Configuration for [`WtlClient`](crate::client::WtlClient).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WtlConfig {
    /// Base URL of the WTL API (e.g. `http://localhost:3001/wtl/hlr/v1`).
    pub base_url: String,

    /// Provisioning endpoint path, appended to the base URL.
    #[serde(default = "default_prov_path")]
    pub prov_path: String,

    /// Authentication configuration.
    pub credentials: WtlCredentials,

    /// HTTP timeout of requests to the WTL system, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_prov_path() -> String {
    DEFAULT_PROV_PATH.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl WtlConfig {
    /// Create a configuration with default path and timeout.
    pub fn new(base_url: impl Into<String>, credentials: WtlCredentials) -> Self {
        Self {
            base_url: base_url.into(),
            prov_path: default_prov_path(),
            credentials,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set the HTTP timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the provisioning endpoint path.
    pub fn with_prov_path(mut self, path: impl Into<String>) -> Self {
        self.prov_path = path.into();
        self
    }

    /// The full URL of the provisioning endpoint.
    pub fn prov_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = self.prov_path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> WtlResult<()> {
        if self.base_url.is_empty() {
            return Err(WtlError::internal("WTL base_url is required"));
        }
        url::Url::parse(&self.base_url)
            .map_err(|e| WtlError::internal(format!("Invalid WTL base_url: {e}")))?;
        if self.timeout_secs == 0 {
            return Err(WtlError::internal("WTL timeout must be positive"));
        }
        Ok(())
    }

    /// Create a redacted copy for logging/display.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        config.credentials = config.credentials.redacted();
        config
    }
}
