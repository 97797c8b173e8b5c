//! Application configuration loaded from environment variables.
//!
//! Fail-fast loading with validation: required variables must be present and
//! valid or the application exits with a clear error message before binding
//! the listener. The resulting [`Config`] is immutable and passed explicitly
//! to every component, so nothing reads ambient environment state after
//! startup.

use std::env;

use regex::Regex;
use thiserror::Error;
use wtl_client::{WtlConfig, WtlCredentials};

/// Default host to bind.
const DEFAULT_HOST: &str = "0.0.0.0";

/// Default port to bind.
const DEFAULT_PORT: u16 = 8000;

/// Default profile used when the access policy does not carry one.
const DEFAULT_PROFILE: &str = "default";

/// Configuration errors that can occur during environment loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },
}

/// Immutable application configuration.
#[derive(Clone)]
pub struct Config {
    /// Bearer token required for authenticating inbound requests.
    pub api_token: String,

    /// Host to bind.
    pub host: String,

    /// Port to bind.
    pub port: u16,

    /// Log filter directive (e.g. `info` or `info,connector_api=debug`).
    pub log_filter: String,

    /// Outbound WTL client configuration.
    pub wtl: WtlConfig,

    /// Default CS profile when the access policy does not specify one.
    pub default_cs_profile: String,

    /// Default EPS profile when the access policy does not specify one.
    pub default_eps_profile: String,

    /// Optional IMSI validation pattern, compiled once at startup.
    /// Matching uses search semantics, so anchor the pattern when a full
    /// match is required.
    pub imsi_pattern: Option<Regex>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_token", &"[REDACTED]")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("log_filter", &self.log_filter)
            .field("wtl", &self.wtl.redacted())
            .field("default_cs_profile", &self.default_cs_profile)
            .field("default_eps_profile", &self.default_eps_profile)
            .field("imsi_pattern", &self.imsi_pattern.as_ref().map(Regex::as_str))
            .finish()
    }
}

fn required(var: &str) -> Result<String, ConfigError> {
    match env::var(var) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(var.to_string())),
    }
}

fn optional(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.is_empty())
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_token = required("API_TOKEN")?;

        let host = optional("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match optional("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                var: "PORT".to_string(),
                message: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let log_filter = optional("LOG_LEVEL")
            .map(|level| level.to_lowercase())
            .unwrap_or_else(|| "info".to_string());

        let wtl = Self::wtl_config_from_env()?;

        let default_cs_profile =
            optional("WTL_DEFAULT_CS_PROFILE").unwrap_or_else(|| DEFAULT_PROFILE.to_string());
        let default_eps_profile =
            optional("WTL_DEFAULT_EPS_PROFILE").unwrap_or_else(|| DEFAULT_PROFILE.to_string());

        let imsi_pattern = match optional("WTL_IMSI_REGEXP") {
            Some(raw) => Some(Regex::new(&raw).map_err(|e| ConfigError::InvalidValue {
                var: "WTL_IMSI_REGEXP".to_string(),
                message: e.to_string(),
            })?),
            None => None,
        };

        Ok(Self {
            api_token,
            host,
            port,
            log_filter,
            wtl,
            default_cs_profile,
            default_eps_profile,
            imsi_pattern,
        })
    }

    /// Assemble the WTL client configuration from the environment.
    fn wtl_config_from_env() -> Result<WtlConfig, ConfigError> {
        let base_url = required("WTL_API_URL")?;

        let method = optional("WTL_AUTH_METHOD").unwrap_or_else(|| "bearer".to_string());
        let credentials = match method.to_lowercase().as_str() {
            "bearer" => WtlCredentials::bearer(required("WTL_API_TOKEN")?),
            "basic" => {
                let username = required("WTL_API_USERNAME")?;
                match optional("WTL_API_PASSWORD") {
                    Some(password) => WtlCredentials::basic(username, password),
                    None => WtlCredentials::Basic {
                        username,
                        password: None,
                    },
                }
            }
            "oauth2" => WtlCredentials::oauth2(
                required("WTL_OAUTH_TOKEN_URL")?,
                required("WTL_OAUTH_CLIENT_ID")?,
                optional("WTL_OAUTH_CLIENT_SECRET"),
                optional("WTL_OAUTH_SCOPES")
                    .map(|raw| raw.split_whitespace().map(str::to_string).collect())
                    .unwrap_or_default(),
            ),
            other => {
                return Err(ConfigError::InvalidValue {
                    var: "WTL_AUTH_METHOD".to_string(),
                    message: format!("Unknown auth method '{other}' (bearer, basic, oauth2)"),
                });
            }
        };

        let mut config = WtlConfig::new(base_url, credentials);

        if let Some(raw) = optional("WTL_HTTP_REQUESTS_TIMEOUT") {
            let secs = raw.parse::<u64>().map_err(|e| ConfigError::InvalidValue {
                var: "WTL_HTTP_REQUESTS_TIMEOUT".to_string(),
                message: e.to_string(),
            })?;
            config = config.with_timeout_secs(secs);
        }

        Ok(config)
    }

    /// The address to bind, as `host:port`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env-var based tests are process-global; keep them to invariants that
    // do not require mutating the environment.

    #[test]
    fn test_bind_addr() {
        let config = Config {
            api_token: "t".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8080,
            log_filter: "info".to_string(),
            wtl: WtlConfig::new("http://localhost:3001", WtlCredentials::bearer("w")),
            default_cs_profile: "default".to_string(),
            default_eps_profile: "default".to_string(),
            imsi_pattern: None,
        };
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let config = Config {
            api_token: "inbound-secret".to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_filter: "info".to_string(),
            wtl: WtlConfig::new("http://localhost:3001", WtlCredentials::bearer("outbound-secret")),
            default_cs_profile: "default".to_string(),
            default_eps_profile: "default".to_string(),
            imsi_pattern: Some(Regex::new(r"^\d{15}$").unwrap()),
        };

        let debug = format!("{config:?}");
        assert!(!debug.contains("inbound-secret"));
        assert!(!debug.contains("outbound-secret"));
        assert!(debug.contains("localhost:3001"));
    }
}
