//! WTL API authentication — Basic, static Bearer, and OAuth2 client
//! credentials with a cached, single-flight token refresh.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::RequestBuilder;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{WtlError, WtlResult};

/// Safety margin subtracted from `expires_in` so a token is refreshed
/// before the external system starts rejecting it.
const TOKEN_EXPIRY_MARGIN_SECS: u64 = 30;

/// Credentials for the WTL API.
///
/// The [`Debug`] impl redacts secrets so configuration can be logged.
#[derive(Clone, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WtlCredentials {
    /// HTTP Basic authentication.
    Basic {
        username: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        password: Option<String>,
    },

    /// Static bearer token.
    Bearer { token: String },

    /// OAuth2 client credentials grant against a token endpoint.
    #[serde(rename = "oauth2")]
    OAuth2 {
        token_url: String,
        client_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        client_secret: Option<String>,
        #[serde(default)]
        scopes: Vec<String>,
    },
}

impl WtlCredentials {
    /// Create bearer credentials.
    pub fn bearer(token: impl Into<String>) -> Self {
        WtlCredentials::Bearer {
            token: token.into(),
        }
    }

    /// Create basic credentials.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        WtlCredentials::Basic {
            username: username.into(),
            password: Some(password.into()),
        }
    }

    /// Create OAuth2 client-credentials configuration.
    pub fn oauth2(
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: Option<String>,
        scopes: Vec<String>,
    ) -> Self {
        WtlCredentials::OAuth2 {
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret,
            scopes,
        }
    }

    /// Create a redacted copy for logging/display.
    pub fn redacted(&self) -> Self {
        match self {
            WtlCredentials::Basic { username, .. } => WtlCredentials::Basic {
                username: username.clone(),
                password: Some("***REDACTED***".to_string()),
            },
            WtlCredentials::Bearer { .. } => WtlCredentials::Bearer {
                token: "***REDACTED***".to_string(),
            },
            WtlCredentials::OAuth2 {
                token_url,
                client_id,
                scopes,
                ..
            } => WtlCredentials::OAuth2 {
                token_url: token_url.clone(),
                client_id: client_id.clone(),
                client_secret: Some("***REDACTED***".to_string()),
                scopes: scopes.clone(),
            },
        }
    }
}

impl std::fmt::Debug for WtlCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"[REDACTED]")
                .finish(),
            Self::Bearer { .. } => f
                .debug_struct("Bearer")
                .field("token", &"[REDACTED]")
                .finish(),
            Self::OAuth2 {
                token_url,
                client_id,
                scopes,
                ..
            } => f
                .debug_struct("OAuth2")
                .field("token_url", token_url)
                .field("client_id", client_id)
                .field("client_secret", &"[REDACTED]")
                .field("scopes", scopes)
                .finish(),
        }
    }
}

/// OAuth2 token response from the token endpoint.
#[derive(Debug, Deserialize)]
struct OAuth2TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Cached OAuth2 access token with expiry.
#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: Option<Instant>,
}

impl CachedToken {
    fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(exp) => Instant::now() >= exp,
            None => false,
        }
    }
}

/// Authentication handler for the WTL API.
///
/// Cheap to clone; the token cache is shared across clones so concurrent
/// requests observe one refresh, not many.
#[derive(Debug, Clone)]
pub struct WtlAuth {
    credentials: WtlCredentials,
    /// Cached OAuth2 token (shared across clones).
    cached_token: Arc<RwLock<Option<CachedToken>>>,
    /// HTTP client for token requests.
    http_client: reqwest::Client,
}

impl WtlAuth {
    /// Create a new auth handler.
    pub fn new(credentials: WtlCredentials, http_client: reqwest::Client) -> Self {
        Self {
            credentials,
            cached_token: Arc::new(RwLock::new(None)),
            http_client,
        }
    }

    /// Whether these credentials can be refreshed after the external system
    /// signals expiry.
    pub fn supports_refresh(&self) -> bool {
        matches!(self.credentials, WtlCredentials::OAuth2 { .. })
    }

    /// Apply authentication to an outbound request.
    pub async fn apply(&self, builder: RequestBuilder) -> WtlResult<RequestBuilder> {
        match &self.credentials {
            WtlCredentials::Basic { username, password } => {
                Ok(builder.basic_auth(username, password.as_deref()))
            }
            WtlCredentials::Bearer { token } => Ok(builder.bearer_auth(token)),
            WtlCredentials::OAuth2 { .. } => {
                let token = self.oauth_token().await?;
                Ok(builder.bearer_auth(token))
            }
        }
    }

    /// Invalidate the cached OAuth2 token (on a 401 from the external
    /// system). The next request fetches a fresh token.
    pub async fn invalidate(&self) {
        let mut cache = self.cached_token.write().await;
        *cache = None;
    }

    /// Get a valid OAuth2 access token, from cache when possible.
    ///
    /// Refresh is single-flight: the first task that sees an expired token
    /// holds the write lock while fetching, and every other task re-checks
    /// the cache after acquiring the lock instead of issuing its own
    /// token request.
    async fn oauth_token(&self) -> WtlResult<String> {
        let WtlCredentials::OAuth2 {
            token_url,
            client_id,
            client_secret,
            scopes,
        } = &self.credentials
        else {
            return Err(WtlError::internal("oauth_token called without OAuth2 credentials"));
        };

        // Fast path: a valid cached token.
        {
            let cache = self.cached_token.read().await;
            if let Some(cached) = cache.as_ref() {
                if !cached.is_expired() {
                    return Ok(cached.access_token.clone());
                }
            }
        }

        let mut cache = self.cached_token.write().await;
        // Another task may have refreshed while we waited for the lock.
        if let Some(cached) = cache.as_ref() {
            if !cached.is_expired() {
                return Ok(cached.access_token.clone());
            }
        }

        debug!(token_url = %token_url, "Fetching OAuth2 access token");

        let mut form = vec![("grant_type", "client_credentials")];
        let scope_str = scopes.join(" ");
        if !scopes.is_empty() {
            form.push(("scope", &scope_str));
        }

        let response = self
            .http_client
            .post(token_url)
            .basic_auth(client_id, client_secret.as_deref())
            .form(&form)
            .send()
            .await
            .map_err(|e| WtlError::authentication(format!("Token request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(WtlError::authentication(format!(
                "Token endpoint returned {status}: {body}"
            )));
        }

        let token_response: OAuth2TokenResponse = response
            .json()
            .await
            .map_err(|e| WtlError::authentication(format!("Failed to parse token response: {e}")))?;

        let expires_at = token_response.expires_in.map(|secs| {
            Instant::now() + Duration::from_secs(secs.saturating_sub(TOKEN_EXPIRY_MARGIN_SECS))
        });

        let access_token = token_response.access_token.clone();
        *cache = Some(CachedToken {
            access_token: token_response.access_token,
            expires_at,
        });

        Ok(access_token)
    }
}
