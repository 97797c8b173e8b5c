//! The WTL HLR/HSS HTTP client.
//!
//! One POST of the unified sync request per event, bounded by the configured
//! timeout. Classification contract: the same input always yields the same
//! [`WtlError`] class; there is no hidden retry loop and no silent drop. The
//! single exception is a one-shot re-attempt after refreshing an expired
//! OAuth2 token, which is an authentication concern rather than a retry.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use tracing::{debug, error, instrument, warn};

use crate::auth::WtlAuth;
use crate::config::WtlConfig;
use crate::error::{WtlError, WtlResult};
use crate::models::{UnifiedSyncRequest, WtlResponse};

/// Client for the WTL HLR/HSS API.
///
/// Cheap to clone: the underlying connection pool and the OAuth2 token
/// cache are shared across clones, so one client can serve concurrent
/// event-processing tasks.
#[derive(Debug, Clone)]
pub struct WtlClient {
    config: WtlConfig,
    http_client: Client,
    auth: WtlAuth,
}

impl WtlClient {
    /// Create a new client from a validated configuration.
    pub fn new(config: WtlConfig) -> WtlResult<Self> {
        config.validate()?;

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WtlError::internal(format!("Failed to build HTTP client: {e}")))?;

        let auth = WtlAuth::new(config.credentials.clone(), http_client.clone());

        Ok(Self {
            config,
            http_client,
            auth,
        })
    }

    /// The configuration this client was built from, with secrets redacted.
    pub fn config_redacted(&self) -> WtlConfig {
        self.config.redacted()
    }

    /// Send a unified sync request to the WTL API.
    ///
    /// Validates the request first so nothing partially-formed leaves the
    /// process. On a 401 with refreshable (OAuth2) credentials the cached
    /// token is invalidated and the call re-attempted exactly once.
    #[instrument(skip(self, request), fields(imsi = %request.imsi, action = %request.action))]
    pub async fn send(&self, request: &UnifiedSyncRequest) -> WtlResult<WtlResponse> {
        request.validate()?;

        let mut response = self.execute(request).await?;

        if response.status() == StatusCode::UNAUTHORIZED && self.auth.supports_refresh() {
            warn!("WTL API rejected the access token, refreshing and re-attempting once");
            self.auth.invalidate().await;
            response = self.execute(request).await?;
        }

        self.classify(response).await
    }

    /// Execute a single POST of the request.
    async fn execute(&self, request: &UnifiedSyncRequest) -> WtlResult<Response> {
        let url = self.config.prov_url();

        debug!(url = %url, "Sending WTL sync request");

        let builder = self.http_client.post(&url).json(request);
        let builder = self.auth.apply(builder).await?;

        builder.send().await.map_err(classify_transport_error)
    }

    /// Classify an HTTP response into a typed outcome.
    async fn classify(&self, response: Response) -> WtlResult<WtlResponse> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            error!(status = %status, "WTL API authentication failed");
            return Err(WtlError::authentication("Invalid API token"));
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!(status = %status, "WTL API rate limited the request");
            return Err(WtlError::rate_limited());
        }

        if !status.is_success() {
            // Best-effort parse of the error body; a malformed body still
            // yields a generic message, never a fault.
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<WtlResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .unwrap_or_else(|| format!("HTTP {status}"));

            error!(status = %status, error = %detail, "WTL API request failed");
            return Err(WtlError::service(detail));
        }

        let body: WtlResponse = response
            .json()
            .await
            .map_err(|e| WtlError::service(format!("Invalid response body: {e}")))?;

        if !body.is_successful() {
            let detail = body.error.clone().unwrap_or_else(|| "Unknown error".to_string());
            error!(error = %detail, "WTL API reported a business-level failure");
            return Err(WtlError::service(detail));
        }

        debug!(message = ?body.message, "WTL sync request succeeded");
        Ok(body)
    }
}

/// Map a transport-level `reqwest` error into the taxonomy.
fn classify_transport_error(e: reqwest::Error) -> WtlError {
    if e.is_timeout() {
        error!(error = %e, "WTL API request timed out");
        WtlError::timeout()
    } else if e.is_connect() {
        error!(error = %e, "WTL API connection failed");
        WtlError::connection(format!("Connection failed: {e}"))
    } else {
        error!(error = %e, "WTL API request error");
        WtlError::connection(format!("Request error: {e}"))
    }
}
