//! Wire models for the WTL HLR/HSS provisioning API.
//!
//! [`UnifiedSyncRequest`] is the fully-resolved, system-agnostic intent
//! object: it is only constructed once every required field is present, and
//! optional fields that are absent are omitted from the JSON entirely (the
//! WTL system treats an empty value differently from a missing one).

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{WtlError, WtlResult};

/// 15-digit IMSI as the WTL API requires it.
static IMSI_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{15}$").expect("IMSI_PATTERN is a valid regex"));

/// Profile names: leading letter, then letters/digits/`-_.`.
static PROFILE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z][-_.a-zA-Z0-9]*$").expect("PROFILE_PATTERN is a valid regex")
});

/// Maximum number of MSISDNs the WTL API accepts per request.
const MAX_MSISDN_COUNT: usize = 1;

/// Provisioning action verb understood by the WTL API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WtlAction {
    Insert,
    Update,
    Delete,
    Set,
    Unset,
    Modify,
}

impl WtlAction {
    /// The wire representation of this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            WtlAction::Insert => "insert",
            WtlAction::Update => "update",
            WtlAction::Delete => "delete",
            WtlAction::Set => "set",
            WtlAction::Unset => "unset",
            WtlAction::Modify => "modify",
        }
    }
}

impl std::fmt::Display for WtlAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Desired subscriber state in the HLR/HSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubscriberStatus {
    /// Service is granted.
    #[serde(rename = "serviceGranted")]
    ServiceGranted,
    /// Service is barred by the operator.
    #[serde(rename = "operatorDeterminedBarring")]
    OperatorDeterminedBarring,
}

impl SubscriberStatus {
    /// Derive the target subscriber state from the account signals.
    ///
    /// Granted only when the account is explicitly not blocked AND the
    /// billing status is open. Every other combination — including absent
    /// data — bars the subscriber. Absence of data must never grant service.
    pub fn derive(blocked: Option<bool>, bill_status_open: bool) -> Self {
        if blocked == Some(false) && bill_status_open {
            SubscriberStatus::ServiceGranted
        } else {
            SubscriberStatus::OperatorDeterminedBarring
        }
    }

    /// The wire representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriberStatus::ServiceGranted => "serviceGranted",
            SubscriberStatus::OperatorDeterminedBarring => "operatorDeterminedBarring",
        }
    }
}

impl std::fmt::Display for SubscriberStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request model for unified subscriber synchronization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedSyncRequest {
    /// IMSI of the subscriber (15 digits).
    pub imsi: String,

    /// Desired subscriber state.
    pub subscriber_status: SubscriberStatus,

    /// Routable numbers for the subscriber (at most one). Omitted when
    /// empty rather than sent as an empty list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub msisdn: Vec<String>,

    /// CS profile name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cs_profile: Option<String>,

    /// EPS profile name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eps_profile: Option<String>,

    /// Provisioning action.
    pub action: WtlAction,
}

impl UnifiedSyncRequest {
    /// Create a request from the required fields.
    pub fn new(
        imsi: impl Into<String>,
        subscriber_status: SubscriberStatus,
        action: WtlAction,
    ) -> Self {
        Self {
            imsi: imsi.into(),
            subscriber_status,
            msisdn: Vec::new(),
            cs_profile: None,
            eps_profile: None,
            action,
        }
    }

    /// Add a routable number.
    pub fn with_msisdn(mut self, msisdn: impl Into<String>) -> Self {
        self.msisdn.push(msisdn.into());
        self
    }

    /// Set the CS profile.
    pub fn with_cs_profile(mut self, profile: impl Into<String>) -> Self {
        self.cs_profile = Some(profile.into());
        self
    }

    /// Set the EPS profile.
    pub fn with_eps_profile(mut self, profile: impl Into<String>) -> Self {
        self.eps_profile = Some(profile.into());
        self
    }

    /// Validate the request against the WTL API field constraints.
    ///
    /// Called by [`WtlClient::send`](crate::client::WtlClient::send) before
    /// anything leaves the process, so a partially-valid request can never
    /// reach the transport layer.
    pub fn validate(&self) -> WtlResult<()> {
        if !IMSI_PATTERN.is_match(&self.imsi) {
            return Err(WtlError::InvalidRequest(format!(
                "IMSI '{}' must be exactly 15 digits",
                self.imsi
            )));
        }

        if self.msisdn.len() > MAX_MSISDN_COUNT {
            return Err(WtlError::InvalidRequest(format!(
                "At most {} MSISDN allowed, got {}",
                MAX_MSISDN_COUNT,
                self.msisdn.len()
            )));
        }

        for (field, value) in [
            ("cs_profile", self.cs_profile.as_deref()),
            ("eps_profile", self.eps_profile.as_deref()),
        ] {
            if let Some(profile) = value {
                if !PROFILE_PATTERN.is_match(profile) {
                    return Err(WtlError::InvalidRequest(format!(
                        "{field} '{profile}' is not a valid profile name"
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Response body returned by the WTL API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WtlResponse {
    /// `true` if the operation was successful.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<bool>,

    /// Error message when `result` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Informational response message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl WtlResponse {
    /// Whether the response indicates logical success.
    ///
    /// An explicit `result` wins. A message without an error counts as
    /// success (mock endpoints answer that way); a present `error` is a
    /// failure; an entirely empty body defaults to success for backward
    /// compatibility with older WTL releases.
    pub fn is_successful(&self) -> bool {
        if let Some(result) = self.result {
            return result;
        }
        if self.message.is_some() && self.error.is_none() {
            return true;
        }
        self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_derive_granted_only_when_open_and_unblocked() {
        use SubscriberStatus::*;

        assert_eq!(SubscriberStatus::derive(Some(false), true), ServiceGranted);

        // Every other combination of the two signals bars the subscriber.
        assert_eq!(
            SubscriberStatus::derive(Some(true), true),
            OperatorDeterminedBarring
        );
        assert_eq!(
            SubscriberStatus::derive(Some(false), false),
            OperatorDeterminedBarring
        );
        assert_eq!(
            SubscriberStatus::derive(Some(true), false),
            OperatorDeterminedBarring
        );

        // Absent data is restrictive, never permissive.
        assert_eq!(
            SubscriberStatus::derive(None, true),
            OperatorDeterminedBarring
        );
        assert_eq!(
            SubscriberStatus::derive(None, false),
            OperatorDeterminedBarring
        );
    }

    #[test]
    fn test_subscriber_status_wire_values() {
        assert_eq!(
            serde_json::to_value(SubscriberStatus::ServiceGranted).unwrap(),
            json!("serviceGranted")
        );
        assert_eq!(
            serde_json::to_value(SubscriberStatus::OperatorDeterminedBarring).unwrap(),
            json!("operatorDeterminedBarring")
        );
    }

    #[test]
    fn test_action_wire_values() {
        assert_eq!(serde_json::to_value(WtlAction::Update).unwrap(), json!("update"));
        assert_eq!(serde_json::to_value(WtlAction::Unset).unwrap(), json!("unset"));
    }

    #[test]
    fn test_request_omits_absent_optional_fields() {
        let request = UnifiedSyncRequest::new(
            "001010000020349",
            SubscriberStatus::OperatorDeterminedBarring,
            WtlAction::Update,
        );

        let value = serde_json::to_value(&request).unwrap();
        let obj = value.as_object().unwrap();

        // Omitted, not null and not empty.
        assert!(!obj.contains_key("msisdn"));
        assert!(!obj.contains_key("cs_profile"));
        assert!(!obj.contains_key("eps_profile"));
        assert_eq!(obj["imsi"], json!("001010000020349"));
        assert_eq!(obj["action"], json!("update"));
    }

    #[test]
    fn test_request_full_serialization() {
        let request = UnifiedSyncRequest::new(
            "001010000020349",
            SubscriberStatus::ServiceGranted,
            WtlAction::Update,
        )
        .with_msisdn("380661310764")
        .with_cs_profile("cs-pp-20250319")
        .with_eps_profile("eps-pp-20250319");

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "imsi": "001010000020349",
                "subscriber_status": "serviceGranted",
                "msisdn": ["380661310764"],
                "cs_profile": "cs-pp-20250319",
                "eps_profile": "eps-pp-20250319",
                "action": "update"
            })
        );
    }

    #[test]
    fn test_validate_imsi_length() {
        let ok = UnifiedSyncRequest::new(
            "001010000020349",
            SubscriberStatus::ServiceGranted,
            WtlAction::Update,
        );
        assert!(ok.validate().is_ok());

        for bad in ["00101000002034", "0010100000203491", "00101000002034x", ""] {
            let request =
                UnifiedSyncRequest::new(bad, SubscriberStatus::ServiceGranted, WtlAction::Update);
            assert!(
                matches!(request.validate(), Err(WtlError::InvalidRequest(_))),
                "IMSI '{bad}' should be rejected"
            );
        }
    }

    #[test]
    fn test_validate_profile_pattern() {
        let base = || {
            UnifiedSyncRequest::new(
                "001010000020349",
                SubscriberStatus::ServiceGranted,
                WtlAction::Update,
            )
        };

        assert!(base().with_cs_profile("cs-pp-20250319").validate().is_ok());
        assert!(base().with_eps_profile("eps_profile.v2").validate().is_ok());

        assert!(base().with_cs_profile("1leading-digit").validate().is_err());
        assert!(base().with_eps_profile("has space").validate().is_err());
        assert!(base().with_cs_profile("").validate().is_err());
    }

    #[test]
    fn test_validate_msisdn_limit() {
        let request = UnifiedSyncRequest::new(
            "001010000020349",
            SubscriberStatus::ServiceGranted,
            WtlAction::Update,
        )
        .with_msisdn("380661310764")
        .with_msisdn("380661310765");

        assert!(matches!(
            request.validate(),
            Err(WtlError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_response_success_matrix() {
        let cases: [(serde_json::Value, bool); 6] = [
            (json!({ "result": true }), true),
            (json!({ "result": false, "error": "subscriber unknown" }), false),
            // result wins over a present error
            (json!({ "result": true, "error": "stale" }), true),
            (json!({ "message": "provisioned" }), true),
            (json!({ "error": "boom" }), false),
            (json!({}), true),
        ];

        for (body, expected) in cases {
            let response: WtlResponse = serde_json::from_value(body.clone()).unwrap();
            assert_eq!(
                response.is_successful(),
                expected,
                "body {body} should be successful={expected}"
            );
        }
    }
}
