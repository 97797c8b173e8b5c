//! Field extraction over a possibly-partial enriched event.
//!
//! [`EventView`] answers every question with an explicit `Option` instead of
//! an error: missing optional data is an expected shape of real payloads.
//! Absence is always the restrictive answer for the caller (an event with no
//! IMSI is ignored, an account with no billing status is not treated as open).

use tracing::debug;

use crate::event::Event;
use crate::pb_data::{AccessPolicyInfo, AccountInfo, BillStatus, CardInfo};

/// Marker separating a routable number from the rest of a composite
/// account identifier (`<msisdn>@msisdn`).
const MSISDN_MARKER: &str = "@msisdn";

/// Read-only accessor layer over an [`Event`].
///
/// Borrowed from the event for the duration of one processing invocation;
/// nothing is copied on the lookup path.
#[derive(Debug, Clone, Copy)]
pub struct EventView<'a> {
    event: &'a Event,
}

impl<'a> EventView<'a> {
    /// Wrap an event.
    pub fn new(event: &'a Event) -> Self {
        Self { event }
    }

    fn account_info(&self) -> Option<&'a AccountInfo> {
        self.event.pb_data.as_ref()?.account_info.as_ref()
    }

    fn sim_info(&self) -> Option<&'a CardInfo> {
        self.event.pb_data.as_ref()?.sim_info.as_ref()
    }

    fn access_policy_info(&self) -> Option<&'a AccessPolicyInfo> {
        self.event.pb_data.as_ref()?.access_policy_info.as_ref()
    }

    /// The delivery-unique event id.
    pub fn event_id(&self) -> &'a str {
        &self.event.event_id
    }

    /// The event type tag.
    pub fn event_type(&self) -> &'a str {
        &self.event.data.event_type
    }

    /// The subscriber's IMSI, from the SIM info bundle.
    pub fn imsi(&self) -> Option<&'a str> {
        self.sim_info()?.imsi.as_deref().filter(|s| !s.is_empty())
    }

    /// The SIM card status, if delivered. Carried for logging only; state
    /// derivation intentionally ignores it (see DESIGN.md).
    pub fn sim_status(&self) -> Option<&'a str> {
        self.sim_info()?.status.as_deref()
    }

    /// The routable number encoded in the composite account identifier.
    ///
    /// Returns the prefix before the `@msisdn` marker. When the marker is
    /// absent the identifier does not carry a number and `None` is returned.
    pub fn account_msisdn(&self) -> Option<&'a str> {
        let id = self.account_info()?.id.as_deref()?;
        id.find(MSISDN_MARKER).map(|pos| &id[..pos])
    }

    /// The account billing status.
    pub fn bill_status(&self) -> Option<BillStatus> {
        self.account_info()?.bill_status
    }

    /// Whether the account billing status is `open`. Absent data is `false`.
    pub fn bill_status_open(&self) -> bool {
        self.bill_status() == Some(BillStatus::Open)
    }

    /// The account blocked flag.
    pub fn blocked(&self) -> Option<bool> {
        self.account_info()?.blocked
    }

    /// Look up an access-policy attribute by name. The attribute list is not
    /// guaranteed sorted; the first match wins.
    pub fn profile(&self, name: &str) -> Option<&'a str> {
        self.access_policy_info()?
            .attributes
            .iter()
            .find(|attr| attr.name.as_deref() == Some(name))
            .and_then(|attr| attr.value.as_deref())
    }

    /// Look up a profile attribute, falling back to the configured default.
    pub fn profile_or(&self, name: &str, default: &str) -> String {
        match self.profile(name) {
            Some(value) => value.to_string(),
            None => {
                debug!(
                    event_id = %self.event_id(),
                    profile = %name,
                    default = %default,
                    "Access policy attribute absent, using default profile"
                );
                default.to_string()
            }
        }
    }
}
