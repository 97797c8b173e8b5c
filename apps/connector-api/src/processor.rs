//! Per-event orchestration: extract, map, derive, build, dispatch.
//!
//! One [`Outcome`] per event. "Ignored" is a first-class outcome, not an
//! error: an event with no defined action or no usable identifier is
//! acknowledged so the upstream system does not redeliver it forever.

use std::sync::Arc;

use espf_events::{Event, EventView};
use tracing::{error, info, warn, Instrument};
use wtl_client::{SubscriberStatus, UnifiedSyncRequest, WtlClient, WtlError, WtlResponse};

use crate::config::Config;
use crate::mapping::ActionMap;

/// Profile attribute names resolved from the access policy.
const CS_PROFILE_ATTR: &str = "cs_profile";
const EPS_PROFILE_ATTR: &str = "eps_profile";

/// Result of processing one event.
#[derive(Debug)]
pub enum Outcome {
    /// The sync request was sent and the external system confirmed it.
    Success { response: WtlResponse },

    /// The event was received and deliberately not acted upon.
    Ignored { reason: String },

    /// The external call failed; the error is already classified.
    Failure(WtlError),
}

/// Processes enriched events into WTL sync calls.
#[derive(Clone)]
pub struct EventProcessor {
    config: Arc<Config>,
    actions: ActionMap,
    wtl: Arc<WtlClient>,
}

impl EventProcessor {
    /// Create a processor.
    pub fn new(config: Arc<Config>, actions: ActionMap, wtl: Arc<WtlClient>) -> Self {
        Self {
            config,
            actions,
            wtl,
        }
    }

    /// Process a single enriched event.
    ///
    /// Consumes the event: nothing is persisted, and no state survives the
    /// invocation.
    pub async fn process(&self, event: Event) -> Outcome {
        let view = EventView::new(&event);

        info!(
            event_id = %view.event_id(),
            event_type = %view.event_type(),
            "Received event"
        );

        let Some(action) = self.actions.action_for(view.event_type()) else {
            let reason = format!("No defined action for event type: {}", view.event_type());
            warn!(event_id = %view.event_id(), "{reason}");
            return Outcome::Ignored { reason };
        };

        let Some(imsi) = view.imsi() else {
            let reason = "IMSI is empty or not provided".to_string();
            warn!(event_id = %view.event_id(), "{reason}");
            return Outcome::Ignored { reason };
        };

        if let Some(pattern) = &self.config.imsi_pattern {
            if !pattern.is_match(imsi) {
                let reason = format!("IMSI {imsi} doesn't follow the regexp provided");
                warn!(event_id = %view.event_id(), pattern = %pattern.as_str(), "{reason}");
                return Outcome::Ignored { reason };
            }
        }

        let bill_open = view.bill_status_open();
        let subscriber_status = SubscriberStatus::derive(view.blocked(), bill_open);

        let mut request = UnifiedSyncRequest::new(imsi, subscriber_status, action)
            .with_cs_profile(view.profile_or(CS_PROFILE_ATTR, &self.config.default_cs_profile))
            .with_eps_profile(view.profile_or(EPS_PROFILE_ATTR, &self.config.default_eps_profile));

        // A routable number is only propagated while the account is open.
        if bill_open {
            if let Some(msisdn) = view.account_msisdn() {
                request = request.with_msisdn(msisdn);
            }
        }

        info!(
            event_id = %view.event_id(),
            imsi = %request.imsi,
            subscriber_status = %request.subscriber_status,
            msisdn = ?request.msisdn,
            cs_profile = ?request.cs_profile,
            eps_profile = ?request.eps_profile,
            action = %request.action,
            sim_status = ?view.sim_status(),
            "Sending unified sync request"
        );

        self.dispatch(event.event_id.clone(), request).await
    }

    /// Send the request on a detached task.
    ///
    /// Provisioning actions are not free to abandon mid-flight: if the
    /// inbound connection drops, this handler future is cancelled, but the
    /// spawned task still runs the call to completion and logs its outcome.
    async fn dispatch(&self, event_id: String, request: UnifiedSyncRequest) -> Outcome {
        let wtl = Arc::clone(&self.wtl);

        let task = async move {
            let result = wtl.send(&request).await;
            match &result {
                Ok(response) => {
                    info!(
                        event_id = %event_id,
                        message = ?response.message,
                        "Event processed successfully"
                    );
                }
                Err(err) => {
                    error!(event_id = %event_id, error = %err, "WTL sync request failed");
                }
            }
            result
        };

        // Keep the request span (trace/request ids) on the detached task.
        let handle = tokio::spawn(task.instrument(tracing::Span::current()));

        match handle.await {
            Ok(Ok(response)) => Outcome::Success { response },
            Ok(Err(err)) => Outcome::Failure(err),
            Err(join_err) => Outcome::Failure(WtlError::internal(format!(
                "Provisioning task failed: {join_err}"
            ))),
        }
    }
}
