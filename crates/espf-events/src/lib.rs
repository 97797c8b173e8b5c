//! PortaBilling ESPF event model and field extraction.
//!
//! The upstream enrichment system (NSPS) delivers billing events that have
//! been augmented with account, SIM and access-policy context. This crate
//! provides the typed representation of those payloads and the accessor
//! layer that pulls identifiers out of the (possibly partial) nested data
//! without ever failing on merely-missing optional fields.
//!
//! # Modules
//!
//! - [`event`] - The event envelope (`Event`, `EspfEvent`, `EventType`)
//! - [`pb_data`] - PortaBilling enrichment bundles (account, SIM, policy)
//! - [`view`] - [`EventView`](view::EventView) field extraction

pub mod event;
pub mod pb_data;
pub mod view;

pub use event::{EspfEvent, Event, EventType};
pub use pb_data::{
    AccessPolicyAttribute, AccessPolicyInfo, AccountInfo, AddOnProduct, BillStatus, CardInfo,
    PbData, ServiceFeature, ServiceFeatureAttribute,
};
pub use view::EventView;
