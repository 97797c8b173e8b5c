//! PortaBilling enrichment bundles.
//!
//! Every sub-bundle and nearly every field is optional: the upstream system
//! forwards whatever context it could gather, and absence of data must never
//! fail deserialization. Unknown billing-status values are preserved as
//! [`BillStatus::Unknown`] so they never compare equal to [`BillStatus::Open`].

use serde::{Deserialize, Serialize};

/// Billing status of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    /// The account is open and billable.
    Open,
    /// The account is inactive (set at creation time).
    Inactive,
    /// The account is terminated.
    Terminated,
    /// The account is suspended (debit accounts, set automatically).
    Suspended,
    /// Any value this connector does not recognize. Treated as restrictive.
    #[serde(other)]
    Unknown,
}

/// Account information from PortaBilling.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AccountInfo {
    /// The billing status of the account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_status: Option<BillStatus>,

    /// The account type (debit, credit, beneficiary, voucher, alias).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_model: Option<String>,

    /// Whether the account's calls and self-care access are blocked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked: Option<bool>,

    /// The email address associated with the account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// The account owner's first name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,

    /// The account owner's last name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,

    /// The unique ID of the account record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub i_account: Option<i64>,

    /// The ID of the customer record the account belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub i_customer: Option<i64>,

    /// The ID of the account's product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub i_product: Option<i64>,

    /// The composite ID (PIN) of the account on the interface. May encode a
    /// routable number as `<msisdn>@msisdn`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The main phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone1: Option<String>,

    /// The name of the account's product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,

    /// The effective status of the account (own status + customer status).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// The account's add-on products.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assigned_addons: Vec<AddOnProduct>,

    /// The account's service features.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub service_features: Vec<ServiceFeature>,
}

/// An add-on product assigned to an account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AddOnProduct {
    /// When the add-on product is activated (ISO datetime string).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addon_effective_from: Option<String>,

    /// When the add-on product expires (ISO datetime string).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addon_effective_to: Option<String>,

    /// Priority of the add-on (0 = main product, 10..30 = low..high).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addon_priority: Option<i64>,

    /// The internal product description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The unique ID of the product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub i_product: Option<i64>,

    /// The product name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A service feature flag on an account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ServiceFeature {
    /// The service feature name (e.g. `netaccess_policy`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The actual service feature flag value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_flag_value: Option<String>,

    /// The list of service feature attributes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<ServiceFeatureAttribute>,
}

/// A named attribute of a service feature.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ServiceFeatureAttribute {
    /// The attribute internal name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Attribute value, comma-separated if multiple.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_value: Option<String>,
}

/// SIM card information from PortaBilling.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CardInfo {
    /// The unique ID of the account the SIM card belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub i_account: Option<i64>,

    /// The unique ID of the SIM card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub i_sim_card: Option<i64>,

    /// The Integrated Circuit Card ID stored on the SIM (18-22 digits).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iccid: Option<String>,

    /// The International Mobile Subscriber Identity (6-15 digits).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imsi: Option<String>,

    /// The mobile number of the SIM card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msisdn: Option<String>,

    /// The status of the SIM card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// A named attribute of an access policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AccessPolicyAttribute {
    /// The name used to group service policy attributes (e.g. `lte.wtl`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,

    /// The name of the service policy attribute (e.g. `cs_profile`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Attribute value, comma-separated if multiple.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Access policy information from PortaBilling.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AccessPolicyInfo {
    /// The unique ID of the service policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub i_access_policy: Option<i64>,

    /// The name of the access policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The list of related service policy attribute values. Order is not
    /// guaranteed by the upstream system.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AccessPolicyAttribute>,
}

/// The enrichment data attached to an event. Every bundle is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PbData {
    /// Account information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_info: Option<AccountInfo>,

    /// SIM card information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sim_info: Option<CardInfo>,

    /// Access policy information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_policy_info: Option<AccessPolicyInfo>,
}
