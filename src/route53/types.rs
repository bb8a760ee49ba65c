// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Wire types for the Route53 record set API.
//!
//! These structs mirror the shapes the `ListResourceRecordSets`,
//! `ChangeResourceRecordSets`, and `CreateHostedZone` operations exchange,
//! with the provider's PascalCase field names. The typed record model in
//! [`crate::route53::records`] encodes to and decodes from
//! [`ResourceRecordSet`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single value entry within a record set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceRecord {
    /// The record value (an IPv4 address, a target hostname, a text string).
    pub value: String,
}

impl ResourceRecord {
    /// Wrap a rendered value in the wire shape.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// One (name, type) record set in a hosted zone.
///
/// `ttl` and `resource_records` are optional because UPSERT change requests
/// carry only the fields being changed; both are always present on record
/// sets returned by a listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceRecordSet {
    /// Fully-qualified record name in the provider's trailing-dot form.
    pub name: String,

    /// Record type tag ("A", "CNAME", "TXT", ...).
    #[serde(rename = "Type")]
    pub record_type: String,

    /// Time to live in seconds.
    #[serde(rename = "TTL", skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,

    /// The value entries, in submission order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_records: Option<Vec<ResourceRecord>>,
}

/// Change batch actions supported by `ChangeResourceRecordSets`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeAction {
    /// Create a record set; fails if one already exists at (name, type).
    Create,
    /// Create-or-replace a record set.
    Upsert,
    /// Delete a record set; the submitted values must match the current set.
    Delete,
}

impl ChangeAction {
    /// The wire spelling of the action.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Upsert => "UPSERT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single change within a change batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Change {
    /// The action to apply.
    pub action: ChangeAction,
    /// The record set the action applies to.
    pub resource_record_set: ResourceRecordSet,
}

/// An atomic set of changes submitted to a hosted zone.
///
/// The CRUD engine always submits exactly one change per batch so that one
/// request maps to one outcome and one error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChangeBatch {
    /// Free-form comment recorded against the change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// The changes to apply.
    pub changes: Vec<Change>,
}

/// Propagation state of a submitted change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeStatus {
    /// The change has been accepted but not yet propagated everywhere.
    Pending,
    /// The change has propagated to all authoritative servers.
    Insync,
}

/// Receipt returned for a submitted change batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChangeInfo {
    /// Identifier of the change, e.g. "/change/C2682N5HXP0BZ4".
    pub id: String,
    /// Propagation status at submission time.
    pub status: ChangeStatus,
    /// Submission timestamp (RFC3339).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<String>,
    /// Comment echoed back from the change batch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// A hosted zone as returned by `CreateHostedZone`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HostedZone {
    /// Zone identifier, e.g. "/hostedzone/Z1D633PJN98FT9".
    pub id: String,
    /// Zone apex name in trailing-dot form.
    pub name: String,
    /// The idempotency token the zone was created with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caller_reference: Option<String>,
    /// Number of record sets in the zone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_record_set_count: Option<i64>,
}

/// Request body for `ChangeResourceRecordSets`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChangeResourceRecordSetsRequest {
    /// The batch of changes to apply atomically.
    pub change_batch: ChangeBatch,
}

/// Response body for `ChangeResourceRecordSets`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChangeResourceRecordSetsResponse {
    /// Receipt for the submitted batch.
    pub change_info: ChangeInfo,
}

/// Response body for `ListResourceRecordSets`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListResourceRecordSetsResponse {
    /// Record sets starting at the requested (name, type) position.
    #[serde(default)]
    pub resource_record_sets: Vec<ResourceRecordSet>,
    /// Whether more record sets follow the returned page.
    #[serde(default)]
    pub is_truncated: bool,
}

/// Request body for `CreateHostedZone`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateHostedZoneRequest {
    /// Zone apex name.
    pub name: String,
    /// Idempotency token; retries with the same token are deduplicated.
    pub caller_reference: String,
}

/// Response body for `CreateHostedZone`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateHostedZoneResponse {
    /// The created zone.
    pub hosted_zone: HostedZone,
    /// Receipt for the zone creation change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_info: Option<ChangeInfo>,
}

/// Error body returned by the Route53 API on rejected requests.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiErrorBody {
    /// Machine-readable error code, e.g. "InvalidChangeBatch".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Human-readable detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
