// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Custom Resource Definitions (CRDs) for Route53 DNS records.
//!
//! This module defines the Kubernetes Custom Resource Definitions the
//! operator reconciles against AWS Route53 hosted zones.
//!
//! # Resource Types
//!
//! - [`ARecord`] - IPv4 address records
//! - [`CNAMERecord`] - Canonical name (alias) records
//! - [`TXTRecord`] - Text records (SPF, DKIM, domain verification, etc.)
//!
//! Each resource names the hosted zone it lives in (`hostedZoneId`), the
//! fully-qualified record name, an optional TTL, and a type-specific value.
//! The status subresource reports reconciliation conditions and the record
//! state last confirmed against Route53.
//!
//! # Example: Creating an A Record
//!
//! ```rust,no_run
//! use route53_operator::crd::ARecordSpec;
//!
//! let a_record = ARecordSpec {
//!     hosted_zone_id: "Z1D633PJN98FT9".to_string(),
//!     name: "www.example.com".to_string(),
//!     ttl: Some(300),
//!     value: vec!["192.0.2.1".to_string()],
//! };
//! ```

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Condition represents an observation of a resource's current state.
///
/// Conditions are used in status subresources to communicate the state of
/// a resource to users and controllers.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema)]
pub struct Condition {
    /// Type of condition. Common types include: Ready, Available, Progressing, Degraded, Failed.
    pub r#type: String,

    /// Status of the condition: True, False, or Unknown.
    pub status: String,

    /// Brief CamelCase reason for the condition's last transition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Human-readable message indicating details about the transition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Last time the condition transitioned from one status to another (RFC3339 format).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<String>,
}

/// Record state last confirmed against Route53.
///
/// Written into the status after a successful reconciliation so observers
/// see the converged provider-side values rather than only the declared
/// spec.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ObservedRecord {
    /// Hosted zone the record was confirmed in.
    pub hosted_zone_id: String,

    /// Fully-qualified record name in the provider's trailing-dot form.
    pub name: String,

    /// Record type tag ("A", "CNAME", "TXT").
    pub record_type: String,

    /// Confirmed TTL in seconds.
    pub ttl: i64,

    /// Confirmed values, in provider order.
    pub values: Vec<String>,
}

/// Status subresource shared by all record kinds.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordStatus {
    /// Reconciliation conditions, most recent first.
    #[serde(default)]
    pub conditions: Vec<Condition>,

    /// The spec generation last acted on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,

    /// The record as last confirmed against Route53.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<ObservedRecord>,
}

/// `ARecord` maps a DNS name to one or more IPv4 addresses.
///
/// Multiple addresses on the same name enable round-robin DNS; the order of
/// `value` is preserved exactly in the record set submitted to Route53.
///
/// # Example
///
/// ```yaml
/// apiVersion: route53.firestoned.io/v1alpha1
/// kind: ARecord
/// metadata:
///   name: www-example-com
///   namespace: dns-system
/// spec:
///   hostedZoneId: Z1D633PJN98FT9
///   name: www.example.com
///   ttl: 300
///   value:
///     - 192.0.2.1
///     - 192.0.2.2
/// ```
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "route53.firestoned.io",
    version = "v1alpha1",
    kind = "ARecord",
    namespaced,
    shortname = "a",
    doc = "ARecord maps a fully-qualified DNS name to a list of IPv4 addresses in a Route53 hosted zone."
)]
#[kube(status = "RecordStatus")]
#[serde(rename_all = "camelCase")]
pub struct ARecordSpec {
    /// Route53 hosted zone ID, e.g. "Z1D633PJN98FT9".
    ///
    /// Immutable once the record exists; the zone is never derived from the
    /// record name.
    pub hosted_zone_id: String,

    /// Fully-qualified record name, with or without a trailing dot.
    ///
    /// Examples: "www.example.com", "www.example.com."
    #[schemars(regex(
        pattern = r"^[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*\.?$"
    ))]
    pub name: String,

    /// Time To Live in seconds. Defaults to 60 when unset.
    #[serde(default)]
    #[schemars(range(min = 0, max = 2_147_483_647))]
    pub ttl: Option<i64>,

    /// IPv4 addresses in dotted-decimal notation, in serving order.
    pub value: Vec<String>,
}

/// `CNAMERecord` creates an alias from one name to another.
///
/// The target can be in the same zone or a different zone. A CNAME cannot
/// coexist with other record types for the same name.
///
/// # Example
///
/// ```yaml
/// apiVersion: route53.firestoned.io/v1alpha1
/// kind: CNAMERecord
/// metadata:
///   name: blog-example-com
/// spec:
///   hostedZoneId: Z1D633PJN98FT9
///   name: blog.example.com
///   ttl: 3600
///   value: example.github.io.
/// ```
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "route53.firestoned.io",
    version = "v1alpha1",
    kind = "CNAMERecord",
    namespaced,
    shortname = "cname",
    doc = "CNAMERecord creates a DNS alias from one hostname to another in a Route53 hosted zone. A CNAME cannot coexist with other record types for the same name."
)]
#[kube(status = "RecordStatus")]
#[serde(rename_all = "camelCase")]
pub struct CNAMERecordSpec {
    /// Route53 hosted zone ID.
    pub hosted_zone_id: String,

    /// Fully-qualified record name, with or without a trailing dot.
    ///
    /// Note: CNAME records cannot be created at the zone apex.
    #[schemars(regex(
        pattern = r"^[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*\.?$"
    ))]
    pub name: String,

    /// Time To Live in seconds. Defaults to 60 when unset.
    #[serde(default)]
    #[schemars(range(min = 0, max = 2_147_483_647))]
    pub ttl: Option<i64>,

    /// Target hostname (canonical name).
    ///
    /// Example: "example.com." or "www.example.com."
    #[schemars(regex(
        pattern = r"^[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*\.?$"
    ))]
    pub value: String,
}

/// `TXTRecord` holds a text value.
///
/// Commonly used for SPF, DKIM, DMARC, and domain verification. The value is
/// trimmed of surrounding whitespace before submission.
///
/// # Example
///
/// ```yaml
/// apiVersion: route53.firestoned.io/v1alpha1
/// kind: TXTRecord
/// metadata:
///   name: spf-example-com
/// spec:
///   hostedZoneId: Z1D633PJN98FT9
///   name: example.com
///   ttl: 3600
///   value: "v=spf1 include:_spf.google.com ~all"
/// ```
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "route53.firestoned.io",
    version = "v1alpha1",
    kind = "TXTRecord",
    namespaced,
    shortname = "txt",
    doc = "TXTRecord stores a text value in a Route53 hosted zone. Commonly used for SPF, DKIM, DMARC policies, and domain verification."
)]
#[kube(status = "RecordStatus")]
#[serde(rename_all = "camelCase")]
pub struct TXTRecordSpec {
    /// Route53 hosted zone ID.
    pub hosted_zone_id: String,

    /// Fully-qualified record name, with or without a trailing dot.
    #[schemars(regex(
        pattern = r"^[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*\.?$"
    ))]
    pub name: String,

    /// Time To Live in seconds. Defaults to 60 when unset.
    #[serde(default)]
    #[schemars(range(min = 0, max = 2_147_483_647))]
    pub ttl: Option<i64>,

    /// Text value, up to 255 characters after trimming whitespace.
    #[schemars(length(max = 255))]
    pub value: String,
}
