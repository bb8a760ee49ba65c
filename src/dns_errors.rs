// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for Route53 record operations.
//!
//! This module provides specialized error types for:
//! - Record field validation (hostnames, TTL ranges, value constraints)
//! - Decoding Route53 record set responses into typed records
//! - Route53 API transport failures
//! - CRUD engine outcomes (not found, rejected changes)
//!
//! These errors provide structured error handling for record operations,
//! enabling better error reporting in status conditions and metrics.

use thiserror::Error;

/// Errors raised when record fields fail domain validation.
///
/// Validation runs at record construction time, before any call to Route53.
/// A record that fails validation is never sent to the provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The record name (or a CNAME target) is not a valid hostname.
    ///
    /// Each dot-separated label must be 1-63 characters of alphanumerics and
    /// hyphens, with no leading or trailing hyphen, and the whole name must
    /// be at most 255 characters.
    #[error("'{name}' is not a valid hostname")]
    InvalidHostname {
        /// The rejected name
        name: String,
    },

    /// TTL is outside the range Route53 accepts (0 to 2147483647 seconds).
    #[error("TTL {ttl} is out of range (0..=2147483647)")]
    TtlOutOfRange {
        /// The rejected TTL value
        ttl: i64,
    },

    /// A TXT value exceeds 255 characters after trimming whitespace.
    #[error("TXT value is {len} characters after trimming, maximum is 255")]
    TxtValueTooLong {
        /// Length of the trimmed value
        len: usize,
    },

    /// An A record value is not a valid IPv4 address.
    #[error("'{value}' is not a valid IPv4 address")]
    InvalidIpv4Address {
        /// The rejected address string
        value: String,
    },
}

/// Errors raised when a Route53 record set response cannot be decoded into
/// a typed record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The record set's type tag does not match the expected record type.
    ///
    /// Seen when a lookup response is disambiguated: a record set of a
    /// different type at the same name must not decode into this variant.
    #[error("record set '{name}' has type {found}, expected {expected}")]
    TypeMismatch {
        /// Record set name
        name: String,
        /// Expected type tag ("A", "CNAME", "TXT")
        expected: &'static str,
        /// Type tag found in the response
        found: String,
    },

    /// A field required by the record type is absent from the record set.
    #[error("record set '{name}' is missing {field}")]
    MissingField {
        /// Record set name
        name: String,
        /// The absent field
        field: &'static str,
    },

    /// A decoded field failed domain validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Errors returned by the Route53 API collaborator.
///
/// These are transport-level outcomes owned by the client: the CRUD engine
/// re-tags the client-error class into [`CrudError::InvalidChange`] on change
/// submissions and propagates everything else unchanged. The engine adds no
/// retry logic of its own.
#[derive(Error, Debug)]
pub enum Route53Error {
    /// Route53 rejected the request (HTTP 4xx).
    ///
    /// Covers malformed change batches, conflicting record sets, and quota
    /// violations. These are permanent for the request as submitted.
    #[error("Route53 rejected the request (HTTP {status}): {message}")]
    Rejected {
        /// HTTP status code (4xx)
        status: u16,
        /// Error detail from the response body
        message: String,
    },

    /// Route53 throttled the request (HTTP 429).
    #[error("Route53 throttled the request (HTTP {status})")]
    Throttled {
        /// HTTP status code
        status: u16,
    },

    /// The Route53 endpoint returned a server error (HTTP 5xx).
    #[error("Route53 endpoint unavailable (HTTP {status}): {message}")]
    Unavailable {
        /// HTTP status code (5xx)
        status: u16,
        /// Response body or error message
        message: String,
    },

    /// The HTTP request could not be completed (connect failure, timeout).
    #[error("request to Route53 failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be parsed into the expected shape.
    #[error("could not decode Route53 response: {reason}")]
    Response {
        /// What was malformed
        reason: String,
    },
}

impl Route53Error {
    /// Returns true if this error is Route53 rejecting the request itself,
    /// as opposed to a transport or availability failure.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

/// Outcomes of CRUD engine operations against a hosted zone.
///
/// Provider-side errors are caught only at the engine boundary to be
/// re-tagged into [`CrudError::NotFound`] and [`CrudError::InvalidChange`];
/// transport failures pass through as [`CrudError::Provider`].
#[derive(Error, Debug)]
pub enum CrudError {
    /// No record of the expected name and type exists in the hosted zone.
    ///
    /// This is the expected outcome of a lookup miss, including the case
    /// where the list-starting-at-name call returns the lexicographically
    /// next record instead. Callers must not conflate it with a transport
    /// failure.
    #[error("no {record_type} record named '{name}' in hosted zone {hosted_zone_id}")]
    NotFound {
        /// The hosted zone searched
        hosted_zone_id: String,
        /// The queried record name (canonical trailing-dot form)
        name: String,
        /// The queried record type
        record_type: &'static str,
    },

    /// Route53 rejected a change batch.
    ///
    /// Wraps the provider's client-error class without leaking its exception
    /// shape to callers. Covers pre-existing records on CREATE, malformed
    /// values, and mismatched value sets on DELETE.
    #[error("hosted zone {hosted_zone_id} rejected {action} for '{name}': {reason}")]
    InvalidChange {
        /// The hosted zone the change targeted
        hosted_zone_id: String,
        /// The record name in the change
        name: String,
        /// The change action ("CREATE", "UPSERT", "DELETE")
        action: &'static str,
        /// Rejection detail from the provider
        reason: String,
    },

    /// A record set returned by Route53 could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A transport-level failure from the Route53 collaborator, propagated
    /// unchanged.
    #[error(transparent)]
    Provider(#[from] Route53Error),
}

impl CrudError {
    /// Returns true if this error is transient and the operation should be
    /// retried on a later reconciliation.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::NotFound { .. } | Self::InvalidChange { .. } | Self::Decode(_) => false,
            Self::Provider(err) => !err.is_client_error(),
        }
    }

    /// Returns the Kubernetes status condition reason code for this error.
    #[must_use]
    pub fn status_reason(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "RecordNotFound",
            Self::InvalidChange { .. } => "InvalidRecordChange",
            Self::Decode(_) => "RecordDecodeFailed",
            Self::Provider(Route53Error::Rejected { .. }) => "Route53Rejected",
            Self::Provider(Route53Error::Throttled { .. }) => "Route53Throttled",
            Self::Provider(_) => "Route53Unavailable",
        }
    }
}
