// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Typed DNS record model.
//!
//! One module per record type, each defining a validated record struct, its
//! partial update counterpart, and the codec to and from the provider's
//! [`ResourceRecordSet`] shape. The [`Route53Record`] trait is the single
//! lifecycle contract the CRUD engine is generic over.
//!
//! Record names are held in the provider's canonical trailing-dot form.
//! Constructors normalize and validate; an invalid record is never sent to
//! Route53.

pub mod a;
pub mod cname;
pub mod txt;

pub use a::{ARecordSet, ARecordUpdate};
pub use cname::{CnameRecordSet, CnameRecordUpdate};
pub use txt::{TxtRecordSet, TxtRecordUpdate};

use crate::dns_errors::{DecodeError, ValidationError};
use crate::route53::types::{ResourceRecord, ResourceRecordSet};

/// Default TTL for records that don't specify one (1 minute).
pub const DEFAULT_RECORD_TTL_SECS: i64 = 60;

/// Largest TTL Route53 accepts (signed 32-bit max).
pub const MAX_RECORD_TTL_SECS: i64 = 2_147_483_647;

/// Capability contract for a typed record variant.
///
/// The CRUD engine is parameterized over this trait; each record type
/// supplies its wire tag, its partial update counterpart, and the codec to
/// and from the provider record set shape.
pub trait Route53Record: Clone + Send + Sync + Sized {
    /// Wire type tag ("A", "CNAME", "TXT"), used both for API calls and for
    /// disambiguating listing responses.
    const RECORD_TYPE: &'static str;

    /// The partial counterpart carrying the mutable fields as optionals.
    type Update: RecordUpdate;

    /// The hosted zone this record lives in. Immutable once constructed.
    fn hosted_zone_id(&self) -> &str;

    /// Fully-qualified record name in canonical trailing-dot form.
    fn fqdn(&self) -> &str;

    /// Time to live in seconds.
    fn ttl(&self) -> i64;

    /// Value entries in submission order. Ordering is preserved exactly;
    /// the provider's change diffing depends on it.
    fn resource_records(&self) -> Vec<ResourceRecord>;

    /// Decode a provider record set into this variant.
    ///
    /// # Errors
    ///
    /// Returns an error if the type tag doesn't match, a required field is
    /// absent, or a decoded field fails validation.
    fn from_record_set(
        hosted_zone_id: &str,
        record_set: &ResourceRecordSet,
    ) -> Result<Self, DecodeError>;

    /// Render this record as the full record set shape the change API
    /// expects.
    fn to_record_set(&self) -> ResourceRecordSet {
        ResourceRecordSet {
            name: self.fqdn().to_string(),
            record_type: Self::RECORD_TYPE.to_string(),
            ttl: Some(self.ttl()),
            resource_records: Some(self.resource_records()),
        }
    }
}

/// Partial update counterpart of a record variant.
///
/// Absent fields mean "do not change"; the engine includes only present
/// fields in the UPSERT request it builds.
pub trait RecordUpdate: Clone + Send + Sync {
    /// New TTL, if it should change.
    fn ttl(&self) -> Option<i64>;

    /// New value entries, if they should change.
    fn resource_records(&self) -> Option<Vec<ResourceRecord>>;
}

/// Validate a hostname.
///
/// Accepts an optional single trailing dot. Each dot-separated label must be
/// 1-63 characters of ASCII alphanumerics and hyphens with no leading or
/// trailing hyphen, and the whole name must be at most 255 characters.
#[must_use]
pub fn validate_name(name: &str) -> bool {
    if name.is_empty() || name.len() > 255 {
        return false;
    }
    let name = name.strip_suffix('.').unwrap_or(name);
    !name.is_empty() && name.split('.').all(is_valid_label)
}

fn is_valid_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    if bytes.is_empty() || bytes.len() > 63 {
        return false;
    }
    if bytes[0] == b'-' || bytes[bytes.len() - 1] == b'-' {
        return false;
    }
    bytes
        .iter()
        .all(|b| b.is_ascii_alphanumeric() || *b == b'-')
}

/// Normalize a record name to the provider's canonical trailing-dot form.
#[must_use]
pub fn canonical_name(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{name}.")
    }
}

/// Validate a hostname, returning the structured error on failure.
pub(crate) fn require_hostname(name: &str) -> Result<(), ValidationError> {
    if validate_name(name) {
        Ok(())
    } else {
        Err(ValidationError::InvalidHostname {
            name: name.to_string(),
        })
    }
}

/// Validate a TTL against the provider's accepted range.
pub(crate) fn require_ttl_in_range(ttl: i64) -> Result<(), ValidationError> {
    if (0..=MAX_RECORD_TTL_SECS).contains(&ttl) {
        Ok(())
    } else {
        Err(ValidationError::TtlOutOfRange { ttl })
    }
}

/// Check a record set's type tag against the expected one.
pub(crate) fn expect_record_type(
    record_set: &ResourceRecordSet,
    expected: &'static str,
) -> Result<(), DecodeError> {
    if record_set.record_type == expected {
        Ok(())
    } else {
        Err(DecodeError::TypeMismatch {
            name: record_set.name.clone(),
            expected,
            found: record_set.record_type.clone(),
        })
    }
}

/// Extract the TTL from a record set, failing if absent.
pub(crate) fn require_ttl(record_set: &ResourceRecordSet) -> Result<i64, DecodeError> {
    record_set.ttl.ok_or_else(|| DecodeError::MissingField {
        name: record_set.name.clone(),
        field: "TTL",
    })
}

/// Extract the value entries from a record set, failing if absent or empty.
pub(crate) fn require_resource_records(
    record_set: &ResourceRecordSet,
) -> Result<&[ResourceRecord], DecodeError> {
    match record_set.resource_records.as_deref() {
        Some(records) if !records.is_empty() => Ok(records),
        _ => Err(DecodeError::MissingField {
            name: record_set.name.clone(),
            field: "ResourceRecords",
        }),
    }
}
