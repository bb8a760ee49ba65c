// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! TXT record model.

use super::{
    canonical_name, expect_record_type, require_hostname, require_resource_records, require_ttl,
    require_ttl_in_range, RecordUpdate, Route53Record, DEFAULT_RECORD_TTL_SECS,
};
use crate::dns_errors::{DecodeError, ValidationError};
use crate::route53::types::{ResourceRecord, ResourceRecordSet};

/// Longest TXT value Route53 accepts in a single string.
pub const MAX_TXT_VALUE_LEN: usize = 255;

/// A TXT record set: one name holding a single text string.
///
/// Values are trimmed of surrounding whitespace before the length check and
/// stored trimmed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxtRecordSet {
    hosted_zone_id: String,
    fqdn: String,
    ttl: i64,
    value: String,
}

impl TxtRecordSet {
    /// Build a validated TXT record set.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a valid hostname, the TTL is out
    /// of range, or the trimmed value exceeds 255 characters.
    pub fn new(
        hosted_zone_id: impl Into<String>,
        name: &str,
        ttl: Option<i64>,
        value: &str,
    ) -> Result<Self, ValidationError> {
        require_hostname(name)?;
        let ttl = ttl.unwrap_or(DEFAULT_RECORD_TTL_SECS);
        require_ttl_in_range(ttl)?;
        let value = trim_txt_value(value)?;
        Ok(Self {
            hosted_zone_id: hosted_zone_id.into(),
            fqdn: canonical_name(name),
            ttl,
            value,
        })
    }

    /// The trimmed text value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Route53Record for TxtRecordSet {
    const RECORD_TYPE: &'static str = "TXT";

    type Update = TxtRecordUpdate;

    fn hosted_zone_id(&self) -> &str {
        &self.hosted_zone_id
    }

    fn fqdn(&self) -> &str {
        &self.fqdn
    }

    fn ttl(&self) -> i64 {
        self.ttl
    }

    fn resource_records(&self) -> Vec<ResourceRecord> {
        vec![ResourceRecord::new(self.value.clone())]
    }

    fn from_record_set(
        hosted_zone_id: &str,
        record_set: &ResourceRecordSet,
    ) -> Result<Self, DecodeError> {
        expect_record_type(record_set, Self::RECORD_TYPE)?;
        let ttl = require_ttl(record_set)?;
        let text = &require_resource_records(record_set)?[0].value;
        Ok(Self::new(hosted_zone_id, &record_set.name, Some(ttl), text)?)
    }
}

/// Partial update for a TXT record: only supplied fields are changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TxtRecordUpdate {
    /// New TTL, if it should change.
    pub ttl: Option<i64>,
    /// New text value (stored trimmed), if it should change.
    pub value: Option<String>,
}

impl TxtRecordUpdate {
    /// Build a validated partial update.
    ///
    /// A supplied value is trimmed before the length check, matching record
    /// construction.
    ///
    /// # Errors
    ///
    /// Returns an error if a supplied TTL is out of range or a supplied
    /// value exceeds 255 characters after trimming.
    pub fn new(ttl: Option<i64>, value: Option<&str>) -> Result<Self, ValidationError> {
        if let Some(ttl) = ttl {
            require_ttl_in_range(ttl)?;
        }
        let value = value.map(trim_txt_value).transpose()?;
        Ok(Self { ttl, value })
    }
}

impl RecordUpdate for TxtRecordUpdate {
    fn ttl(&self) -> Option<i64> {
        self.ttl
    }

    fn resource_records(&self) -> Option<Vec<ResourceRecord>> {
        self.value
            .as_ref()
            .map(|text| vec![ResourceRecord::new(text.clone())])
    }
}

fn trim_txt_value(value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.len() > MAX_TXT_VALUE_LEN {
        return Err(ValidationError::TxtValueTooLong {
            len: trimmed.len(),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "txt_tests.rs"]
mod txt_tests;
