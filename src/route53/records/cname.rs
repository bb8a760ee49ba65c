// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! CNAME record model.

use super::{
    canonical_name, expect_record_type, require_hostname, require_resource_records, require_ttl,
    require_ttl_in_range, RecordUpdate, Route53Record, DEFAULT_RECORD_TTL_SECS,
};
use crate::dns_errors::{DecodeError, ValidationError};
use crate::route53::types::{ResourceRecord, ResourceRecordSet};

/// A CNAME record set: an alias from one name to a single target hostname.
///
/// The target is validated as a hostname but kept in the caller's spelling;
/// only that it resolves syntactically is checked, not that it exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CnameRecordSet {
    hosted_zone_id: String,
    fqdn: String,
    ttl: i64,
    value: String,
}

impl CnameRecordSet {
    /// Build a validated CNAME record set.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or the target is not a valid hostname,
    /// or the TTL is out of range.
    pub fn new(
        hosted_zone_id: impl Into<String>,
        name: &str,
        ttl: Option<i64>,
        value: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        require_hostname(name)?;
        let value = value.into();
        require_hostname(&value)?;
        let ttl = ttl.unwrap_or(DEFAULT_RECORD_TTL_SECS);
        require_ttl_in_range(ttl)?;
        Ok(Self {
            hosted_zone_id: hosted_zone_id.into(),
            fqdn: canonical_name(name),
            ttl,
            value,
        })
    }

    /// The target hostname.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Route53Record for CnameRecordSet {
    const RECORD_TYPE: &'static str = "CNAME";

    type Update = CnameRecordUpdate;

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
        let target = require_resource_records(record_set)?[0].value.as_str();
        Ok(Self::new(
            hosted_zone_id,
            &record_set.name,
            Some(ttl),
            target,
        )?)
    }
}

/// Partial update for a CNAME record: only supplied fields are changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CnameRecordUpdate {
    /// New TTL, if it should change.
    pub ttl: Option<i64>,
    /// New target hostname, if it should change.
    pub value: Option<String>,
}

impl CnameRecordUpdate {
    /// Build a validated partial update.
    ///
    /// # Errors
    ///
    /// Returns an error if a supplied TTL is out of range or a supplied
    /// target is not a valid hostname.
    pub fn new(ttl: Option<i64>, value: Option<String>) -> Result<Self, ValidationError> {
        if let Some(ttl) = ttl {
            require_ttl_in_range(ttl)?;
        }
        if let Some(target) = &value {
            require_hostname(target)?;
        }
        Ok(Self { ttl, value })
    }
}

impl RecordUpdate for CnameRecordUpdate {
    fn ttl(&self) -> Option<i64> {
        self.ttl
    }

    fn resource_records(&self) -> Option<Vec<ResourceRecord>> {
        self.value
            .as_ref()
            .map(|target| vec![ResourceRecord::new(target.clone())])
    }
}

#[cfg(test)]
#[path = "cname_tests.rs"]
mod cname_tests;
