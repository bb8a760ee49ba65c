// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! A record model (IPv4 addresses).

use std::net::Ipv4Addr;

use super::{
    canonical_name, expect_record_type, require_hostname, require_resource_records, require_ttl,
    require_ttl_in_range, RecordUpdate, Route53Record, DEFAULT_RECORD_TTL_SECS,
};
use crate::dns_errors::{DecodeError, ValidationError};
use crate::route53::types::{ResourceRecord, ResourceRecordSet};

/// An A record set: one name mapped to an ordered list of IPv4 addresses.
///
/// The address ordering is preserved exactly as supplied; round-robin
/// behavior and idempotent diffing both depend on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ARecordSet {
    hosted_zone_id: String,
    fqdn: String,
    ttl: i64,
    value: Vec<Ipv4Addr>,
}

impl ARecordSet {
    /// Build a validated A record set.
    ///
    /// The name is validated as a hostname and normalized to trailing-dot
    /// form. A `None` TTL takes the default of 60 seconds.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a valid hostname or the TTL is
    /// out of range.
    pub fn new(
        hosted_zone_id: impl Into<String>,
        name: &str,
        ttl: Option<i64>,
        value: Vec<Ipv4Addr>,
    ) -> Result<Self, ValidationError> {
        require_hostname(name)?;
        let ttl = ttl.unwrap_or(DEFAULT_RECORD_TTL_SECS);
        require_ttl_in_range(ttl)?;
        Ok(Self {
            hosted_zone_id: hosted_zone_id.into(),
            fqdn: canonical_name(name),
            ttl,
            value,
        })
    }

    /// Build a validated A record set from string addresses.
    ///
    /// # Errors
    ///
    /// Returns an error if any address is not a valid IPv4 address, in
    /// addition to the [`ARecordSet::new`] validations.
    pub fn parse(
        hosted_zone_id: impl Into<String>,
        name: &str,
        ttl: Option<i64>,
        values: &[String],
    ) -> Result<Self, ValidationError> {
        let addresses = values
            .iter()
            .map(|value| parse_ipv4(value))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(hosted_zone_id, name, ttl, addresses)
    }

    /// The IPv4 addresses, in submission order.
    #[must_use]
    pub fn value(&self) -> &[Ipv4Addr] {
        &self.value
    }
}

impl Route53Record for ARecordSet {
    const RECORD_TYPE: &'static str = "A";

    type Update = ARecordUpdate;

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
        self.value
            .iter()
            .map(|address| ResourceRecord::new(address.to_string()))
            .collect()
    }

    fn from_record_set(
        hosted_zone_id: &str,
        record_set: &ResourceRecordSet,
    ) -> Result<Self, DecodeError> {
        expect_record_type(record_set, Self::RECORD_TYPE)?;
        let ttl = require_ttl(record_set)?;
        let addresses = require_resource_records(record_set)?
            .iter()
            .map(|record| parse_ipv4(&record.value))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(
            hosted_zone_id,
            &record_set.name,
            Some(ttl),
            addresses,
        )?)
    }
}

/// Partial update for an A record: only supplied fields are changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ARecordUpdate {
    /// New TTL, if it should change.
    pub ttl: Option<i64>,
    /// New address list, if it should change.
    pub value: Option<Vec<Ipv4Addr>>,
}

impl ARecordUpdate {
    /// Build a validated partial update.
    ///
    /// # Errors
    ///
    /// Returns an error if a supplied TTL is out of range.
    pub fn new(ttl: Option<i64>, value: Option<Vec<Ipv4Addr>>) -> Result<Self, ValidationError> {
        if let Some(ttl) = ttl {
            require_ttl_in_range(ttl)?;
        }
        Ok(Self { ttl, value })
    }
}

impl RecordUpdate for ARecordUpdate {
    fn ttl(&self) -> Option<i64> {
        self.ttl
    }

    fn resource_records(&self) -> Option<Vec<ResourceRecord>> {
        self.value.as_ref().map(|addresses| {
            addresses
                .iter()
                .map(|address| ResourceRecord::new(address.to_string()))
                .collect()
        })
    }
}

fn parse_ipv4(value: &str) -> Result<Ipv4Addr, ValidationError> {
    value
        .parse()
        .map_err(|_| ValidationError::InvalidIpv4Address {
            value: value.to_string(),
        })
}

#[cfg(test)]
#[path = "a_tests.rs"]
mod a_tests;
