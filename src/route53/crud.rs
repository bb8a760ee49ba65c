// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Generic record CRUD engine.
//!
//! [`RecordCrud`] implements get/create/update/remove once, parameterized
//! over the [`Route53Record`] capability trait; the per-kind engines are
//! thin type aliases. The engine owns all provider interaction for a record
//! type:
//!
//! - Lookups use the list-starting-at-name idiom with an exact
//!   (name, type) match check; any mismatch is
//!   [`CrudError::NotFound`], never a generic error.
//! - Creates and updates re-read the record after the change so callers
//!   receive the converged provider state.
//! - Every change is one atomic single-change batch, so one request maps to
//!   one outcome and one error.
//!
//! The engine adds no retry logic; transient transport failures surface to
//! the reconciler, which requeues.

use std::marker::PhantomData;
use std::sync::Arc;

use tracing::debug;

use super::client::Route53Api;
use super::records::{canonical_name, RecordUpdate, Route53Record};
use super::types::{ChangeAction, ChangeInfo, ResourceRecordSet};
use crate::dns_errors::CrudError;

/// Lifecycle operations for one record type against a hosted zone.
///
/// Holds a shared handle to the provider client; construct one per record
/// type from the same `Arc<dyn Route53Api>`.
pub struct RecordCrud<R: Route53Record> {
    client: Arc<dyn Route53Api>,
    _record: PhantomData<fn() -> R>,
}

/// Engine for A records.
pub type ACrud = RecordCrud<super::records::ARecordSet>;

/// Engine for CNAME records.
pub type CnameCrud = RecordCrud<super::records::CnameRecordSet>;

/// Engine for TXT records.
pub type TxtCrud = RecordCrud<super::records::TxtRecordSet>;

impl<R: Route53Record> RecordCrud<R> {
    /// Build an engine over an injected client handle.
    #[must_use]
    pub fn new(client: Arc<dyn Route53Api>) -> Self {
        Self {
            client,
            _record: PhantomData,
        }
    }

    /// Look up the record at `name` in a hosted zone.
    ///
    /// Lists record sets starting at the canonical form of `name`, filtered
    /// to this record type, limit 1. The listing idiom returns the
    /// lexicographically next record set on a miss, so the single returned
    /// entry must match the queried name and type exactly; an empty result
    /// or any mismatch is `NotFound`.
    ///
    /// # Errors
    ///
    /// Returns [`CrudError::NotFound`] when no exact match exists, a decode
    /// error if the matching record set is malformed, or the transport
    /// failure unchanged.
    pub async fn get(&self, hosted_zone_id: &str, name: &str) -> Result<R, CrudError> {
        let fqdn = canonical_name(name);
        let record_sets = self
            .client
            .list_record_sets(hosted_zone_id, &fqdn, R::RECORD_TYPE, 1)
            .await?;

        let not_found = || CrudError::NotFound {
            hosted_zone_id: hosted_zone_id.to_string(),
            name: fqdn.clone(),
            record_type: R::RECORD_TYPE,
        };

        let Some(first) = record_sets.first() else {
            return Err(not_found());
        };
        if canonical_name(&first.name) != fqdn || first.record_type != R::RECORD_TYPE {
            return Err(not_found());
        }

        Ok(R::from_record_set(hosted_zone_id, first)?)
    }

    /// Create a record, then re-read and return the converged value.
    ///
    /// # Errors
    ///
    /// Returns [`CrudError::InvalidChange`] if the provider rejects the
    /// change (for example, a record already exists at this name and type),
    /// or any failure from the verification read.
    pub async fn create(&self, record: &R) -> Result<R, CrudError> {
        debug!(
            name = record.fqdn(),
            record_type = R::RECORD_TYPE,
            hosted_zone_id = record.hosted_zone_id(),
            "Creating record"
        );

        let comment = format!(
            "route53-operator creating {} {} in {}",
            record.fqdn(),
            R::RECORD_TYPE,
            record.hosted_zone_id()
        );
        self.change_record_set(
            record.hosted_zone_id(),
            record.fqdn(),
            ChangeAction::Create,
            record.to_record_set(),
            &comment,
        )
        .await?;

        self.get(record.hosted_zone_id(), record.fqdn()).await
    }

    /// Upsert the mutable fields present on `update` into the record,
    /// then re-read and return the converged value.
    ///
    /// The request body is built field by field: TTL and values are
    /// included only if present on the partial update; name and type always
    /// come from `current`. Upserts are last-write-wins; no precondition is
    /// checked against the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`CrudError::InvalidChange`] if the provider rejects the
    /// change, or any failure from the verification read.
    pub async fn update(&self, current: &R, update: &R::Update) -> Result<R, CrudError> {
        debug!(
            name = current.fqdn(),
            record_type = R::RECORD_TYPE,
            hosted_zone_id = current.hosted_zone_id(),
            "Upserting record"
        );

        let record_set = ResourceRecordSet {
            name: current.fqdn().to_string(),
            record_type: R::RECORD_TYPE.to_string(),
            ttl: update.ttl(),
            resource_records: update.resource_records(),
        };

        let comment = format!(
            "route53-operator upserting {} {} in {}",
            current.fqdn(),
            R::RECORD_TYPE,
            current.hosted_zone_id()
        );
        self.change_record_set(
            current.hosted_zone_id(),
            current.fqdn(),
            ChangeAction::Upsert,
            record_set,
            &comment,
        )
        .await?;

        self.get(current.hosted_zone_id(), current.fqdn()).await
    }

    /// Delete a record.
    ///
    /// The DELETE change carries the record's full current representation;
    /// the provider requires the exact current value set to delete safely,
    /// so deleting by name and type alone would risk removing a different
    /// value set than intended. No re-read follows.
    ///
    /// # Errors
    ///
    /// Returns [`CrudError::InvalidChange`] if the provider rejects the
    /// change (for example, the submitted values no longer match).
    pub async fn remove(&self, record: &R) -> Result<(), CrudError> {
        debug!(
            name = record.fqdn(),
            record_type = R::RECORD_TYPE,
            hosted_zone_id = record.hosted_zone_id(),
            "Deleting record"
        );

        let comment = format!(
            "route53-operator deleting {} {} in {}",
            record.fqdn(),
            R::RECORD_TYPE,
            record.hosted_zone_id()
        );
        self.change_record_set(
            record.hosted_zone_id(),
            record.fqdn(),
            ChangeAction::Delete,
            record.to_record_set(),
            &comment,
        )
        .await?;

        Ok(())
    }

    /// Submit one change, re-tagging the provider's client-error class into
    /// [`CrudError::InvalidChange`] at this boundary.
    async fn change_record_set(
        &self,
        hosted_zone_id: &str,
        name: &str,
        action: ChangeAction,
        record_set: ResourceRecordSet,
        comment: &str,
    ) -> Result<ChangeInfo, CrudError> {
        match self
            .client
            .change_record_sets(hosted_zone_id, action, record_set, comment)
            .await
        {
            Ok(change_info) => {
                debug!(change_id = %change_info.id, status = ?change_info.status, "Change accepted");
                Ok(change_info)
            }
            Err(err) if err.is_client_error() => Err(CrudError::InvalidChange {
                hosted_zone_id: hosted_zone_id.to_string(),
                name: name.to_string(),
                action: action.as_str(),
                reason: err.to_string(),
            }),
            Err(err) => Err(CrudError::Provider(err)),
        }
    }
}

#[cfg(test)]
#[path = "crud_tests.rs"]
mod crud_tests;
