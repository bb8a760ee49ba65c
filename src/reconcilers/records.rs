// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! DNS record reconciliation logic.
//!
//! This module binds the record custom resources to the CRUD engine. Each
//! per-kind reconciler decodes the resource spec into a typed record, runs
//! the shared reconciliation driver, and reports the outcome through the
//! status subresource. The driver owns the lifecycle:
//!
//! 1. Decode the spec; a validation failure stops before any provider call.
//! 2. On deletion, remove the provider-side record and drop the finalizer.
//! 3. Otherwise ensure the finalizer, then converge: create the record if
//!    absent, upsert the desired fields if present.
//! 4. Write the converged record into the status, or a failure condition
//!    with the error detail.
//!
//! This layer performs no direct provider calls; everything goes through
//! the engine.

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use k8s_openapi::api::core::v1::{Event, ObjectReference};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use kube::{
    api::{Patch, PatchParams, PostParams},
    client::Client,
    Api, Resource, ResourceExt,
};
use serde_json::json;
use tracing::{debug, error, info, warn};

use super::finalizers::{ensure_finalizer, remove_finalizer};
use crate::crd::{
    ARecord, ARecordSpec, CNAMERecord, CNAMERecordSpec, Condition, ObservedRecord, RecordStatus,
    TXTRecord, TXTRecordSpec,
};
use crate::dns_errors::{CrudError, ValidationError};
use crate::metrics;
use crate::route53::records::{
    ARecordSet, ARecordUpdate, CnameRecordSet, CnameRecordUpdate, Route53Record, TxtRecordSet,
    TxtRecordUpdate,
};
use crate::route53::{RecordCrud, Route53Api};

/// Finalizer held on `ARecord` resources until provider cleanup completes.
pub const A_RECORD_FINALIZER: &str = "arecord.route53.firestoned.io/finalizer";

/// Finalizer held on `CNAMERecord` resources until provider cleanup completes.
pub const CNAME_RECORD_FINALIZER: &str = "cnamerecord.route53.firestoned.io/finalizer";

/// Finalizer held on `TXTRecord` resources until provider cleanup completes.
pub const TXT_RECORD_FINALIZER: &str = "txtrecord.route53.firestoned.io/finalizer";

/// Reconciles an `ARecord` resource against its hosted zone.
///
/// # Arguments
///
/// * `client` - Kubernetes API client
/// * `record` - The `ARecord` resource to reconcile
/// * `route53` - Shared Route53 client handle
///
/// # Example
///
/// ```rust,no_run
/// use route53_operator::reconcilers::reconcile_a_record;
/// use route53_operator::crd::ARecord;
/// use route53_operator::config::Config;
/// use route53_operator::route53::{Route53Api, Route53Client};
/// use kube::Client;
/// use std::sync::Arc;
///
/// async fn handle_a_record(record: ARecord) -> anyhow::Result<()> {
///     let client = Client::try_default().await?;
///     let route53: Arc<dyn Route53Api> =
///         Arc::new(Route53Client::new(&Config::from_env()?)?);
///     reconcile_a_record(client, record, &route53).await?;
///     Ok(())
/// }
/// ```
///
/// # Errors
///
/// Returns an error if the spec is invalid, a provider operation fails, or
/// a Kubernetes API operation fails.
pub async fn reconcile_a_record(
    client: Client,
    record: ARecord,
    route53: &Arc<dyn Route53Api>,
) -> Result<()> {
    let namespace = record.namespace().unwrap_or_default();
    let name = record.name_any();

    info!("Reconciling ARecord: {}/{}", namespace, name);
    debug!(
        namespace = %namespace,
        name = %name,
        generation = ?record.metadata.generation,
        hosted_zone_id = %record.spec.hosted_zone_id,
        record_name = %record.spec.name,
        ttl = ?record.spec.ttl,
        "ARecord configuration"
    );

    let decoded = a_record_from_spec(&record.spec).and_then(|desired| {
        let update = ARecordUpdate::new(Some(desired.ttl()), Some(desired.value().to_vec()))?;
        Ok((desired, update))
    });

    run_record_reconciliation(&client, &record, A_RECORD_FINALIZER, route53.clone(), decoded).await
}

/// Reconciles a `CNAMERecord` resource against its hosted zone.
///
/// # Errors
///
/// Returns an error if the spec is invalid, a provider operation fails, or
/// a Kubernetes API operation fails.
pub async fn reconcile_cname_record(
    client: Client,
    record: CNAMERecord,
    route53: &Arc<dyn Route53Api>,
) -> Result<()> {
    let namespace = record.namespace().unwrap_or_default();
    let name = record.name_any();

    info!("Reconciling CNAMERecord: {}/{}", namespace, name);

    let decoded = cname_record_from_spec(&record.spec).and_then(|desired| {
        let update =
            CnameRecordUpdate::new(Some(desired.ttl()), Some(desired.value().to_string()))?;
        Ok((desired, update))
    });

    run_record_reconciliation(
        &client,
        &record,
        CNAME_RECORD_FINALIZER,
        route53.clone(),
        decoded,
    )
    .await
}

/// Reconciles a `TXTRecord` resource against its hosted zone.
///
/// # Errors
///
/// Returns an error if the spec is invalid, a provider operation fails, or
/// a Kubernetes API operation fails.
pub async fn reconcile_txt_record(
    client: Client,
    record: TXTRecord,
    route53: &Arc<dyn Route53Api>,
) -> Result<()> {
    let namespace = record.namespace().unwrap_or_default();
    let name = record.name_any();

    info!("Reconciling TXTRecord: {}/{}", namespace, name);

    let decoded = txt_record_from_spec(&record.spec).and_then(|desired| {
        let update = TxtRecordUpdate::new(Some(desired.ttl()), Some(desired.value()))?;
        Ok((desired, update))
    });

    run_record_reconciliation(
        &client,
        &record,
        TXT_RECORD_FINALIZER,
        route53.clone(),
        decoded,
    )
    .await
}

/// Decode an `ARecord` spec into the typed record model.
pub(crate) fn a_record_from_spec(spec: &ARecordSpec) -> Result<ARecordSet, ValidationError> {
    ARecordSet::parse(&spec.hosted_zone_id, &spec.name, spec.ttl, &spec.value)
}

/// Decode a `CNAMERecord` spec into the typed record model.
pub(crate) fn cname_record_from_spec(
    spec: &CNAMERecordSpec,
) -> Result<CnameRecordSet, ValidationError> {
    CnameRecordSet::new(
        &spec.hosted_zone_id,
        &spec.name,
        spec.ttl,
        spec.value.clone(),
    )
}

/// Decode a `TXTRecord` spec into the typed record model.
pub(crate) fn txt_record_from_spec(spec: &TXTRecordSpec) -> Result<TxtRecordSet, ValidationError> {
    TxtRecordSet::new(&spec.hosted_zone_id, &spec.name, spec.ttl, &spec.value)
}

/// Render a converged record into the status shape.
pub(crate) fn observed_record<R: Route53Record>(record: &R) -> ObservedRecord {
    ObservedRecord {
        hosted_zone_id: record.hosted_zone_id().to_string(),
        name: record.fqdn().to_string(),
        record_type: R::RECORD_TYPE.to_string(),
        ttl: record.ttl(),
        values: record
            .resource_records()
            .into_iter()
            .map(|r| r.value)
            .collect(),
    }
}

/// Shared reconciliation driver for all record kinds.
///
/// `decoded` carries the typed desired record together with the full-field
/// update used when the record already exists. A decode failure is reported
/// as a failed reconciliation before any provider call (or waved through
/// during deletion, where an undecodable spec has nothing to clean up).
async fn run_record_reconciliation<K, R>(
    client: &Client,
    resource: &K,
    finalizer: &str,
    route53: Arc<dyn Route53Api>,
    decoded: Result<(R, R::Update), ValidationError>,
) -> Result<()>
where
    K: Resource<DynamicType = (), Scope = k8s_openapi::NamespaceResourceScope>
        + ResourceExt
        + Clone
        + std::fmt::Debug
        + serde::Serialize
        + for<'de> serde::Deserialize<'de>,
    R: Route53Record,
{
    let namespace = resource.namespace().unwrap_or_default();
    let name = resource.name_any();
    let kind = K::kind(&()).to_string();
    let deleting = resource.meta().deletion_timestamp.is_some();

    let (desired, full_update) = match decoded {
        Ok(pair) => pair,
        Err(err) => {
            if deleting {
                warn!(
                    "{}/{} {} has an invalid spec during deletion, nothing to clean up: {}",
                    namespace, name, kind, err
                );
                remove_finalizer(client, resource, finalizer).await?;
                return Ok(());
            }
            let message = err.to_string();
            error!("Invalid {} spec {}/{}: {}", kind, namespace, name, message);
            metrics::record_error(&kind, "validation_error");
            update_record_status(
                client,
                resource,
                "Ready",
                "False",
                "ValidationFailed",
                &message,
                None,
            )
            .await?;
            return Err(anyhow!(message));
        }
    };

    let crud: RecordCrud<R> = RecordCrud::new(route53);

    if deleting {
        return delete_record(client, resource, finalizer, &crud, &desired).await;
    }

    ensure_finalizer(client, resource, finalizer).await?;

    let converged = match crud.get(desired.hosted_zone_id(), desired.fqdn()).await {
        Err(CrudError::NotFound { .. }) => {
            debug!(
                "{} {} absent from hosted zone {}, creating",
                kind,
                desired.fqdn(),
                desired.hosted_zone_id()
            );
            let created = crud.create(&desired).await;
            if created.is_ok() {
                metrics::record_resource_created(&kind);
            }
            created
        }
        Ok(current) => {
            let updated = crud.update(&current, &full_update).await;
            if updated.is_ok() {
                metrics::record_resource_updated(&kind);
            }
            updated
        }
        Err(err) => Err(err),
    };

    match converged {
        Ok(record) => {
            let message = format!(
                "{} {} confirmed in hosted zone {}",
                kind,
                record.fqdn(),
                record.hosted_zone_id()
            );
            update_record_status(
                client,
                resource,
                "Ready",
                "True",
                "ReconcileSucceeded",
                &message,
                Some(observed_record(&record)),
            )
            .await?;
            Ok(())
        }
        Err(err) => {
            let reason = err.status_reason();
            let message = err.to_string();
            error!(
                "Failed to converge {} {}/{}: {}",
                kind, namespace, name, message
            );
            metrics::record_error(&kind, "provider_error");
            update_record_status(client, resource, "Ready", "False", reason, &message, None)
                .await?;
            Err(anyhow!(message))
        }
    }
}

/// Remove the provider-side record for a resource being deleted, then drop
/// the finalizer.
///
/// The record's current provider state is read first: the DELETE change must
/// carry the exact current value set. A record already absent from the zone
/// counts as cleaned up.
async fn delete_record<K, R>(
    client: &Client,
    resource: &K,
    finalizer: &str,
    crud: &RecordCrud<R>,
    desired: &R,
) -> Result<()>
where
    K: Resource<DynamicType = (), Scope = k8s_openapi::NamespaceResourceScope>
        + ResourceExt
        + Clone
        + std::fmt::Debug
        + serde::Serialize
        + for<'de> serde::Deserialize<'de>,
    R: Route53Record,
{
    let namespace = resource.namespace().unwrap_or_default();
    let name = resource.name_any();
    let kind = K::kind(&()).to_string();

    info!(
        "Deleting {} {}/{} ({} in hosted zone {})",
        kind,
        namespace,
        name,
        desired.fqdn(),
        desired.hosted_zone_id()
    );

    match crud.get(desired.hosted_zone_id(), desired.fqdn()).await {
        Ok(current) => {
            if let Err(err) = crud.remove(&current).await {
                let message = err.to_string();
                error!(
                    "Failed to delete {} {} from hosted zone {}: {}",
                    kind,
                    desired.fqdn(),
                    desired.hosted_zone_id(),
                    message
                );
                update_record_status(
                    client,
                    resource,
                    "Ready",
                    "False",
                    err.status_reason(),
                    &message,
                    None,
                )
                .await?;
                // Keep the finalizer; the host retries deletion later
                return Err(anyhow!(message));
            }
            metrics::record_resource_deleted(&kind);
        }
        Err(CrudError::NotFound { .. }) => {
            debug!(
                "{} {} already absent from hosted zone {}",
                kind,
                desired.fqdn(),
                desired.hosted_zone_id()
            );
        }
        Err(err) => {
            let message = err.to_string();
            update_record_status(
                client,
                resource,
                "Ready",
                "False",
                err.status_reason(),
                &message,
                None,
            )
            .await?;
            return Err(anyhow!(message));
        }
    }

    remove_finalizer(client, resource, finalizer).await?;
    Ok(())
}

/// Create a Kubernetes Event for a DNS record.
///
/// # Arguments
///
/// * `client` - Kubernetes API client
/// * `record` - The DNS record resource
/// * `event_type` - Type of event ("Normal" or "Warning")
/// * `reason` - Short reason for the event
/// * `message` - Human-readable message describing the event
async fn create_event<T>(
    client: &Client,
    record: &T,
    event_type: &str,
    reason: &str,
    message: &str,
) -> Result<()>
where
    T: Resource<DynamicType = ()> + ResourceExt,
{
    let namespace = record.namespace().unwrap_or_default();
    let name = record.name_any();
    let event_api: Api<Event> = Api::namespaced(client.clone(), &namespace);

    let now = Time(k8s_openapi::jiff::Timestamp::now());
    let event = Event {
        metadata: k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta {
            generate_name: Some(format!("{name}-")),
            namespace: Some(namespace.clone()),
            ..Default::default()
        },
        involved_object: ObjectReference {
            api_version: Some(T::api_version(&()).to_string()),
            kind: Some(T::kind(&()).to_string()),
            name: Some(name.clone()),
            namespace: Some(namespace),
            uid: record.meta().uid.clone(),
            ..Default::default()
        },
        reason: Some(reason.to_string()),
        message: Some(message.to_string()),
        type_: Some(event_type.to_string()),
        first_timestamp: Some(now.clone()),
        last_timestamp: Some(now),
        count: Some(1),
        ..Default::default()
    };

    match event_api.create(&PostParams::default(), &event).await {
        Ok(_) => Ok(()),
        Err(e) => {
            warn!("Failed to create event for {}: {}", name, e);
            Ok(()) // Don't fail reconciliation if event creation fails
        }
    }
}

/// Updates the status of a DNS record resource.
///
/// Updates the status subresource with a `Ready` condition following
/// Kubernetes conventions and, on success, the record state confirmed
/// against the provider. Also creates a Kubernetes Event for visibility.
///
/// # Arguments
///
/// * `client` - Kubernetes API client
/// * `record` - The DNS record resource to update
/// * `condition_type` - Type of condition (e.g., "Ready")
/// * `status` - Status value (e.g., "True", "False")
/// * `reason` - Short reason code (e.g., "`ReconcileSucceeded`", "`RecordNotFound`")
/// * `message` - Human-readable message describing the status
/// * `observed` - The converged record on success, `None` on failure
///
/// # Errors
///
/// Returns an error if the status update fails.
async fn update_record_status<T>(
    client: &Client,
    record: &T,
    condition_type: &str,
    status: &str,
    reason: &str,
    message: &str,
    observed: Option<ObservedRecord>,
) -> Result<()>
where
    T: Resource<DynamicType = (), Scope = k8s_openapi::NamespaceResourceScope>
        + ResourceExt
        + Clone
        + std::fmt::Debug
        + serde::Serialize
        + for<'de> serde::Deserialize<'de>,
{
    let namespace = record.namespace().unwrap_or_default();
    let name = record.name_any();
    let api: Api<T> = Api::namespaced(client.clone(), &namespace);

    // Fetch current resource to check the existing status
    let current = api
        .get(&name)
        .await
        .context("Failed to fetch current resource")?;
    let current_json = serde_json::to_value(&current)?;
    let current_status = current_json.get("status");

    // Skip the patch when generation, condition, and observed record are all
    // unchanged, to avoid feeding the controller its own status updates
    let observed_json = observed.as_ref().map(serde_json::to_value).transpose()?;
    let needs_update = match current_status {
        Some(current_status) => {
            let generation_matches = current_status.get("observedGeneration")
                == Some(&json!(record.meta().generation));
            let condition_matches = current_status
                .get("conditions")
                .and_then(|c| c.as_array())
                .and_then(|c| c.first())
                .is_some_and(|cond| {
                    cond.get("status").and_then(|s| s.as_str()) == Some(status)
                        && cond.get("reason").and_then(|r| r.as_str()) == Some(reason)
                });
            let record_matches = current_status.get("record") == observed_json.as_ref()
                || observed_json.is_none();
            !(generation_matches && condition_matches && record_matches)
        }
        None => true,
    };

    if !needs_update {
        return Ok(());
    }

    // Preserve the transition timestamp when the condition status is stable
    let last_transition_time = current_status
        .and_then(|s| s.get("conditions"))
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .and_then(|cond| {
            if cond.get("status").and_then(|s| s.as_str()) == Some(status) {
                cond.get("lastTransitionTime")
                    .and_then(|t| t.as_str())
                    .map(ToString::to_string)
            } else {
                None
            }
        })
        .unwrap_or_else(|| Utc::now().to_rfc3339());

    let condition = Condition {
        r#type: condition_type.to_string(),
        status: status.to_string(),
        reason: Some(reason.to_string()),
        message: Some(message.to_string()),
        last_transition_time: Some(last_transition_time),
    };

    let record_status = RecordStatus {
        conditions: vec![condition],
        observed_generation: record.meta().generation,
        record: observed,
    };

    let status_patch = json!({
        "status": record_status
    });

    api.patch_status(&name, &PatchParams::default(), &Patch::Merge(&status_patch))
        .await
        .context("Failed to update record status")?;

    info!(
        "Updated status for {}/{}: {} = {}",
        namespace, name, condition_type, status
    );

    // Create event for visibility
    let event_type = if status == "True" {
        "Normal"
    } else {
        "Warning"
    };
    create_event(client, record, event_type, reason, message).await?;

    Ok(())
}

#[cfg(test)]
#[path = "records_tests.rs"]
mod records_tests;
