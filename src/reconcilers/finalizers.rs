// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Generic finalizer management for Kubernetes resources.
//!
//! This module provides reusable functions for adding and removing
//! finalizers on the record custom resources. A finalizer keeps a resource
//! alive until the provider-side record has been cleaned up; the record
//! reconcilers perform the cleanup and then remove the finalizer.

use anyhow::Result;
use kube::api::{Patch, PatchParams};
use kube::core::NamespaceResourceScope;
use kube::{Api, Client, Resource, ResourceExt};
use serde_json::json;
use tracing::info;

/// Add a finalizer to a resource if not already present.
///
/// This function checks if the specified finalizer is present on the
/// resource, and adds it if missing. The operation is idempotent - calling
/// it multiple times has no effect if the finalizer is already present.
///
/// # Arguments
///
/// * `client` - Kubernetes client for accessing the API
/// * `resource` - The resource to add the finalizer to
/// * `finalizer` - The finalizer string to add
///
/// # Errors
///
/// Returns an error if the API patch operation fails.
pub async fn ensure_finalizer<T>(client: &Client, resource: &T, finalizer: &str) -> Result<()>
where
    T: Resource<DynamicType = (), Scope = NamespaceResourceScope>
        + ResourceExt
        + Clone
        + std::fmt::Debug
        + serde::Serialize
        + for<'de> serde::Deserialize<'de>,
{
    let namespace = resource.namespace().unwrap_or_default();
    let name = resource.name_any();

    if resource
        .meta()
        .finalizers
        .as_ref()
        .is_none_or(|f| !f.contains(&finalizer.to_string()))
    {
        info!(
            "Adding finalizer {} to {}/{} {}",
            finalizer,
            namespace,
            name,
            T::kind(&())
        );

        let mut finalizers = resource.meta().finalizers.clone().unwrap_or_default();
        finalizers.push(finalizer.to_string());

        let api: Api<T> = Api::namespaced(client.clone(), &namespace);
        let patch = json!({ "metadata": { "finalizers": finalizers } });
        api.patch(&name, &PatchParams::default(), &Patch::Merge(&patch))
            .await?;
    }

    Ok(())
}

/// Remove a finalizer from a resource.
///
/// This function removes the specified finalizer from the resource if
/// present. The operation is idempotent - calling it multiple times has no
/// effect if the finalizer is already absent.
///
/// # Arguments
///
/// * `client` - Kubernetes client for accessing the API
/// * `resource` - The resource to remove the finalizer from
/// * `finalizer` - The finalizer string to remove
///
/// # Errors
///
/// Returns an error if the API patch operation fails.
pub async fn remove_finalizer<T>(client: &Client, resource: &T, finalizer: &str) -> Result<()>
where
    T: Resource<DynamicType = (), Scope = NamespaceResourceScope>
        + ResourceExt
        + Clone
        + std::fmt::Debug
        + serde::Serialize
        + for<'de> serde::Deserialize<'de>,
{
    let namespace = resource.namespace().unwrap_or_default();
    let name = resource.name_any();

    if resource
        .meta()
        .finalizers
        .as_ref()
        .is_some_and(|f| f.contains(&finalizer.to_string()))
    {
        info!(
            "Removing finalizer {} from {}/{} {}",
            finalizer,
            namespace,
            name,
            T::kind(&())
        );

        let mut finalizers = resource.meta().finalizers.clone().unwrap_or_default();
        finalizers.retain(|f| f != finalizer);

        let api: Api<T> = Api::namespaced(client.clone(), &namespace);
        let patch = json!({ "metadata": { "finalizers": finalizers } });
        api.patch(&name, &PatchParams::default(), &Patch::Merge(&patch))
            .await?;
    }

    Ok(())
}

#[cfg(test)]
#[path = "finalizers_tests.rs"]
mod finalizers_tests;
