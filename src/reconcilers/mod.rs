// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Kubernetes reconciliation controllers for Route53 record resources.
//!
//! This module contains the reconciliation logic for the record Custom
//! Resources. Each reconciler watches for changes to its resource type and
//! converges the corresponding record set in the declared hosted zone.
//!
//! # Reconciliation Architecture
//!
//! The operator follows the standard Kubernetes controller pattern:
//!
//! 1. **Watch** - Monitor resource changes via the Kubernetes API
//! 2. **Reconcile** - Compare desired state (CRD spec) with the record set
//!    currently in the hosted zone
//! 3. **Update** - Submit a change batch to converge the provider state
//! 4. **Status** - Report the confirmed record back to Kubernetes
//!
//! # Available Reconcilers
//!
//! - [`reconcile_a_record`] - Manages IPv4 address records
//! - [`reconcile_cname_record`] - Manages canonical name aliases
//! - [`reconcile_txt_record`] - Manages text records

pub mod finalizers;
pub mod records;

pub use records::{reconcile_a_record, reconcile_cname_record, reconcile_txt_record};
