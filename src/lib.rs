// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

#![allow(unexpected_cfgs)]

//! # Route53 Operator - AWS Route53 DNS Record Operator for Kubernetes
//!
//! A Kubernetes operator written in Rust that reconciles DNS record Custom
//! Resources (A, CNAME, TXT) against AWS Route53 hosted zones.
//!
//! ## Overview
//!
//! This library provides the core functionality for the operator, including:
//!
//! - Custom Resource Definitions (CRDs) for DNS records
//! - A validated, typed record model with codecs to and from the Route53
//!   record set shape
//! - A generic CRUD engine owning the idempotent change-submission protocol
//! - Reconciliation logic binding resource lifecycle events to the engine
//!
//! ## Modules
//!
//! - [`crd`] - Custom Resource Definition types for DNS records
//! - [`route53`] - Wire types, the API collaborator, the record model, and
//!   the CRUD engine
//! - [`reconcilers`] - Reconciliation logic for each record type
//! - [`config`] - Environment-driven operator settings
//! - [`dns_errors`] - Error taxonomy for validation, decoding, and provider
//!   interaction
//!
//! ## Example
//!
//! ```rust,no_run
//! use route53_operator::config::Config;
//! use route53_operator::route53::{ACrud, Route53Api, Route53Client};
//! use route53_operator::route53::records::{ARecordSet, Route53Record};
//! use std::sync::Arc;
//!
//! async fn create_record() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client: Arc<dyn Route53Api> = Arc::new(Route53Client::new(&config)?);
//!
//!     let crud = ACrud::new(client);
//!     let record = ARecordSet::parse(
//!         "Z1D633PJN98FT9",
//!         "www.example.com",
//!         Some(300),
//!         &["192.0.2.1".to_string()],
//!     )?;
//!     let converged = crud.create(&record).await?;
//!     println!("created {}", converged.fqdn());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Typed Record Model** - Validation at construction, never at the provider
//! - **Read-After-Write** - Creates and updates return the converged record
//! - **Partial Updates** - UPSERT bodies carry only the fields being changed
//! - **Status Tracking** - Full status subresources with confirmed record state

pub mod config;
pub mod crd;
pub mod dns_errors;
pub mod metrics;
pub mod reconcilers;
pub mod route53;

#[macro_use]
pub mod record_wrappers;

#[cfg(test)]
mod config_tests;
#[cfg(test)]
mod crd_tests;
