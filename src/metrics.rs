// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Prometheus metrics for the Route53 operator.
//!
//! This module provides metrics collection with the namespace prefix
//! `route53_firestoned_io_` (prometheus-safe version of
//! "route53.firestoned.io").
//!
//! # Metrics Categories
//!
//! - **Reconciliation Metrics** - Track reconciliation operations and their outcomes
//! - **Resource Lifecycle Metrics** - Track record creation, updates, and deletions
//! - **Error Metrics** - Track error conditions and types
//!
//! # Example
//!
//! ```rust,no_run
//! use route53_operator::metrics::record_reconciliation_success;
//!
//! // Record a successful reconciliation
//! record_reconciliation_success("ARecord", std::time::Duration::from_secs(1));
//! ```

use prometheus::{
    CounterVec, Encoder, GaugeVec, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};
use std::sync::LazyLock;
use std::time::Duration;

/// Namespace prefix for all operator metrics (prometheus-safe)
const METRICS_NAMESPACE: &str = "route53_firestoned_io";

/// Global Prometheus metrics registry
///
/// All metrics are registered in this registry and exposed via the `/metrics` endpoint.
pub static METRICS_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Total number of reconciliations by resource type and status
///
/// Labels:
/// - `resource_type`: Kind of resource (e.g., `ARecord`, `TXTRecord`)
/// - `status`: Outcome (`success`, `error`)
pub static RECONCILIATION_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_reconciliations_total"),
        "Total number of reconciliations by resource type and status",
    );
    let counter = CounterVec::new(opts, &["resource_type", "status"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Duration of reconciliations in seconds
///
/// Labels:
/// - `resource_type`: Kind of resource (e.g., `ARecord`, `TXTRecord`)
pub static RECONCILIATION_DURATION_SECONDS: LazyLock<HistogramVec> = LazyLock::new(|| {
    let opts = HistogramOpts::new(
        format!("{METRICS_NAMESPACE}_reconciliation_duration_seconds"),
        "Duration of reconciliations in seconds by resource type",
    )
    .buckets(vec![0.001, 0.01, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0]);
    let histogram = HistogramVec::new(opts, &["resource_type"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(histogram.clone()))
        .unwrap();
    histogram
});

/// Total number of provider records created
///
/// Labels:
/// - `resource_type`: Kind of record created
pub static RECORDS_CREATED_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_records_created_total"),
        "Total number of provider records created by type",
    );
    let counter = CounterVec::new(opts, &["resource_type"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Total number of provider records updated
///
/// Labels:
/// - `resource_type`: Kind of record updated
pub static RECORDS_UPDATED_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_records_updated_total"),
        "Total number of provider records updated by type",
    );
    let counter = CounterVec::new(opts, &["resource_type"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Total number of provider records deleted
///
/// Labels:
/// - `resource_type`: Kind of record deleted
pub static RECORDS_DELETED_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_records_deleted_total"),
        "Total number of provider records deleted by type",
    );
    let counter = CounterVec::new(opts, &["resource_type"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Number of currently active records being tracked
///
/// Labels:
/// - `resource_type`: Kind of record
pub static RECORDS_ACTIVE: LazyLock<GaugeVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_records_active"),
        "Number of currently active records by type",
    );
    let gauge = GaugeVec::new(opts, &["resource_type"]).unwrap();
    METRICS_REGISTRY.register(Box::new(gauge.clone())).unwrap();
    gauge
});

/// Total number of errors by resource type and error category
///
/// Labels:
/// - `resource_type`: Kind of resource
/// - `error_type`: Category of error (`reconcile_error`, `validation_error`, `provider_error`)
pub static ERRORS_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_errors_total"),
        "Total number of errors by resource type and error category",
    );
    let counter = CounterVec::new(opts, &["resource_type", "error_type"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Record a successful reconciliation
///
/// # Arguments
/// * `resource_type` - The kind of resource reconciled (e.g., `ARecord`)
/// * `duration` - Duration of the reconciliation
pub fn record_reconciliation_success(resource_type: &str, duration: Duration) {
    RECONCILIATION_TOTAL
        .with_label_values(&[resource_type, "success"])
        .inc();
    RECONCILIATION_DURATION_SECONDS
        .with_label_values(&[resource_type])
        .observe(duration.as_secs_f64());
}

/// Record a failed reconciliation
///
/// # Arguments
/// * `resource_type` - The kind of resource reconciled
/// * `duration` - Duration of the reconciliation before failure
pub fn record_reconciliation_error(resource_type: &str, duration: Duration) {
    RECONCILIATION_TOTAL
        .with_label_values(&[resource_type, "error"])
        .inc();
    RECONCILIATION_DURATION_SECONDS
        .with_label_values(&[resource_type])
        .observe(duration.as_secs_f64());
}

/// Record provider record creation
///
/// # Arguments
/// * `resource_type` - The kind of record created
pub fn record_resource_created(resource_type: &str) {
    RECORDS_CREATED_TOTAL
        .with_label_values(&[resource_type])
        .inc();
    RECORDS_ACTIVE.with_label_values(&[resource_type]).inc();
}

/// Record provider record update
///
/// # Arguments
/// * `resource_type` - The kind of record updated
pub fn record_resource_updated(resource_type: &str) {
    RECORDS_UPDATED_TOTAL
        .with_label_values(&[resource_type])
        .inc();
}

/// Record provider record deletion
///
/// # Arguments
/// * `resource_type` - The kind of record deleted
pub fn record_resource_deleted(resource_type: &str) {
    RECORDS_DELETED_TOTAL
        .with_label_values(&[resource_type])
        .inc();
    RECORDS_ACTIVE.with_label_values(&[resource_type]).dec();
}

/// Record an error
///
/// # Arguments
/// * `resource_type` - The kind of resource where error occurred
/// * `error_type` - Category of error (e.g., `reconcile_error`, `validation_error`)
pub fn record_error(resource_type: &str, error_type: &str) {
    ERRORS_TOTAL
        .with_label_values(&[resource_type, error_type])
        .inc();
}

/// Gather and encode all metrics in Prometheus text format
///
/// # Returns
/// Prometheus-formatted metrics as a String
///
/// # Errors
/// Returns error if encoding fails
pub fn gather_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = METRICS_REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(format!("UTF-8 error: {e}")))
}
