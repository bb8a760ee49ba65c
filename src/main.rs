// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::Result;
use axum::{http::StatusCode, routing::get, Router};
use futures::StreamExt;
use kube::{
    runtime::{controller::Action, watcher, Controller},
    Api, Client,
};
use route53_operator::{
    config::Config,
    crd::{ARecord, CNAMERecord, TXTRecord},
    generate_record_wrapper, metrics,
    reconcilers::{reconcile_a_record, reconcile_cname_record, reconcile_txt_record},
    route53::{Route53Api, Route53Client},
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
struct ReconcileError(#[from] anyhow::Error);

/// Context shared by all record controllers: the Kubernetes client and the
/// injected Route53 handle.
type Ctx = Arc<(Client, Arc<dyn Route53Api>)>;

generate_record_wrapper!(
    reconcile_arecord_wrapper,
    ARecord,
    reconcile_a_record,
    "ARecord"
);

generate_record_wrapper!(
    reconcile_cnamerecord_wrapper,
    CNAMERecord,
    reconcile_cname_record,
    "CNAMERecord"
);

generate_record_wrapper!(
    reconcile_txtrecord_wrapper,
    TXTRecord,
    reconcile_txt_record,
    "TXTRecord"
);

fn main() -> Result<()> {
    // Build Tokio runtime with custom thread names
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .thread_name("route53-controller")
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    // Initialize logging with custom format
    // Format: timestamp file:line LEVEL message
    //
    // Respects RUST_LOG environment variable if set, otherwise defaults to INFO level
    // Example: RUST_LOG=debug cargo run
    //
    // Respects RUST_LOG_FORMAT environment variable for output format
    // Example: RUST_LOG_FORMAT=json cargo run
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .with_ansi(true)
                .compact()
                .init();
        }
    }

    info!("Starting Route53 DNS Record Controller");

    let config = Config::from_env()?;
    debug!(?config, "Loaded configuration");

    debug!("Initializing Kubernetes client");
    let client = Client::try_default().await?;
    debug!("Kubernetes client initialized successfully");

    // One Route53 handle for the whole process; every engine shares it
    let route53_client = Route53Client::new(&config)?;
    debug!(?route53_client, "Route53 client created");
    let route53: Arc<dyn Route53Api> = Arc::new(route53_client);

    let ctx: Ctx = Arc::new((client.clone(), route53));

    info!("Starting all controllers");

    // Run controllers concurrently
    // Controllers should never exit - if one fails, we log it and exit the main process
    tokio::select! {
        result = run_metrics_server(config.metrics_bind_addr.clone()) => {
            error!("CRITICAL: metrics server exited unexpectedly: {:?}", result);
            result?;
            anyhow::bail!("metrics server exited unexpectedly without error")
        }
        result = run_arecord_controller(client.clone(), ctx.clone()) => {
            error!("CRITICAL: ARecord controller exited unexpectedly: {:?}", result);
            result?;
            anyhow::bail!("ARecord controller exited unexpectedly without error")
        }
        result = run_cnamerecord_controller(client.clone(), ctx.clone()) => {
            error!("CRITICAL: CNAMERecord controller exited unexpectedly: {:?}", result);
            result?;
            anyhow::bail!("CNAMERecord controller exited unexpectedly without error")
        }
        result = run_txtrecord_controller(client.clone(), ctx.clone()) => {
            error!("CRITICAL: TXTRecord controller exited unexpectedly: {:?}", result);
            result?;
            anyhow::bail!("TXTRecord controller exited unexpectedly without error")
        }
    }
}

/// Run the `ARecord` controller
async fn run_arecord_controller(client: Client, ctx: Ctx) -> Result<()> {
    info!("Starting ARecord controller");
    debug!("Initializing ARecord controller with cluster-wide watch");

    let api = Api::<ARecord>::all(client);

    Controller::new(api, watcher::Config::default())
        .run(reconcile_arecord_wrapper, error_policy, ctx)
        .for_each(|_| futures::future::ready(()))
        .await;

    Ok(())
}

/// Run the `CNAMERecord` controller
async fn run_cnamerecord_controller(client: Client, ctx: Ctx) -> Result<()> {
    info!("Starting CNAMERecord controller");

    let api = Api::<CNAMERecord>::all(client);

    Controller::new(api, watcher::Config::default())
        .run(reconcile_cnamerecord_wrapper, error_policy, ctx)
        .for_each(|_| futures::future::ready(()))
        .await;

    Ok(())
}

/// Run the `TXTRecord` controller
async fn run_txtrecord_controller(client: Client, ctx: Ctx) -> Result<()> {
    info!("Starting TXTRecord controller");

    let api = Api::<TXTRecord>::all(client);

    Controller::new(api, watcher::Config::default())
        .run(reconcile_txtrecord_wrapper, error_policy, ctx)
        .for_each(|_| futures::future::ready(()))
        .await;

    Ok(())
}

/// Serve `/metrics` and `/healthz`.
async fn run_metrics_server(bind_addr: String) -> Result<()> {
    let app = Router::new()
        .route("/metrics", get(metrics_handler))
        .route("/healthz", get(healthz_handler));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Serving metrics on {}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn metrics_handler() -> (StatusCode, String) {
    match metrics::gather_metrics() {
        Ok(body) => (StatusCode::OK, body),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

async fn healthz_handler() -> &'static str {
    "ok"
}

/// Error policy for the record controllers
fn error_policy(_resource: Arc<impl std::fmt::Debug>, _err: &ReconcileError, _ctx: Ctx) -> Action {
    Action::requeue(Duration::from_secs(30))
}
