// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Operator configuration read from the environment.
//!
//! Settings follow the standard AWS variable names so the operator picks up
//! the same environment a pod's credential injection provides. The config is
//! loaded once in `main` and handed to the composition root; nothing here is
//! cached globally.

use crate::dns_errors::Route53Error;
use url::Url;

/// Default region when `AWS_REGION` is unset.
pub const DEFAULT_AWS_REGION: &str = "us-east-1";

/// Default bind address for the metrics and health listener.
pub const DEFAULT_METRICS_BIND_ADDR: &str = "0.0.0.0:8080";

/// Operator settings.
///
/// Credentials are optional; when absent the transport is expected to run
/// against an endpoint that doesn't require request signing (or to resolve
/// credentials itself).
///
/// The `Debug` implementation redacts credential values.
#[derive(Clone, Default)]
pub struct Config {
    /// AWS region, e.g. "us-east-1".
    pub aws_region: String,

    /// AWS access key id.
    pub aws_access_key_id: Option<String>,

    /// AWS secret access key.
    pub aws_secret_access_key: Option<String>,

    /// AWS session token for temporary credentials.
    pub aws_session_token: Option<String>,

    /// Override for the Route53 endpoint, e.g. a local gateway during
    /// development. When unset the public Route53 endpoint is used.
    pub aws_endpoint_url: Option<Url>,

    /// Bind address for the `/metrics` and `/healthz` listener.
    pub metrics_bind_addr: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("aws_region", &self.aws_region)
            .field("aws_access_key_id", &self.aws_access_key_id)
            .field(
                "aws_secret_access_key",
                &self.aws_secret_access_key.as_ref().map(|_| "<REDACTED>"),
            )
            .field(
                "aws_session_token",
                &self.aws_session_token.as_ref().map(|_| "<REDACTED>"),
            )
            .field("aws_endpoint_url", &self.aws_endpoint_url)
            .field("metrics_bind_addr", &self.metrics_bind_addr)
            .finish()
    }
}

impl Config {
    /// Load settings from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `AWS_ENDPOINT_URL` is set but is not a valid URL.
    pub fn from_env() -> Result<Self, Route53Error> {
        let aws_endpoint_url = match std::env::var("AWS_ENDPOINT_URL") {
            Ok(raw) if !raw.is_empty() => {
                Some(Url::parse(&raw).map_err(|e| Route53Error::Response {
                    reason: format!("AWS_ENDPOINT_URL is not a valid URL: {e}"),
                })?)
            }
            _ => None,
        };

        Ok(Self {
            aws_region: env_or("AWS_REGION", DEFAULT_AWS_REGION),
            aws_access_key_id: env_opt("AWS_ACCESS_KEY_ID"),
            aws_secret_access_key: env_opt("AWS_SECRET_ACCESS_KEY"),
            aws_session_token: env_opt("AWS_SESSION_TOKEN"),
            aws_endpoint_url,
            metrics_bind_addr: env_or("METRICS_BIND_ADDR", DEFAULT_METRICS_BIND_ADDR),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
