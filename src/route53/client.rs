// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Route53 API collaborator.
//!
//! [`Route53Api`] is the interface the CRUD engine consumes: record set
//! listing, change submission, and hosted zone creation. It is object-safe
//! and shared as an `Arc<dyn Route53Api>` so one client handle serves every
//! engine in the process and tests can inject doubles.
//!
//! [`Route53Client`] is the shipped implementation over `reqwest`, speaking
//! the `/2013-04-01` REST paths. Request signing and HTTP-layer retries are
//! the transport's concern, not the engine's; the endpoint is configurable
//! for development gateways via `AWS_ENDPOINT_URL`.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::dns_errors::Route53Error;
use crate::route53::types::{
    ApiErrorBody, Change, ChangeAction, ChangeBatch, ChangeInfo,
    ChangeResourceRecordSetsRequest, ChangeResourceRecordSetsResponse, CreateHostedZoneRequest,
    CreateHostedZoneResponse, HostedZone, ListResourceRecordSetsResponse, ResourceRecordSet,
};

/// Public Route53 endpoint.
pub const ROUTE53_API_BASE: &str = "https://route53.amazonaws.com";

/// Route53 REST API version path segment.
pub const ROUTE53_API_VERSION: &str = "2013-04-01";

/// Timeout applied to every API request (30 seconds).
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Operations the CRUD engine requires from the DNS provider.
///
/// One change per call: `change_record_sets` submits a batch containing a
/// single action so that one request maps to one outcome and one error.
#[async_trait]
pub trait Route53Api: Send + Sync {
    /// List record sets in a hosted zone, starting at `(start_name,
    /// start_type)` in the zone's lexicographic order.
    ///
    /// Route53 returns the next record sets at or after the start position;
    /// a miss yields the following record, not an error. Callers own the
    /// exact-match check.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a rejected request.
    async fn list_record_sets(
        &self,
        hosted_zone_id: &str,
        start_name: &str,
        start_type: &str,
        max_items: u32,
    ) -> Result<Vec<ResourceRecordSet>, Route53Error>;

    /// Submit a single-change batch against a hosted zone.
    ///
    /// # Errors
    ///
    /// Returns [`Route53Error::Rejected`] when the provider refuses the
    /// change, or a transport variant on failure to reach it.
    async fn change_record_sets(
        &self,
        hosted_zone_id: &str,
        action: ChangeAction,
        record_set: ResourceRecordSet,
        comment: &str,
    ) -> Result<ChangeInfo, Route53Error>;

    /// Create a hosted zone.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a rejected request.
    async fn create_hosted_zone(
        &self,
        name: &str,
        caller_reference: &str,
    ) -> Result<HostedZone, Route53Error>;
}

/// Route53 REST client.
///
/// The `Debug` implementation redacts credential values.
pub struct Route53Client {
    base_url: Url,
    region: String,
    access_key_id: Option<String>,
    secret_access_key: Option<String>,
    session_token: Option<String>,
    http: reqwest::Client,
}

impl std::fmt::Debug for Route53Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route53Client")
            .field("base_url", &self.base_url.as_str())
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "<REDACTED>"),
            )
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "<REDACTED>"),
            )
            .finish()
    }
}

impl Route53Client {
    /// Build a client from operator settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &Config) -> Result<Self, Route53Error> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()?;

        let base_url = config
            .aws_endpoint_url
            .clone()
            .unwrap_or_else(|| Url::parse(ROUTE53_API_BASE).expect("static URL is valid"));

        Ok(Self {
            base_url,
            region: config.aws_region.clone(),
            access_key_id: config.aws_access_key_id.clone(),
            secret_access_key: config.aws_secret_access_key.clone(),
            session_token: config.aws_session_token.clone(),
            http,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/{ROUTE53_API_VERSION}/{path}")
    }

    /// Map a non-success response to the transport error taxonomy.
    async fn response_error(response: reqwest::Response) -> Route53Error {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|e| match (e.code, e.message) {
                (Some(code), Some(message)) => Some(format!("{code}: {message}")),
                (Some(code), None) => Some(code),
                (None, Some(message)) => Some(message),
                (None, None) => None,
            })
            .unwrap_or(body);

        match status {
            429 => Route53Error::Throttled { status },
            400..=499 => Route53Error::Rejected {
                status,
                message: detail,
            },
            _ => Route53Error::Unavailable {
                status,
                message: detail,
            },
        }
    }
}

/// Strip the "/hostedzone/" prefix Route53 uses in zone ids.
///
/// `CreateHostedZone` returns ids of the form "/hostedzone/Z1D633PJN98FT9"
/// while the record set paths take the bare id; accept either form.
fn bare_zone_id(hosted_zone_id: &str) -> &str {
    hosted_zone_id
        .strip_prefix("/hostedzone/")
        .unwrap_or(hosted_zone_id)
}

#[async_trait]
impl Route53Api for Route53Client {
    async fn list_record_sets(
        &self,
        hosted_zone_id: &str,
        start_name: &str,
        start_type: &str,
        max_items: u32,
    ) -> Result<Vec<ResourceRecordSet>, Route53Error> {
        let zone = bare_zone_id(hosted_zone_id);
        let url = self.endpoint(&format!("hostedzone/{zone}/rrset"));

        debug!(
            hosted_zone_id = zone,
            start_name,
            start_type,
            max_items,
            "Listing record sets"
        );

        let max_items = max_items.to_string();
        let response = self
            .http
            .get(&url)
            .query(&[
                ("name", start_name),
                ("type", start_type),
                ("maxitems", max_items.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::response_error(response).await);
        }

        let body: ListResourceRecordSetsResponse =
            response.json().await.map_err(|e| Route53Error::Response {
                reason: e.to_string(),
            })?;

        Ok(body.resource_record_sets)
    }

    async fn change_record_sets(
        &self,
        hosted_zone_id: &str,
        action: ChangeAction,
        record_set: ResourceRecordSet,
        comment: &str,
    ) -> Result<ChangeInfo, Route53Error> {
        let zone = bare_zone_id(hosted_zone_id);
        let url = self.endpoint(&format!("hostedzone/{zone}/rrset"));

        debug!(
            hosted_zone_id = zone,
            %action,
            name = %record_set.name,
            record_type = %record_set.record_type,
            "Submitting change batch"
        );

        let request = ChangeResourceRecordSetsRequest {
            change_batch: ChangeBatch {
                comment: Some(comment.to_string()),
                changes: vec![Change {
                    action,
                    resource_record_set: record_set,
                }],
            },
        };

        let response = self.http.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            return Err(Self::response_error(response).await);
        }

        let body: ChangeResourceRecordSetsResponse =
            response.json().await.map_err(|e| Route53Error::Response {
                reason: e.to_string(),
            })?;

        Ok(body.change_info)
    }

    async fn create_hosted_zone(
        &self,
        name: &str,
        caller_reference: &str,
    ) -> Result<HostedZone, Route53Error> {
        let url = self.endpoint("hostedzone");

        debug!(name, caller_reference, "Creating hosted zone");

        let request = CreateHostedZoneRequest {
            name: name.to_string(),
            caller_reference: caller_reference.to_string(),
        };

        let response = self.http.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            return Err(Self::response_error(response).await);
        }

        let body: CreateHostedZoneResponse =
            response.json().await.map_err(|e| Route53Error::Response {
                reason: e.to_string(),
            })?;

        Ok(body.hosted_zone)
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod client_tests;
