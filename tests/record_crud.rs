// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! End-to-end tests for the record CRUD engine over HTTP.
//!
//! These tests run the real `Route53Client` against a wiremock server, so
//! they verify both the engine's change-submission protocol and the exact
//! request bodies it puts on the wire.

use std::sync::Arc;

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use route53_operator::config::Config;
use route53_operator::dns_errors::{CrudError, Route53Error};
use route53_operator::route53::records::{
    ARecordSet, CnameRecordUpdate, Route53Record, TxtRecordSet,
};
use route53_operator::route53::{ACrud, CnameCrud, Route53Api, Route53Client, TxtCrud};

/// Build a client pointed at the mock server.
fn client_for(server: &MockServer) -> Arc<dyn Route53Api> {
    let config = Config {
        aws_region: "us-east-1".to_string(),
        aws_endpoint_url: Some(Url::parse(&server.uri()).unwrap()),
        ..Config::default()
    };
    Arc::new(Route53Client::new(&config).unwrap())
}

fn list_response(record_sets: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "ResourceRecordSets": record_sets,
        "IsTruncated": false,
    }))
}

fn change_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "ChangeInfo": {
            "Id": "/change/C2682N5HXP0BZ4",
            "Status": "PENDING",
            "SubmittedAt": "2025-01-01T00:00:00Z",
        }
    }))
}

#[tokio::test]
async fn test_create_submits_batch_and_verifies_with_reread() {
    let server = MockServer::start().await;

    // One CREATE change with the full record set representation
    Mock::given(method("POST"))
        .and(path("/2013-04-01/hostedzone/Z1/rrset"))
        .and(body_json(json!({
            "ChangeBatch": {
                "Comment": "route53-operator creating test.example.com. A in Z1",
                "Changes": [{
                    "Action": "CREATE",
                    "ResourceRecordSet": {
                        "Name": "test.example.com.",
                        "Type": "A",
                        "TTL": 60,
                        "ResourceRecords": [{"Value": "10.10.0.1"}],
                    },
                }],
            }
        })))
        .respond_with(change_response())
        .expect(1)
        .mount(&server)
        .await;

    // Verification read starting at the record's canonical name
    Mock::given(method("GET"))
        .and(path("/2013-04-01/hostedzone/Z1/rrset"))
        .and(query_param("name", "test.example.com."))
        .and(query_param("type", "A"))
        .and(query_param("maxitems", "1"))
        .respond_with(list_response(json!([{
            "Name": "test.example.com.",
            "Type": "A",
            "TTL": 60,
            "ResourceRecords": [{"Value": "10.10.0.1"}],
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let crud = ACrud::new(client_for(&server));
    let record =
        ARecordSet::parse("Z1", "test.example.com", None, &["10.10.0.1".to_string()]).unwrap();

    let converged = crud.create(&record).await.unwrap();
    assert_eq!(converged.fqdn(), "test.example.com.");
    assert_eq!(converged.ttl(), 60);
    assert_eq!(converged.value().len(), 1);
}

#[tokio::test]
async fn test_get_rejects_lexicographic_next_record() {
    let server = MockServer::start().await;

    // The zone holds x.example.com; querying y.example.com returns it as
    // the next record in listing order
    Mock::given(method("GET"))
        .and(path("/2013-04-01/hostedzone/Z1/rrset"))
        .and(query_param("name", "y.example.com."))
        .respond_with(list_response(json!([{
            "Name": "x.example.com.",
            "Type": "A",
            "TTL": 300,
            "ResourceRecords": [{"Value": "10.0.0.1"}],
        }])))
        .mount(&server)
        .await;

    let crud = ACrud::new(client_for(&server));
    let err = crud.get("Z1", "y.example.com").await.unwrap_err();
    assert!(matches!(err, CrudError::NotFound { .. }));
}

#[tokio::test]
async fn test_get_treats_empty_listing_as_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2013-04-01/hostedzone/Z1/rrset"))
        .respond_with(list_response(json!([])))
        .mount(&server)
        .await;

    let crud = TxtCrud::new(client_for(&server));
    let err = crud.get("Z1", "missing.example.com").await.unwrap_err();
    match err {
        CrudError::NotFound { record_type, .. } => assert_eq!(record_type, "TXT"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_update_ttl_only_omits_values_from_batch() {
    let server = MockServer::start().await;

    // The UPSERT body carries only the fields present on the patch
    Mock::given(method("POST"))
        .and(path("/2013-04-01/hostedzone/Z1/rrset"))
        .and(body_json(json!({
            "ChangeBatch": {
                "Comment": "route53-operator upserting blog.example.com. CNAME in Z1",
                "Changes": [{
                    "Action": "UPSERT",
                    "ResourceRecordSet": {
                        "Name": "blog.example.com.",
                        "Type": "CNAME",
                        "TTL": 120,
                    },
                }],
            }
        })))
        .respond_with(change_response())
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/2013-04-01/hostedzone/Z1/rrset"))
        .and(query_param("name", "blog.example.com."))
        .respond_with(list_response(json!([{
            "Name": "blog.example.com.",
            "Type": "CNAME",
            "TTL": 120,
            "ResourceRecords": [{"Value": "www.example.com."}],
        }])))
        .mount(&server)
        .await;

    let crud = CnameCrud::new(client_for(&server));
    let current = crud.get("Z1", "blog.example.com").await.unwrap();
    assert_eq!(current.ttl(), 120);

    let update = CnameRecordUpdate::new(Some(120), None).unwrap();
    let converged = crud.update(&current, &update).await.unwrap();
    assert_eq!(converged.ttl(), 120);
    assert_eq!(converged.value(), "www.example.com.");
}

#[tokio::test]
async fn test_remove_carries_current_values_and_does_not_reread() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/2013-04-01/hostedzone/Z1/rrset"))
        .and(body_json(json!({
            "ChangeBatch": {
                "Comment": "route53-operator deleting test.example.com. A in Z1",
                "Changes": [{
                    "Action": "DELETE",
                    "ResourceRecordSet": {
                        "Name": "test.example.com.",
                        "Type": "A",
                        "TTL": 300,
                        "ResourceRecords": [
                            {"Value": "10.10.0.1"},
                            {"Value": "10.10.0.2"},
                        ],
                    },
                }],
            }
        })))
        .respond_with(change_response())
        .expect(1)
        .mount(&server)
        .await;

    // No verification read after a delete
    Mock::given(method("GET"))
        .and(path("/2013-04-01/hostedzone/Z1/rrset"))
        .respond_with(list_response(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let crud = ACrud::new(client_for(&server));
    let record = ARecordSet::parse(
        "Z1",
        "test.example.com",
        Some(300),
        &["10.10.0.1".to_string(), "10.10.0.2".to_string()],
    )
    .unwrap();

    crud.remove(&record).await.unwrap();
}

#[tokio::test]
async fn test_rejected_change_is_invalid_change() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/2013-04-01/hostedzone/Z1/rrset"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "Code": "InvalidChangeBatch",
            "Message": "Tried to create resource record set that already exists",
        })))
        .mount(&server)
        .await;

    let crud = TxtCrud::new(client_for(&server));
    let record = TxtRecordSet::new("Z1", "example.com", None, "v=spf1 -all").unwrap();

    let err = crud.create(&record).await.unwrap_err();
    match err {
        CrudError::InvalidChange { action, reason, .. } => {
            assert_eq!(action, "CREATE");
            assert!(reason.contains("InvalidChangeBatch"));
            assert!(reason.contains("already exists"));
        }
        other => panic!("expected InvalidChange, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_passes_through_as_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2013-04-01/hostedzone/Z1/rrset"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let crud = ACrud::new(client_for(&server));
    let err = crud.get("Z1", "test.example.com").await.unwrap_err();
    assert!(matches!(
        err,
        CrudError::Provider(Route53Error::Unavailable { status: 503, .. })
    ));
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_throttling_is_not_a_rejection() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/2013-04-01/hostedzone/Z1/rrset"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "Code": "Throttling",
            "Message": "Rate exceeded",
        })))
        .mount(&server)
        .await;

    let crud = TxtCrud::new(client_for(&server));
    let record = TxtRecordSet::new("Z1", "example.com", None, "v=spf1 -all").unwrap();

    // Throttling is a transport outcome for the caller's retry policy, not
    // a rejected change
    let err = crud.create(&record).await.unwrap_err();
    assert!(matches!(
        err,
        CrudError::Provider(Route53Error::Throttled { status: 429 })
    ));
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_prefixed_hosted_zone_id_is_accepted() {
    let server = MockServer::start().await;

    // Ids returned by CreateHostedZone carry the /hostedzone/ prefix; the
    // client strips it when building record set paths
    Mock::given(method("GET"))
        .and(path("/2013-04-01/hostedzone/Z1D633PJN98FT9/rrset"))
        .respond_with(list_response(json!([{
            "Name": "www.example.com.",
            "Type": "A",
            "TTL": 60,
            "ResourceRecords": [{"Value": "192.0.2.1"}],
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let crud = ACrud::new(client_for(&server));
    let record = crud
        .get("/hostedzone/Z1D633PJN98FT9", "www.example.com")
        .await
        .unwrap();
    assert_eq!(record.fqdn(), "www.example.com.");
}

#[tokio::test]
async fn test_create_hosted_zone() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/2013-04-01/hostedzone"))
        .and(body_json(json!({
            "Name": "example.com.",
            "CallerReference": "bootstrap-2025",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "HostedZone": {
                "Id": "/hostedzone/Z1D633PJN98FT9",
                "Name": "example.com.",
                "CallerReference": "bootstrap-2025",
                "ResourceRecordSetCount": 2,
            },
            "ChangeInfo": {
                "Id": "/change/C2682N5HXP0BZ4",
                "Status": "PENDING",
            },
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let zone = client
        .create_hosted_zone("example.com.", "bootstrap-2025")
        .await
        .unwrap();
    assert_eq!(zone.id, "/hostedzone/Z1D633PJN98FT9");
    assert_eq!(zone.name, "example.com.");
    assert_eq!(zone.resource_record_set_count, Some(2));
}
