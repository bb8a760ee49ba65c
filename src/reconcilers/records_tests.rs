// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for DNS record reconcilers
//!
//! These tests verify the spec decoding and status rendering used by the
//! record reconcilers. Engine behavior is covered in the CRUD tests; the
//! end-to-end flow against a mock endpoint lives in `tests/record_crud.rs`.

#[cfg(test)]
mod tests {
    use crate::crd::{ARecordSpec, CNAMERecordSpec, TXTRecordSpec};
    use crate::dns_errors::ValidationError;
    use crate::reconcilers::records::{
        a_record_from_spec, cname_record_from_spec, observed_record, txt_record_from_spec,
    };
    use crate::route53::records::Route53Record;
    use std::net::Ipv4Addr;

    #[test]
    fn test_a_record_from_spec() {
        let spec = ARecordSpec {
            hosted_zone_id: "Z1".to_string(),
            name: "www.example.com".to_string(),
            ttl: Some(300),
            value: vec!["192.0.2.1".to_string(), "192.0.2.2".to_string()],
        };

        let record = a_record_from_spec(&spec).unwrap();
        assert_eq!(record.hosted_zone_id(), "Z1");
        assert_eq!(record.fqdn(), "www.example.com.");
        assert_eq!(record.ttl(), 300);
        assert_eq!(
            record.value(),
            &[Ipv4Addr::new(192, 0, 2, 1), Ipv4Addr::new(192, 0, 2, 2)]
        );
    }

    #[test]
    fn test_a_record_from_spec_defaults_ttl() {
        let spec = ARecordSpec {
            hosted_zone_id: "Z1".to_string(),
            name: "www.example.com".to_string(),
            ttl: None,
            value: vec!["192.0.2.1".to_string()],
        };

        assert_eq!(a_record_from_spec(&spec).unwrap().ttl(), 60);
    }

    #[test]
    fn test_a_record_from_spec_rejects_bad_address() {
        let spec = ARecordSpec {
            hosted_zone_id: "Z1".to_string(),
            name: "www.example.com".to_string(),
            ttl: None,
            value: vec!["not-an-ip".to_string()],
        };

        let err = a_record_from_spec(&spec).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidIpv4Address { .. }));
    }

    #[test]
    fn test_a_record_from_spec_rejects_bad_name() {
        let spec = ARecordSpec {
            hosted_zone_id: "Z1".to_string(),
            name: "-bad.example.com".to_string(),
            ttl: None,
            value: vec!["192.0.2.1".to_string()],
        };

        let err = a_record_from_spec(&spec).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidHostname { .. }));
    }

    #[test]
    fn test_cname_record_from_spec() {
        let spec = CNAMERecordSpec {
            hosted_zone_id: "Z1".to_string(),
            name: "blog.example.com".to_string(),
            ttl: Some(3600),
            value: "example.github.io.".to_string(),
        };

        let record = cname_record_from_spec(&spec).unwrap();
        assert_eq!(record.fqdn(), "blog.example.com.");
        assert_eq!(record.value(), "example.github.io.");
    }

    #[test]
    fn test_cname_record_from_spec_rejects_bad_target() {
        let spec = CNAMERecordSpec {
            hosted_zone_id: "Z1".to_string(),
            name: "blog.example.com".to_string(),
            ttl: None,
            value: "bad target".to_string(),
        };

        let err = cname_record_from_spec(&spec).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidHostname { .. }));
    }

    #[test]
    fn test_txt_record_from_spec_trims_value() {
        let spec = TXTRecordSpec {
            hosted_zone_id: "Z1".to_string(),
            name: "example.com".to_string(),
            ttl: None,
            value: "  v=spf1 -all  ".to_string(),
        };

        let record = txt_record_from_spec(&spec).unwrap();
        assert_eq!(record.value(), "v=spf1 -all");
    }

    #[test]
    fn test_txt_record_from_spec_rejects_long_value() {
        let spec = TXTRecordSpec {
            hosted_zone_id: "Z1".to_string(),
            name: "example.com".to_string(),
            ttl: None,
            value: "a".repeat(256),
        };

        let err = txt_record_from_spec(&spec).unwrap_err();
        assert!(matches!(err, ValidationError::TxtValueTooLong { .. }));
    }

    #[test]
    fn test_observed_record_rendering() {
        let spec = ARecordSpec {
            hosted_zone_id: "Z1".to_string(),
            name: "www.example.com".to_string(),
            ttl: Some(300),
            value: vec!["192.0.2.2".to_string(), "192.0.2.1".to_string()],
        };

        let record = a_record_from_spec(&spec).unwrap();
        let observed = observed_record(&record);

        assert_eq!(observed.hosted_zone_id, "Z1");
        assert_eq!(observed.name, "www.example.com.");
        assert_eq!(observed.record_type, "A");
        assert_eq!(observed.ttl, 300);
        // Provider ordering is preserved in the status
        assert_eq!(
            observed.values,
            vec!["192.0.2.2".to_string(), "192.0.2.1".to_string()]
        );
    }
}
