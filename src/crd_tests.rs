// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

#[cfg(test)]
mod tests {
    use crate::crd::*;
    use kube::CustomResourceExt;

    #[test]
    fn test_arecord_spec_creation() {
        let spec = ARecordSpec {
            hosted_zone_id: "Z1D633PJN98FT9".to_string(),
            name: "www.example.com".to_string(),
            ttl: Some(300),
            value: vec!["192.0.2.1".to_string(), "192.0.2.2".to_string()],
        };

        assert_eq!(spec.hosted_zone_id, "Z1D633PJN98FT9");
        assert_eq!(spec.name, "www.example.com");
        assert_eq!(spec.ttl, Some(300));
        assert_eq!(spec.value.len(), 2);
    }

    #[test]
    fn test_arecord_spec_without_ttl() {
        let spec = ARecordSpec {
            hosted_zone_id: "Z1".to_string(),
            name: "mail.example.com".to_string(),
            ttl: None,
            value: vec!["192.0.2.3".to_string()],
        };

        assert_eq!(spec.ttl, None);
    }

    #[test]
    fn test_cname_record_spec_creation() {
        let spec = CNAMERecordSpec {
            hosted_zone_id: "Z1".to_string(),
            name: "blog.example.com".to_string(),
            ttl: Some(3600),
            value: "example.github.io.".to_string(),
        };

        assert_eq!(spec.value, "example.github.io.");
        assert_eq!(spec.ttl, Some(3600));
    }

    #[test]
    fn test_txt_record_spec_creation() {
        let spec = TXTRecordSpec {
            hosted_zone_id: "Z1".to_string(),
            name: "example.com".to_string(),
            ttl: None,
            value: "v=spf1 include:_spf.google.com ~all".to_string(),
        };

        assert!(spec.value.starts_with("v=spf1"));
    }

    #[test]
    fn test_spec_serializes_camel_case() {
        let spec = ARecordSpec {
            hosted_zone_id: "Z1".to_string(),
            name: "www.example.com".to_string(),
            ttl: Some(60),
            value: vec!["192.0.2.1".to_string()],
        };

        let json = serde_json::to_value(&spec).unwrap();
        assert!(json.get("hostedZoneId").is_some());
        assert!(json.get("hosted_zone_id").is_none());
    }

    #[test]
    fn test_condition() {
        let condition = Condition {
            r#type: "Ready".to_string(),
            status: "True".to_string(),
            reason: Some("ReconcileSucceeded".to_string()),
            message: Some("Record confirmed in hosted zone".to_string()),
            last_transition_time: Some("2025-01-01T00:00:00Z".to_string()),
        };

        assert_eq!(condition.r#type, "Ready");
        assert_eq!(condition.status, "True");
        assert!(condition.reason.is_some());
    }

    #[test]
    fn test_record_status_default() {
        let status = RecordStatus::default();
        assert!(status.conditions.is_empty());
        assert!(status.observed_generation.is_none());
        assert!(status.record.is_none());
    }

    #[test]
    fn test_observed_record_round_trips_through_json() {
        let observed = ObservedRecord {
            hosted_zone_id: "Z1".to_string(),
            name: "www.example.com.".to_string(),
            record_type: "A".to_string(),
            ttl: 300,
            values: vec!["192.0.2.1".to_string()],
        };

        let json = serde_json::to_value(&observed).unwrap();
        assert_eq!(json["recordType"], "A");
        let back: ObservedRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, observed);
    }

    #[test]
    fn test_crd_generation_metadata() {
        let crd = ARecord::crd();
        assert_eq!(crd.spec.group, "route53.firestoned.io");
        assert_eq!(crd.spec.names.kind, "ARecord");
        assert_eq!(crd.spec.names.plural, "arecords");
        assert_eq!(
            crd.spec.names.short_names,
            Some(vec!["a".to_string()])
        );

        let crd = CNAMERecord::crd();
        assert_eq!(crd.spec.names.kind, "CNAMERecord");

        let crd = TXTRecord::crd();
        assert_eq!(crd.spec.names.kind, "TXTRecord");
    }

    #[test]
    fn test_crd_has_status_subresource() {
        let crd = ARecord::crd();
        let version = &crd.spec.versions[0];
        assert!(version.subresources.as_ref().unwrap().status.is_some());
    }
}
