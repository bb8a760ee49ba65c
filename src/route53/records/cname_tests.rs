// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Tests for the CNAME record model.

#[cfg(test)]
mod tests {
    use crate::dns_errors::{DecodeError, ValidationError};
    use crate::route53::records::{CnameRecordSet, CnameRecordUpdate, RecordUpdate, Route53Record};
    use crate::route53::types::ResourceRecordSet;

    #[test]
    fn test_new_validates_both_hostnames() {
        let record =
            CnameRecordSet::new("Z1", "blog.example.com", Some(600), "www.example.com.").unwrap();
        assert_eq!(record.fqdn(), "blog.example.com.");
        assert_eq!(record.value(), "www.example.com.");

        let err = CnameRecordSet::new("Z1", "-bad.com", None, "www.example.com.").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidHostname { .. }));

        let err = CnameRecordSet::new("Z1", "blog.example.com", None, "bad-.com").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidHostname { .. }));
    }

    #[test]
    fn test_target_spelling_is_preserved() {
        // No trailing-dot normalization on the target; the record name owns
        // the canonical form.
        let record =
            CnameRecordSet::new("Z1", "blog.example.com", None, "www.example.com").unwrap();
        assert_eq!(record.value(), "www.example.com");
    }

    #[test]
    fn test_record_set_round_trip() {
        let record =
            CnameRecordSet::new("Z1", "blog.example.com", Some(600), "www.example.com.").unwrap();
        let decoded = CnameRecordSet::from_record_set("Z1", &record.to_record_set()).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_from_record_set_requires_value() {
        let record_set = ResourceRecordSet {
            name: "blog.example.com.".to_string(),
            record_type: "CNAME".to_string(),
            ttl: Some(600),
            resource_records: Some(vec![]),
        };

        let err = CnameRecordSet::from_record_set("Z1", &record_set).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MissingField {
                field: "ResourceRecords",
                ..
            }
        ));
    }

    #[test]
    fn test_update_ttl_only() {
        let update = CnameRecordUpdate::new(Some(120), None).unwrap();
        assert_eq!(RecordUpdate::ttl(&update), Some(120));
        assert!(update.resource_records().is_none());
    }

    #[test]
    fn test_update_validates_target() {
        let err = CnameRecordUpdate::new(None, Some("not a hostname".to_string())).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidHostname { .. }));
    }
}
