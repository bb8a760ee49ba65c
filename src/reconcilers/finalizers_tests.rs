// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `finalizers.rs`

#[cfg(test)]
mod tests {
    use crate::crd::{ARecord, ARecordSpec};
    use crate::reconcilers::records::A_RECORD_FINALIZER;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, Time};
    use kube::{Resource, ResourceExt};

    const TEST_NAMESPACE: &str = "dns-system";
    const TEST_NAME: &str = "www-example-com";

    fn test_record(
        finalizers: Option<Vec<String>>,
        deletion_timestamp: Option<Time>,
    ) -> ARecord {
        ARecord {
            metadata: ObjectMeta {
                name: Some(TEST_NAME.to_string()),
                namespace: Some(TEST_NAMESPACE.to_string()),
                finalizers,
                deletion_timestamp,
                generation: Some(1),
                ..Default::default()
            },
            spec: ARecordSpec {
                hosted_zone_id: "Z1".to_string(),
                name: "www.example.com".to_string(),
                ttl: Some(300),
                value: vec!["192.0.2.1".to_string()],
            },
            status: None,
        }
    }

    #[test]
    fn test_finalizer_absent_on_fresh_resource() {
        let record = test_record(None, None);
        assert!(record
            .meta()
            .finalizers
            .as_ref()
            .is_none_or(|f| !f.contains(&A_RECORD_FINALIZER.to_string())));
    }

    #[test]
    fn test_finalizer_present_after_patch_shape() {
        let record = test_record(Some(vec![A_RECORD_FINALIZER.to_string()]), None);
        assert!(record
            .meta()
            .finalizers
            .as_ref()
            .is_some_and(|f| f.contains(&A_RECORD_FINALIZER.to_string())));
    }

    #[test]
    fn test_unrelated_finalizers_are_preserved_on_removal() {
        let record = test_record(
            Some(vec![
                "other.io/finalizer".to_string(),
                A_RECORD_FINALIZER.to_string(),
            ]),
            None,
        );

        let mut finalizers = record.meta().finalizers.clone().unwrap();
        finalizers.retain(|f| f != A_RECORD_FINALIZER);
        assert_eq!(finalizers, vec!["other.io/finalizer".to_string()]);
    }

    #[test]
    fn test_deletion_timestamp_marks_resource_deleting() {
        let record = test_record(
            Some(vec![A_RECORD_FINALIZER.to_string()]),
            Some(Time(k8s_openapi::jiff::Timestamp::now())),
        );
        assert!(record.metadata.deletion_timestamp.is_some());

        let record = test_record(Some(vec![A_RECORD_FINALIZER.to_string()]), None);
        assert!(record.metadata.deletion_timestamp.is_none());
    }

    #[test]
    fn test_finalizer_names_are_kind_scoped() {
        use crate::reconcilers::records::{CNAME_RECORD_FINALIZER, TXT_RECORD_FINALIZER};

        assert_eq!(A_RECORD_FINALIZER, "arecord.route53.firestoned.io/finalizer");
        assert_eq!(
            CNAME_RECORD_FINALIZER,
            "cnamerecord.route53.firestoned.io/finalizer"
        );
        assert_eq!(
            TXT_RECORD_FINALIZER,
            "txtrecord.route53.firestoned.io/finalizer"
        );
        assert_ne!(A_RECORD_FINALIZER, CNAME_RECORD_FINALIZER);
    }
}
