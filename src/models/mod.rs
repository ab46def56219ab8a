//! ProviderHub models.
//!
//! Files in this module are produced by `modelgen` and kept in sync with the
//! ProviderHub definitions fixture; regenerate rather than edit by hand.

mod resource_type_extension;

pub use resource_type_extension::ResourceTypeExtension;

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ModelError;
    use crate::record::{from_document_with, Document, Record};
    use proptest::prelude::*;
    use serde_json::{json, Value};
    use std::time::Duration;

    fn document(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_construct_without_arguments_leaves_fields_unset() {
        let ext = ResourceTypeExtension::new(None, None, None);
        assert_eq!(ext.endpoint_uri, None);
        assert_eq!(ext.extension_categories, None);
        assert_eq!(ext.timeout, None);
        assert_eq!(ext, ResourceTypeExtension::default());
        assert!(ext.to_document().is_empty());
    }

    #[test]
    fn test_construct_runs_hook_after_assignment() {
        fn default_timeout(ext: &mut ResourceTypeExtension) {
            ext.timeout.get_or_insert(Duration::from_secs(10));
        }

        let ext = ResourceTypeExtension::new_with(
            Some("https://contoso.example/ext".to_owned()),
            None,
            None,
            default_timeout,
        );
        assert_eq!(ext.timeout, Some(Duration::from_secs(10)));

        let ext = ResourceTypeExtension::new_with(
            None,
            None,
            Some(Duration::from_secs(3)),
            default_timeout,
        );
        assert_eq!(ext.timeout, Some(Duration::from_secs(3)));

        let ext: ResourceTypeExtension =
            from_document_with(&document(json!({})), default_timeout).unwrap();
        assert_eq!(ext.timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_serialize_uses_wire_keys() {
        let ext = ResourceTypeExtension::new(
            Some("https://contoso.example/ext".to_owned()),
            Some(vec!["ResourceCreationValidate".to_owned()]),
            Some(Duration::from_secs(20)),
        );
        assert_eq!(
            serde_json::to_value(&ext).unwrap(),
            json!({
                "endpointUri": "https://contoso.example/ext",
                "extensionCategories": ["ResourceCreationValidate"],
                "timeout": "PT20S"
            })
        );
    }

    #[test]
    fn test_serialize_omits_unset_timeout() {
        let ext = ResourceTypeExtension::new(Some("x".to_owned()), Some(vec![]), None);
        let document = ext.to_document();
        assert!(!document.contains_key("timeout"));
        assert_eq!(document.get("extensionCategories"), Some(&json!([])));
        assert_eq!(
            serde_json::to_string(&ext).unwrap(),
            r#"{"endpointUri":"x","extensionCategories":[]}"#
        );
    }

    #[test]
    fn test_categories_keep_order() {
        let ext = ResourceTypeExtension::new(
            None,
            Some(vec!["a".to_owned(), "b".to_owned(), "c".to_owned()]),
            None,
        );
        let back = ResourceTypeExtension::from_document(&ext.to_document()).unwrap();
        assert_eq!(
            back.extension_categories,
            Some(vec!["a".to_owned(), "b".to_owned(), "c".to_owned()])
        );
    }

    #[test]
    fn test_deserialize_ignores_unknown_keys() {
        let ext: ResourceTypeExtension =
            serde_json::from_str(r#"{"endpointUri":"x","unused":123}"#).unwrap();
        assert_eq!(ext.endpoint_uri, Some("x".to_owned()));
        assert_eq!(ext.extension_categories, None);
        assert_eq!(ext.timeout, None);
    }

    #[test]
    fn test_deserialize_rejects_invalid_timeout() {
        let err =
            ResourceTypeExtension::from_document(&document(json!({"timeout": "not-a-duration"})))
                .unwrap_err();
        assert!(matches!(err, ModelError::MalformedDocument { key, .. } if key == "timeout"));
    }

    #[test]
    fn test_deserialize_rejects_type_mismatch() {
        let err = ResourceTypeExtension::from_document(&document(json!({"endpointUri": 5})))
            .unwrap_err();
        assert!(matches!(err, ModelError::MalformedDocument { key, .. } if key == "endpointUri"));

        let err = ResourceTypeExtension::from_document(&document(
            json!({"extensionCategories": "ResourceCreationBegin"}),
        ))
        .unwrap_err();
        assert!(
            matches!(err, ModelError::MalformedDocument { key, .. } if key == "extensionCategories")
        );
    }

    #[test]
    fn test_deserialize_accepts_timespan_text() {
        let ext: ResourceTypeExtension = serde_json::from_str(r#"{"timeout":"00:00:20"}"#).unwrap();
        assert_eq!(ext.timeout, Some(Duration::from_secs(20)));
    }

    fn arb_extension() -> impl Strategy<Value = ResourceTypeExtension> {
        (
            proptest::option::of(".*"),
            proptest::option::of(proptest::collection::vec("[A-Za-z]{0,12}", 0..5)),
            proptest::option::of((any::<u32>(), 0u32..1_000_000_000)),
        )
            .prop_map(|(uri, categories, timeout)| {
                ResourceTypeExtension::new(
                    uri,
                    categories,
                    timeout.map(|(secs, nanos)| Duration::new(u64::from(secs), nanos)),
                )
            })
    }

    proptest! {
        #[test]
        fn prop_document_round_trip(ext in arb_extension()) {
            let back = ResourceTypeExtension::from_document(&ext.to_document()).unwrap();
            prop_assert_eq!(back, ext);
        }
    }
}
