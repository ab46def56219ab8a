// Generated by `modelgen --crate-path crate tests/fixtures/providerhub-definitions.json`.
#![allow(unused_imports)]
use std::time::Duration;
use crate::record::{noop_init, FieldKind, FieldMapping, FieldValue, InitHook, Record};

/// An extension endpoint called by ProviderHub for a resource type.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResourceTypeExtension {
    pub endpoint_uri: Option<String>,
    pub extension_categories: Option<Vec<String>>,
    pub timeout: Option<Duration>,
}

impl ResourceTypeExtension {
    pub fn new(
        endpoint_uri: Option<String>,
        extension_categories: Option<Vec<String>>,
        timeout: Option<Duration>,
    ) -> Self {
        Self::new_with(endpoint_uri, extension_categories, timeout, noop_init)
    }

    pub fn new_with(
        endpoint_uri: Option<String>,
        extension_categories: Option<Vec<String>>,
        timeout: Option<Duration>,
        init: InitHook<Self>,
    ) -> Self {
        let mut record = Self {
            endpoint_uri,
            extension_categories,
            timeout,
        };
        init(&mut record);
        record
    }
}

impl Record for ResourceTypeExtension {
    const FIELDS: &'static [FieldMapping] = &[
        FieldMapping::new("endpoint_uri", "endpointUri", FieldKind::String),
        FieldMapping::new("extension_categories", "extensionCategories", FieldKind::StringList),
        FieldMapping::new("timeout", "timeout", FieldKind::Duration),
    ];

    fn field(&self, property: &str) -> Option<FieldValue> {
        match property {
            "endpoint_uri" => self.endpoint_uri.clone().map(FieldValue::String),
            "extension_categories" => self.extension_categories.clone().map(FieldValue::StringList),
            "timeout" => self.timeout.map(FieldValue::Duration),
            _ => None,
        }
    }

    fn set_field(&mut self, property: &str, value: FieldValue) {
        match (property, value) {
            ("endpoint_uri", FieldValue::String(value)) => self.endpoint_uri = Some(value),
            ("extension_categories", FieldValue::StringList(value)) => self.extension_categories = Some(value),
            ("timeout", FieldValue::Duration(value)) => self.timeout = Some(value),
            _ => {}
        }
    }
}

crate::impl_record_serde!(ResourceTypeExtension);
