#![allow(unused_imports)]
use std::time::Duration;
use crate::record::{noop_init, FieldKind, FieldMapping, FieldValue, InitHook, Record};

/// A routing endpoint of a resource provider.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResourceProviderEndpoint {
    pub api_versions: Option<Vec<String>>,
    pub enabled: Option<bool>,
    pub max_retries: Option<i64>,
    /// How long to wait for the endpoint.
    pub timeout: Option<Duration>,
    pub r#type: Option<String>,
}

impl ResourceProviderEndpoint {
    pub fn new(
        api_versions: Option<Vec<String>>,
        enabled: Option<bool>,
        max_retries: Option<i64>,
        timeout: Option<Duration>,
        r#type: Option<String>,
    ) -> Self {
        Self::new_with(api_versions, enabled, max_retries, timeout, r#type, noop_init)
    }

    pub fn new_with(
        api_versions: Option<Vec<String>>,
        enabled: Option<bool>,
        max_retries: Option<i64>,
        timeout: Option<Duration>,
        r#type: Option<String>,
        init: InitHook<Self>,
    ) -> Self {
        let mut record = Self {
            api_versions,
            enabled,
            max_retries,
            timeout,
            r#type,
        };
        init(&mut record);
        record
    }
}

impl Record for ResourceProviderEndpoint {
    const FIELDS: &'static [FieldMapping] = &[
        FieldMapping::new("api_versions", "apiVersions", FieldKind::StringList),
        FieldMapping::new("enabled", "enabled", FieldKind::Boolean),
        FieldMapping::new("max_retries", "maxRetries", FieldKind::Integer),
        FieldMapping::new("timeout", "timeout", FieldKind::Duration),
        FieldMapping::new("type", "type", FieldKind::String),
    ];

    fn field(&self, property: &str) -> Option<FieldValue> {
        match property {
            "api_versions" => self.api_versions.clone().map(FieldValue::StringList),
            "enabled" => self.enabled.map(FieldValue::Boolean),
            "max_retries" => self.max_retries.map(FieldValue::Integer),
            "timeout" => self.timeout.map(FieldValue::Duration),
            "type" => self.r#type.clone().map(FieldValue::String),
            _ => None,
        }
    }

    fn set_field(&mut self, property: &str, value: FieldValue) {
        match (property, value) {
            ("api_versions", FieldValue::StringList(value)) => self.api_versions = Some(value),
            ("enabled", FieldValue::Boolean(value)) => self.enabled = Some(value),
            ("max_retries", FieldValue::Integer(value)) => self.max_retries = Some(value),
            ("timeout", FieldValue::Duration(value)) => self.timeout = Some(value),
            ("type", FieldValue::String(value)) => self.r#type = Some(value),
            _ => {}
        }
    }
}

crate::impl_record_serde!(ResourceProviderEndpoint);
