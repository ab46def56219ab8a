/*--- GENERATED START ---*/
#![allow(unused_imports)]
use std::time::Duration;
use providerhub_bindgen::record::{noop_init, FieldKind, FieldMapping, FieldValue, InitHook, Record};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResourceTypeEndpoint {
    pub api_versions: Option<Vec<String>>,
    pub enabled: Option<bool>,
    pub endpoint_uri: Option<String>,
    pub timeout: Option<Duration>,
}

impl ResourceTypeEndpoint {
    pub fn new(
        api_versions: Option<Vec<String>>,
        enabled: Option<bool>,
        endpoint_uri: Option<String>,
        timeout: Option<Duration>,
    ) -> Self {
        Self::new_with(api_versions, enabled, endpoint_uri, timeout, noop_init)
    }

    pub fn new_with(
        api_versions: Option<Vec<String>>,
        enabled: Option<bool>,
        endpoint_uri: Option<String>,
        timeout: Option<Duration>,
        init: InitHook<Self>,
    ) -> Self {
        let mut record = Self {
            api_versions,
            enabled,
            endpoint_uri,
            timeout,
        };
        init(&mut record);
        record
    }
}

impl Record for ResourceTypeEndpoint {
    const FIELDS: &'static [FieldMapping] = &[
        FieldMapping::new("api_versions", "apiVersions", FieldKind::StringList),
        FieldMapping::new("enabled", "enabled", FieldKind::Boolean),
        FieldMapping::new("endpoint_uri", "endpointUri", FieldKind::String),
        FieldMapping::new("timeout", "timeout", FieldKind::Duration),
    ];

    fn field(&self, property: &str) -> Option<FieldValue> {
        match property {
            "api_versions" => self.api_versions.clone().map(FieldValue::StringList),
            "enabled" => self.enabled.map(FieldValue::Boolean),
            "endpoint_uri" => self.endpoint_uri.clone().map(FieldValue::String),
            "timeout" => self.timeout.map(FieldValue::Duration),
            _ => None,
        }
    }

    fn set_field(&mut self, property: &str, value: FieldValue) {
        match (property, value) {
            ("api_versions", FieldValue::StringList(value)) => self.api_versions = Some(value),
            ("enabled", FieldValue::Boolean(value)) => self.enabled = Some(value),
            ("endpoint_uri", FieldValue::String(value)) => self.endpoint_uri = Some(value),
            ("timeout", FieldValue::Duration(value)) => self.timeout = Some(value),
            _ => {}
        }
    }
}

providerhub_bindgen::impl_record_serde!(ResourceTypeEndpoint);

/*--- GENERATED END ---*/

use providerhub_bindgen::models::ResourceTypeExtension;

const ENDPOINT_JSON: &str = r#"{
    "apiVersions": ["2020-11-20", "2021-05-01-preview"],
    "enabled": true,
    "endpointUri": "https://contoso.example/endpoint",
    "timeout": "PT1M30S",
    "featuresRule": { "requiredFeaturesPolicy": "Any" }
  }"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let endpoint: ResourceTypeEndpoint = serde_json::from_str(ENDPOINT_JSON)?;

    assert_eq!(endpoint.enabled, Some(true));
    assert_eq!(
        endpoint.api_versions.as_ref().map(Vec::len),
        Some(2)
    );
    assert_eq!(endpoint.timeout, Some(Duration::from_secs(90)));

    let extension = ResourceTypeExtension::new(
        endpoint.endpoint_uri.clone(),
        Some(vec!["ResourceCreationValidate".to_owned()]),
        endpoint.timeout,
    );
    println!("{}", serde_json::to_string_pretty(&extension)?);
    print!("success!\n");
    Ok(())
}
