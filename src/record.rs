//! Table-driven mapping between records and JSON documents.
//!
//! A record declares its fields once, in a static [`FieldMapping`] table
//! pairing each property with its wire key and [`FieldKind`]. The generic
//! [`to_document`] and [`from_document`] functions walk that table; records
//! themselves only expose their fields by name through [`Record::field`] and
//! [`Record::set_field`].

use crate::duration;
use crate::error::{ModelError, Result};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::trace;

/// Wire representation of a record.
pub type Document = Map<String, Value>;

/// Post-construction callback. Constructors run it after assigning their
/// arguments; [`from_document_with`] runs it before applying the document.
pub type InitHook<R> = fn(&mut R);

/// The default [`InitHook`].
pub fn noop_init<R>(_: &mut R) {}

/// Declared type of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    String,
    StringList,
    /// Written as an ISO-8601 duration string.
    Duration,
    Boolean,
    Integer,
}

impl FieldKind {
    fn describe(self) -> &'static str {
        match self {
            FieldKind::String | FieldKind::Duration => "a string",
            FieldKind::StringList => "an array of strings",
            FieldKind::Boolean => "a boolean",
            FieldKind::Integer => "an integer",
        }
    }

    /// Decodes the JSON value found under `key` into a value of this kind.
    pub fn decode(self, key: &str, value: &Value) -> Result<FieldValue> {
        match (self, value) {
            (FieldKind::String, Value::String(s)) => Ok(FieldValue::String(s.clone())),
            (FieldKind::StringList, Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(ModelError::malformed(
                        format!("{}[{}]", key, i),
                        format!("expected a string, found {}", describe_json(other)),
                    )),
                })
                .collect::<Result<Vec<_>>>()
                .map(FieldValue::StringList),
            (FieldKind::Duration, Value::String(s)) => duration::parse(s)
                .map(FieldValue::Duration)
                .map_err(|e| ModelError::malformed(key, e.to_string())),
            (FieldKind::Boolean, Value::Bool(b)) => Ok(FieldValue::Boolean(*b)),
            (FieldKind::Integer, Value::Number(n)) => n
                .as_i64()
                .map(FieldValue::Integer)
                .ok_or_else(|| ModelError::malformed(key, format!("{} is not a 64-bit integer", n))),
            (kind, other) => Err(ModelError::malformed(
                key,
                format!("expected {}, found {}", kind.describe(), describe_json(other)),
            )),
        }
    }
}

fn describe_json(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// The value of one set field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    StringList(Vec<String>),
    Duration(Duration),
    Boolean(bool),
    Integer(i64),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::String(_) => FieldKind::String,
            FieldValue::StringList(_) => FieldKind::StringList,
            FieldValue::Duration(_) => FieldKind::Duration,
            FieldValue::Boolean(_) => FieldKind::Boolean,
            FieldValue::Integer(_) => FieldKind::Integer,
        }
    }

    pub fn into_json(self) -> Value {
        match self {
            FieldValue::String(s) => Value::String(s),
            FieldValue::StringList(items) => {
                Value::Array(items.into_iter().map(Value::String).collect())
            }
            FieldValue::Duration(d) => Value::String(duration::format(d)),
            FieldValue::Boolean(b) => Value::Bool(b),
            FieldValue::Integer(i) => Value::from(i),
        }
    }
}

/// One row of a record's mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    /// Property name as passed to [`Record::field`].
    pub property: &'static str,
    /// Key used in the JSON document.
    pub wire_key: &'static str,
    pub kind: FieldKind,
}

impl FieldMapping {
    pub const fn new(property: &'static str, wire_key: &'static str, kind: FieldKind) -> Self {
        Self {
            property,
            wire_key,
            kind,
        }
    }
}

/// A plain data holder whose fields are all optional.
pub trait Record: Sized {
    /// Field-to-wire-key mapping, in serialization order.
    const FIELDS: &'static [FieldMapping];

    /// Returns the value of `property`, or `None` when unset or unknown.
    fn field(&self, property: &str) -> Option<FieldValue>;

    /// Assigns `property`. Values of another kind than declared are ignored.
    fn set_field(&mut self, property: &str, value: FieldValue);

    fn to_document(&self) -> Document {
        to_document(self)
    }

    fn from_document(document: &Document) -> Result<Self>
    where
        Self: Default,
    {
        from_document(document)
    }
}

/// Builds the document for `record`. Unset fields are omitted.
pub fn to_document<R: Record>(record: &R) -> Document {
    let mut document = Document::new();
    for mapping in R::FIELDS {
        if let Some(value) = record.field(mapping.property) {
            debug_assert_eq!(value.kind(), mapping.kind, "{}", mapping.property);
            document.insert(mapping.wire_key.to_string(), value.into_json());
        }
    }
    document
}

/// Reads a record from `document` with the default init hook.
pub fn from_document<R: Record + Default>(document: &Document) -> Result<R> {
    from_document_with(document, noop_init)
}

/// Reads a record from `document`, running `init` on the empty record first.
///
/// Values from the document override whatever `init` assigned. Missing keys
/// and explicit `null` values leave a field as `init` left it, keys absent
/// from the mapping table are ignored.
pub fn from_document_with<R: Record + Default>(
    document: &Document,
    init: InitHook<R>,
) -> Result<R> {
    let mut record = R::default();
    init(&mut record);
    for mapping in R::FIELDS {
        match document.get(mapping.wire_key) {
            None | Some(Value::Null) => {}
            Some(value) => {
                let value = mapping.kind.decode(mapping.wire_key, value)?;
                record.set_field(mapping.property, value);
            }
        }
    }
    for key in document.keys() {
        if !R::FIELDS.iter().any(|m| m.wire_key == key.as_str()) {
            trace!(key = %key, "ignoring unknown key");
        }
    }
    Ok(record)
}

/// Like [`from_document`], for any JSON value. Non-objects are rejected.
pub fn from_value<R: Record + Default>(value: &Value) -> Result<R> {
    match value {
        Value::Object(document) => from_document(document),
        other => Err(ModelError::malformed(
            "$",
            format!("expected an object, found {}", describe_json(other)),
        )),
    }
}

/// Implements `serde::Serialize` and `serde::Deserialize` for a [`Record`]
/// by going through its document.
#[macro_export]
macro_rules! impl_record_serde {
    ($ty:ty) => {
        impl $crate::__private::serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                $crate::__private::serde::Serialize::serialize(
                    &$crate::record::to_document(self),
                    serializer,
                )
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                let document: $crate::record::Document =
                    $crate::__private::serde::Deserialize::deserialize(deserializer)?;
                $crate::record::from_document(&document)
                    .map_err(<D::Error as $crate::__private::serde::de::Error>::custom)
            }
        }
    };
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::ResourceProviderEndpoint;
    use serde_json::json;

    fn document(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_decode_each_kind() {
        assert_eq!(
            FieldKind::String.decode("k", &json!("v")),
            Ok(FieldValue::String("v".to_owned()))
        );
        assert_eq!(
            FieldKind::StringList.decode("k", &json!(["a", "b"])),
            Ok(FieldValue::StringList(vec!["a".to_owned(), "b".to_owned()]))
        );
        assert_eq!(
            FieldKind::Duration.decode("k", &json!("PT1M")),
            Ok(FieldValue::Duration(Duration::from_secs(60)))
        );
        assert_eq!(
            FieldKind::Boolean.decode("k", &json!(true)),
            Ok(FieldValue::Boolean(true))
        );
        assert_eq!(
            FieldKind::Integer.decode("k", &json!(-3)),
            Ok(FieldValue::Integer(-3))
        );
    }

    #[test]
    fn test_decode_reports_wire_key() {
        let err = FieldKind::StringList
            .decode("tags", &json!(["a", 1]))
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::MalformedDocument {
                key: "tags[1]".to_owned(),
                reason: "expected a string, found a number".to_owned(),
            }
        );

        let err = FieldKind::Integer.decode("count", &json!(1.5)).unwrap_err();
        assert!(matches!(err, ModelError::MalformedDocument { key, .. } if key == "count"));

        let err = FieldKind::String.decode("name", &json!({})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed document at `name`: expected a string, found an object"
        );
    }

    #[test]
    fn test_to_document_follows_table() {
        let endpoint = ResourceProviderEndpoint {
            enabled: Some(false),
            max_retries: Some(3),
            r#type: Some("Canary".to_owned()),
            ..Default::default()
        };
        assert_eq!(
            Value::Object(to_document(&endpoint)),
            json!({"enabled": false, "maxRetries": 3, "type": "Canary"})
        );
    }

    #[test]
    fn test_from_document_null_reads_as_unset() {
        let endpoint: ResourceProviderEndpoint =
            from_document(&document(json!({"enabled": null, "maxRetries": 5}))).unwrap();
        assert_eq!(endpoint.enabled, None);
        assert_eq!(endpoint.max_retries, Some(5));
    }

    #[test]
    fn test_from_document_with_applies_document_over_hook_defaults() {
        fn default_retries(endpoint: &mut ResourceProviderEndpoint) {
            if endpoint.max_retries.is_none() {
                endpoint.max_retries = Some(1);
            }
        }

        let endpoint: ResourceProviderEndpoint =
            from_document_with(&document(json!({})), default_retries).unwrap();
        assert_eq!(endpoint.max_retries, Some(1));

        let endpoint: ResourceProviderEndpoint =
            from_document_with(&document(json!({"maxRetries": 7})), default_retries).unwrap();
        assert_eq!(endpoint.max_retries, Some(7));
    }

    #[test]
    fn test_from_document_with_wire_value_wins_over_unconditional_hook() {
        fn ten_second_timeout(endpoint: &mut ResourceProviderEndpoint) {
            endpoint.timeout = Some(Duration::from_secs(10));
        }

        let endpoint: ResourceProviderEndpoint =
            from_document_with(&document(json!({"timeout": "PT20S"})), ten_second_timeout)
                .unwrap();
        assert_eq!(endpoint.timeout, Some(Duration::from_secs(20)));

        let endpoint: ResourceProviderEndpoint =
            from_document_with(&document(json!({"timeout": null})), ten_second_timeout).unwrap();
        assert_eq!(endpoint.timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        let err = from_value::<ResourceProviderEndpoint>(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, ModelError::MalformedDocument { key, .. } if key == "$"));
    }

    #[test]
    fn test_serde_bridge() {
        let endpoint: ResourceProviderEndpoint = serde_json::from_str(
            r#"{"apiVersions": ["2020-11-20"], "timeout": "00:00:30", "extra": {}}"#,
        )
        .unwrap();
        assert_eq!(endpoint.api_versions, Some(vec!["2020-11-20".to_owned()]));
        assert_eq!(endpoint.timeout, Some(Duration::from_secs(30)));
        assert_eq!(
            serde_json::to_value(&endpoint).unwrap(),
            json!({"apiVersions": ["2020-11-20"], "timeout": "PT30S"})
        );

        let err = serde_json::from_str::<ResourceProviderEndpoint>(r#"{"enabled": "yes"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("malformed document at `enabled`"));
    }
}
