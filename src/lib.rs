//! Typed ProviderHub model records and a generator for them.
//!
//! ## Quick Start
//!
//! Every model is a plain struct with optional fields. A static mapping table
//! pairs each field with its JSON key, and the record layer uses that table to
//! convert the model to and from a JSON document:
//!
//! ```
//! use providerhub_bindgen::models::ResourceTypeExtension;
//! use providerhub_bindgen::record::Record;
//! use std::time::Duration;
//!
//! let ext = ResourceTypeExtension::new(
//!     Some("https://contoso.example/extension".to_owned()),
//!     Some(vec!["ResourceReadValidate".to_owned()]),
//!     Some(Duration::from_secs(20)),
//! );
//! assert_eq!(
//!     serde_json::to_string(&ext).unwrap(),
//!     r#"{"endpointUri":"https://contoso.example/extension","extensionCategories":["ResourceReadValidate"],"timeout":"PT20S"}"#
//! );
//!
//! // Unset fields are left out, unknown keys are ignored.
//! let back: ResourceTypeExtension =
//!     serde_json::from_str(r#"{"endpointUri":"x","unused":123}"#).unwrap();
//! assert_eq!(back.endpoint_uri.as_deref(), Some("x"));
//! assert!(back.timeout.is_none());
//! assert_eq!(back.to_document().len(), 1);
//! ```
//!
//! ## Generating models
//!
//! Models are produced from the `definitions` section of an API description
//! by the `modelgen` tool:
//!
//! ```bash
//! cargo run --bin modelgen -- tests/fixtures/providerhub-definitions.json > models.rs
//! ```
//!
//! Supported property types are `string`, `string` with `format: duration`,
//! `boolean`, `integer` and arrays of strings. The generated module depends on
//! this crate for the record layer; pass `--crate-path` to change how it is
//! referenced.
//!
//! The quickstart demo exercises a generated model end to end:
//!
//! ```bash
//! cargo run --example quickstart
//! ```

// definitions document reader and registry export
pub mod definition;

// code generator
pub mod emit;

// configuration support for code generation
pub mod config;

// ISO-8601 duration text codec
pub mod duration;

// record and generator errors
pub mod error;

// generated ProviderHub models
pub mod models;

// table-driven mapping between records and documents
pub mod record;

/// Generated model used to test the generator and the record layer.
#[doc(hidden)]
pub mod test_utils;

#[doc(hidden)]
pub mod __private {
    pub use serde;
}
