// Copyright (c) Facebook, Inc. and its affiliates
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::BTreeMap;

/// Code generation options.
#[derive(Clone, Debug)]
pub struct CodeGeneratorConfig {
    pub(crate) module_name: String,
    pub(crate) crate_path: String,
    pub(crate) external_definitions: ExternalDefinitions,
    pub(crate) comments: DocComments,
}

/// Track types definitions provided by external modules.
pub type ExternalDefinitions =
    std::collections::BTreeMap</* module */ String, /* type names */ Vec<String>>;

/// Track documentation to be attached to particular definitions.
pub type DocComments =
    std::collections::BTreeMap</* qualified name */ Vec<String>, /* comment */ String>;

/// Path generated code uses to reach the record types.
pub const DEFAULT_CRATE_PATH: &str = "providerhub_bindgen";

impl CodeGeneratorConfig {
    /// Default config for the given module name.
    pub fn new(module_name: String) -> Self {
        Self {
            module_name,
            crate_path: DEFAULT_CRATE_PATH.to_string(),
            external_definitions: BTreeMap::new(),
            comments: BTreeMap::new(),
        }
    }

    /// Where the record types live, e.g. `crate` when generating into this crate.
    pub fn with_crate_path(mut self, crate_path: String) -> Self {
        self.crate_path = crate_path;
        self
    }

    /// Container names provided by external modules.
    pub fn with_external_definitions(mut self, external_definitions: ExternalDefinitions) -> Self {
        self.external_definitions = external_definitions;
        self
    }

    /// Comments attached to particular entity.
    pub fn with_comments(mut self, mut comments: DocComments) -> Self {
        // Make sure comments end with a (single) newline.
        for comment in comments.values_mut() {
            *comment = format!("{}\n", comment.trim());
        }
        self.comments = comments;
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_comments_end_with_single_newline() {
        let mut comments = DocComments::new();
        comments.insert(
            vec!["models".to_owned(), "Endpoint".to_owned()],
            "  An endpoint.\n\n\n".to_owned(),
        );
        let config = CodeGeneratorConfig::new("models".to_owned()).with_comments(comments);
        assert_eq!(
            config.comments.values().next().map(String::as_str),
            Some("An endpoint.\n")
        );
        assert_eq!(config.crate_path, DEFAULT_CRATE_PATH);
    }
}
