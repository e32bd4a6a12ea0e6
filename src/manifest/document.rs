//! A single manifest document.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use super::ResourceKind;
use crate::value::{Map, Value};

/// Namespace assumed for documents that do not set `metadata.namespace`.
pub const DEFAULT_NAMESPACE: &str = "default";

/// ParseError is raised for a document that cannot be turned into a manifest,
/// or for a whole file whose bytes are not text.
///
/// `index` is the 1-based position of the document within its stream.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("document {index}: invalid YAML: {source}")]
    Yaml {
        index: usize,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("document {index}: expected a mapping at the top level, got {found}")]
    NotAMapping { index: usize, found: &'static str },

    #[error("file is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// ManifestDocument is one YAML document of a manifest file.
///
/// The whole document is kept as an ordered [`Map`]; accessors read the known
/// fields on demand, so anything else in the document is serialized back
/// exactly as it was parsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ManifestDocument {
    root: Map,
}

impl ManifestDocument {
    /// Wraps an already-parsed top-level mapping.
    pub fn from_map(root: Map) -> Self {
        ManifestDocument { root }
    }

    /// Wraps a parsed value, which must be a mapping.
    pub fn from_value(value: Value, index: usize) -> Result<Self, ParseError> {
        match value {
            Value::Map(root) => Ok(ManifestDocument { root }),
            other => Err(ParseError::NotAMapping {
                index,
                found: other.type_name(),
            }),
        }
    }

    /// Parses a single YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ParseError> {
        let value: Value =
            serde_yaml::from_str(yaml).map_err(|source| ParseError::Yaml { index: 1, source })?;
        Self::from_value(value, 1)
    }

    pub fn root(&self) -> &Map {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Map {
        &mut self.root
    }

    pub fn into_value(self) -> Value {
        Value::Map(self.root)
    }

    fn str_field(&self, path: &[&str]) -> &str {
        self.root
            .lookup(path)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// The `apiVersion` field, or an empty string.
    pub fn api_version(&self) -> &str {
        self.str_field(&["apiVersion"])
    }

    pub fn kind(&self) -> ResourceKind {
        ResourceKind::parse(self.str_field(&["kind"]))
    }

    /// The `metadata.name` field, or an empty string.
    pub fn name(&self) -> &str {
        self.str_field(&["metadata", "name"])
    }

    /// The `metadata.namespace` field, falling back to [`DEFAULT_NAMESPACE`].
    pub fn namespace(&self) -> &str {
        match self.str_field(&["metadata", "namespace"]) {
            "" => DEFAULT_NAMESPACE,
            ns => ns,
        }
    }

    /// Identifies the resource in diagnostics as `namespace/name`.
    pub fn resource_id(&self) -> String {
        format!("{}/{}", self.namespace(), self.name())
    }

    /// The `data` field as string pairs, if it is present and a mapping.
    pub fn data(&self) -> Option<BTreeMap<String, String>> {
        self.string_map("data")
    }

    /// The `stringData` field as string pairs, if it is present and a mapping.
    pub fn string_data(&self) -> Option<BTreeMap<String, String>> {
        self.string_map("stringData")
    }

    // Scalars are stringified; nested values are not valid config data and are dropped.
    fn string_map(&self, field: &str) -> Option<BTreeMap<String, String>> {
        let map = self.root.get(field)?.as_map()?;
        Some(
            map.iter()
                .filter_map(|(key, value)| Some((key.clone(), value.to_scalar_string()?)))
                .collect(),
        )
    }

    pub fn spec(&self) -> Option<&Value> {
        self.root.get("spec")
    }

    pub fn spec_mut(&mut self) -> Option<&mut Value> {
        self.root.get_mut("spec")
    }
}
