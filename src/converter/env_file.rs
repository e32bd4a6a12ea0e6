//! `.env` parsing and manifest generation.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;
use thiserror::Error;

use crate::manifest::ManifestDocument;
use crate::value::{Map, Value};

/// ConvertError is raised when a `.env` file cannot become a manifest.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} contains no KEY=VALUE entries")]
    Empty(String),
}

/// TargetKind is the kind of manifest generated from a `.env` file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TargetKind {
    #[default]
    ConfigMap,
    Secret,
}

impl TargetKind {
    /// Suffix appended to the file stem to form a default resource name.
    pub fn name_suffix(&self) -> &'static str {
        match self {
            TargetKind::ConfigMap => "config",
            TargetKind::Secret => "secret",
        }
    }

    /// Suffix of the generated file name.
    pub fn file_suffix(&self) -> &'static str {
        match self {
            TargetKind::ConfigMap => "configmap",
            TargetKind::Secret => "secret",
        }
    }
}

impl FromStr for TargetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cm" | "configmap" => Ok(TargetKind::ConfigMap),
            "secret" => Ok(TargetKind::Secret),
            other => Err(format!("unknown resource type '{}', expected 'cm' or 'secret'", other)),
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TargetKind::ConfigMap => "cm",
            TargetKind::Secret => "secret",
        })
    }
}

/// Parses `.env` content.
///
/// Blank lines and `#` comments are skipped, as are lines without `=`. The
/// line is split at the first `=` and both sides are trimmed. Every leading
/// and trailing `"` or `'` is then stripped from the value, paired or not, so
/// `"abc'` becomes `abc`. A repeated key keeps its first position but takes
/// the last value.
pub fn parse_env_file(content: &str) -> IndexMap<String, String> {
    let mut vars = IndexMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
        vars.insert(key.trim().to_string(), value.to_string());
    }
    vars
}

/// Default resource name for a `.env` file: its stem plus `-config` or `-secret`.
pub fn default_resource_name(path: &Path, kind: TargetKind) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}-{}", stem, kind.name_suffix())
}

/// File name the generated manifest is saved under.
pub fn output_file_name(name: &str, kind: TargetKind) -> String {
    format!("{}-{}.yaml", name, kind.file_suffix())
}

/// Builds a ConfigMap (`data`) or an Opaque Secret (`stringData`, labelled with
/// the source file name) from parsed variables.
pub fn generate(
    kind: TargetKind,
    name: &str,
    source_file: &str,
    vars: &IndexMap<String, String>,
) -> Result<ManifestDocument, ConvertError> {
    if vars.is_empty() {
        return Err(ConvertError::Empty(source_file.to_string()));
    }

    let entries: Map = vars
        .iter()
        .map(|(key, value)| (key.clone(), Value::String(value.clone())))
        .collect();
    let root = match kind {
        TargetKind::ConfigMap => Map::new()
            .with("apiVersion", "v1")
            .with("kind", "ConfigMap")
            .with("metadata", Map::new().with("name", name))
            .with("data", entries),
        TargetKind::Secret => Map::new()
            .with("apiVersion", "v1")
            .with("kind", "Secret")
            .with(
                "metadata",
                Map::new()
                    .with("name", name)
                    .with("labels", Map::new().with("source-file", source_file)),
            )
            .with("type", "Opaque")
            .with("stringData", entries),
    };
    Ok(ManifestDocument::from_map(root))
}

/// Reads a `.env` file and builds its manifest.
pub fn convert_file(
    path: &Path,
    kind: TargetKind,
    name: Option<&str>,
) -> Result<ManifestDocument, ConvertError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConvertError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let source_file = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = name
        .map(str::to_string)
        .unwrap_or_else(|| default_resource_name(path, kind));
    generate(kind, &name, &source_file, &parse_env_file(&content))
}
