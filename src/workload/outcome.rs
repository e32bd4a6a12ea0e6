//! Results of mutating a single workload.

use std::fmt;

use thiserror::Error;

use crate::index::SourceKind;

/// EnvBinding records one environment variable that was bound to an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvBinding {
    pub container: String,
    pub variable: String,
    pub object_name: String,
    pub source: SourceKind,
}

/// MutationWarning is a non-fatal condition found while walking a workload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationWarning {
    /// A field on the path to the container env lists is absent.
    MissingField {
        kind: String,
        resource: String,
        field: String,
    },
    /// No ConfigMap or Secret provides the variable.
    Unresolved {
        kind: String,
        resource: String,
        container: String,
        variable: String,
    },
}

impl fmt::Display for MutationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationWarning::MissingField {
                kind,
                resource,
                field,
            } => write!(f, "{} {} has no {} field", kind, resource, field),
            MutationWarning::Unresolved {
                kind,
                resource,
                container,
                variable,
            } => write!(
                f,
                "no ConfigMap or Secret provides {} for container '{}' of {} {}",
                variable, container, kind, resource
            ),
        }
    }
}

/// MutationOutcome is the result of processing one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationOutcome {
    pub bindings: Vec<EnvBinding>,
    pub warnings: Vec<MutationWarning>,
}

impl MutationOutcome {
    /// Returns true if at least one env entry was rewritten.
    pub fn is_modified(&self) -> bool {
        !self.bindings.is_empty()
    }
}

/// MutationError is raised when a recognized field has an unexpected shape.
///
/// The document it refers to is left exactly as it was parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    #[error("{kind} {resource}: {field} must be a {expected}, found {found}")]
    InvalidShape {
        kind: String,
        resource: String,
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}
