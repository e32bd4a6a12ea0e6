//! Resource kinds recognized by the processor.

use std::fmt;

/// ResourceKind is the `kind` of a manifest document.
///
/// Kinds the processor does not act on are kept as [`ResourceKind::Other`] so
/// that they still round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    ConfigMap,
    Secret,
    Deployment,
    StatefulSet,
    DaemonSet,
    Other(String),
}

impl ResourceKind {
    /// Parses a `kind` field. Matching is exact, as in the Kubernetes API.
    pub fn parse(kind: &str) -> Self {
        match kind {
            "ConfigMap" => ResourceKind::ConfigMap,
            "Secret" => ResourceKind::Secret,
            "Deployment" => ResourceKind::Deployment,
            "StatefulSet" => ResourceKind::StatefulSet,
            "DaemonSet" => ResourceKind::DaemonSet,
            other => ResourceKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ResourceKind::ConfigMap => "ConfigMap",
            ResourceKind::Secret => "Secret",
            ResourceKind::Deployment => "Deployment",
            ResourceKind::StatefulSet => "StatefulSet",
            ResourceKind::DaemonSet => "DaemonSet",
            ResourceKind::Other(kind) => kind,
        }
    }

    /// Returns true for kinds that carry a pod template.
    pub fn is_workload(&self) -> bool {
        matches!(
            self,
            ResourceKind::Deployment | ResourceKind::StatefulSet | ResourceKind::DaemonSet
        )
    }

    /// Returns true for ConfigMap and Secret.
    pub fn is_config_source(&self) -> bool {
        matches!(self, ResourceKind::ConfigMap | ResourceKind::Secret)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
