//! Maps an environment variable name to the ConfigMap or Secret that holds it.

use crate::index::{ConfigIndex, SourceKind};

/// Resolution names the object an environment variable is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub object_name: String,
    pub source: SourceKind,
}

/// Derives the object name expected to hold a variable: the name lowercased,
/// with every `_` replaced by `-` (`DB_HOST` -> `db-host`).
pub fn object_name_for(env_name: &str) -> String {
    env_name.to_lowercase().replace('_', "-")
}

/// Resolves an environment variable within a namespace.
///
/// The candidate object must contain a key equal to `env_name` exactly; only
/// the object name is normalized. A matching ConfigMap always wins over a
/// matching Secret.
pub fn resolve(env_name: &str, namespace: &str, index: &ConfigIndex) -> Option<Resolution> {
    let object_name = object_name_for(env_name);

    [SourceKind::ConfigMap, SourceKind::Secret]
        .into_iter()
        .find(|&kind| {
            index
                .lookup(kind, namespace, &object_name)
                .is_some_and(|data| data.contains_key(env_name))
        })
        .map(|source| Resolution {
            object_name,
            source,
        })
}
