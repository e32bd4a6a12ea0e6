//! The frozen configuration index.

use std::collections::BTreeMap;
use std::fmt;

/// Key/value pairs of one ConfigMap or Secret.
pub type ConfigData = BTreeMap<String, String>;

/// Objects of one kind: namespace -> object name -> data.
pub type NamespacedObjects = BTreeMap<String, BTreeMap<String, ConfigData>>;

/// SourceKind identifies which kind of object a value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceKind {
    ConfigMap,
    Secret,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::ConfigMap => "ConfigMap",
            SourceKind::Secret => "Secret",
        }
    }

    /// The `valueFrom` field that references this kind of object.
    pub fn key_ref_field(&self) -> &'static str {
        match self {
            SourceKind::ConfigMap => "configMapKeyRef",
            SourceKind::Secret => "secretKeyRef",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ConfigIndex is a read-only view of every ConfigMap and Secret of a run.
///
/// It can only be obtained from [`ConfigIndexBuilder::build`](super::ConfigIndexBuilder::build).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigIndex {
    pub(super) config_maps: NamespacedObjects,
    pub(super) secrets: NamespacedObjects,
}

impl ConfigIndex {
    /// Returns the data of a ConfigMap.
    pub fn config_map(&self, namespace: &str, name: &str) -> Option<&ConfigData> {
        self.config_maps.get(namespace)?.get(name)
    }

    /// Returns the merged stringData/data of a Secret.
    pub fn secret(&self, namespace: &str, name: &str) -> Option<&ConfigData> {
        self.secrets.get(namespace)?.get(name)
    }

    /// Returns the data of an object of the given kind.
    pub fn lookup(&self, kind: SourceKind, namespace: &str, name: &str) -> Option<&ConfigData> {
        match kind {
            SourceKind::ConfigMap => self.config_map(namespace, name),
            SourceKind::Secret => self.secret(namespace, name),
        }
    }

    /// Returns a single value, e.g. the effective value of a Secret key.
    pub fn value(&self, kind: SourceKind, namespace: &str, name: &str, key: &str) -> Option<&str> {
        self.lookup(kind, namespace, name)?
            .get(key)
            .map(String::as_str)
    }

    pub fn config_map_count(&self) -> usize {
        self.config_maps.values().map(BTreeMap::len).sum()
    }

    pub fn secret_count(&self) -> usize {
        self.secrets.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.config_map_count() == 0 && self.secret_count() == 0
    }

    /// Iterates over every indexed object as `(kind, namespace, name, data)`,
    /// ConfigMaps first, each group ordered by namespace then name.
    pub fn objects(&self) -> impl Iterator<Item = (SourceKind, &str, &str, &ConfigData)> {
        flatten(SourceKind::ConfigMap, &self.config_maps)
            .chain(flatten(SourceKind::Secret, &self.secrets))
    }
}

fn flatten(
    kind: SourceKind,
    objects: &NamespacedObjects,
) -> impl Iterator<Item = (SourceKind, &str, &str, &ConfigData)> {
    objects.iter().flat_map(move |(namespace, by_name)| {
        by_name
            .iter()
            .map(move |(name, data)| (kind, namespace.as_str(), name.as_str(), data))
    })
}

impl fmt::Display for ConfigIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Config index: {} ConfigMap(s), {} Secret(s)",
            self.config_map_count(),
            self.secret_count()
        )?;
        for (kind, namespace, name, data) in self.objects() {
            writeln!(f, "  {} {}/{}", kind, namespace, name)?;
            for (key, value) in data {
                match kind {
                    SourceKind::ConfigMap => writeln!(f, "    {}: {}", key, value)?,
                    SourceKind::Secret => writeln!(f, "    {}: <redacted>", key)?,
                }
            }
        }
        Ok(())
    }
}
