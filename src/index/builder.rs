//! Builder for the configuration index.

use tracing::debug;

use super::{ConfigIndex, NamespacedObjects};
use crate::manifest::{ManifestDocument, ResourceKind};

/// ConfigIndexBuilder collects ConfigMaps and Secrets from parsed documents.
///
/// Documents may be added in any order and from any number of files; the
/// finished index is obtained with [`ConfigIndexBuilder::build`].
#[derive(Debug, Default)]
pub struct ConfigIndexBuilder {
    config_maps: NamespacedObjects,
    secrets: NamespacedObjects,
}

impl ConfigIndexBuilder {
    /// Creates a new empty ConfigIndexBuilder.
    pub fn new() -> Self {
        ConfigIndexBuilder::default()
    }

    /// Adds every ConfigMap and Secret among the given documents.
    pub fn add_documents<'a>(&mut self, docs: impl IntoIterator<Item = &'a ManifestDocument>) {
        for doc in docs {
            self.add_document(doc);
        }
    }

    /// Adds a single document. Documents of other kinds are ignored.
    ///
    /// A ConfigMap with a non-empty `data` replaces any earlier ConfigMap of the
    /// same namespace and name. A Secret always gets an entry; its `stringData`
    /// is inserted first and its `data` merged over it, so `data` wins when a
    /// key appears in both.
    pub fn add_document(&mut self, doc: &ManifestDocument) {
        match doc.kind() {
            ResourceKind::ConfigMap => {
                let Some(data) = doc.data().filter(|data| !data.is_empty()) else {
                    return;
                };
                debug!(
                    namespace = doc.namespace(),
                    name = doc.name(),
                    keys = data.len(),
                    "indexed ConfigMap"
                );
                self.config_maps
                    .entry(doc.namespace().to_string())
                    .or_default()
                    .insert(doc.name().to_string(), data);
            }
            ResourceKind::Secret => {
                let bucket = self
                    .secrets
                    .entry(doc.namespace().to_string())
                    .or_default()
                    .entry(doc.name().to_string())
                    .or_default();
                if let Some(string_data) = doc.string_data() {
                    *bucket = string_data;
                }
                if let Some(data) = doc.data() {
                    bucket.extend(data);
                }
                debug!(
                    namespace = doc.namespace(),
                    name = doc.name(),
                    keys = bucket.len(),
                    "indexed Secret"
                );
            }
            _ => {}
        }
    }

    /// Freezes the collected objects into a read-only index.
    pub fn build(self) -> ConfigIndex {
        ConfigIndex {
            config_maps: self.config_maps,
            secrets: self.secrets,
        }
    }
}
