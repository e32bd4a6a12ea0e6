//! The workload mutator.

use tracing::debug;

use super::{EnvBinding, MutationError, MutationOutcome, MutationWarning};
use crate::index::ConfigIndex;
use crate::manifest::ManifestDocument;
use crate::resolve::resolve;
use crate::value::{Map, Value};

/// WorkloadMutator rewrites workload documents against a frozen index.
#[derive(Debug, Clone, Copy)]
pub struct WorkloadMutator<'a> {
    index: &'a ConfigIndex,
}

/// Identifies the document being walked, for diagnostics.
struct Resource {
    kind: String,
    id: String,
}

impl Resource {
    fn missing(&self, field: &str) -> MutationWarning {
        MutationWarning::MissingField {
            kind: self.kind.clone(),
            resource: self.id.clone(),
            field: field.to_string(),
        }
    }

    fn invalid(&self, field: &str, expected: &'static str, found: &Value) -> MutationError {
        MutationError::InvalidShape {
            kind: self.kind.clone(),
            resource: self.id.clone(),
            field: field.to_string(),
            expected,
            found: found.type_name(),
        }
    }
}

/// Returns the child mapping at `field`; None if it is absent or null.
fn child_map<'v>(
    parent: &'v mut Map,
    field: &str,
    path: &str,
    resource: &Resource,
) -> Result<Option<&'v mut Map>, MutationError> {
    match parent.get_mut(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Map(map)) => Ok(Some(map)),
        Some(other) => Err(resource.invalid(path, "mapping", other)),
    }
}

/// Returns the child sequence at `field`; None if it is absent or null.
fn child_list<'v>(
    parent: &'v mut Map,
    field: &str,
    path: &str,
    resource: &Resource,
) -> Result<Option<&'v mut Vec<Value>>, MutationError> {
    match parent.get_mut(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::List(list)) => Ok(Some(list)),
        Some(other) => Err(resource.invalid(path, "sequence", other)),
    }
}

/// Returns the variable name if the entry has a name but neither `value` nor
/// `valueFrom`. Entries that already carry a value are never rebound.
fn unset_variable(entry: &Map) -> Option<String> {
    let name = entry.get("name")?.as_str()?;
    if entry.has("value") || entry.has("valueFrom") {
        return None;
    }
    Some(name.to_string())
}

impl<'a> WorkloadMutator<'a> {
    /// Creates a mutator that resolves variables against `index`.
    pub fn new(index: &'a ConfigIndex) -> Self {
        WorkloadMutator { index }
    }

    /// Processes one document.
    ///
    /// Documents that are not workloads are returned unmodified without
    /// warnings. A missing template, pod spec or container list yields a
    /// warning and no change. If any recognized field has the wrong shape the
    /// document is left untouched and an error is returned.
    pub fn process(&self, doc: &mut ManifestDocument) -> Result<MutationOutcome, MutationError> {
        let kind = doc.kind();
        if !kind.is_workload() {
            return Ok(MutationOutcome::default());
        }

        let resource = Resource {
            kind: kind.to_string(),
            id: doc.resource_id(),
        };
        let namespace = doc.namespace().to_string();

        // Edit a copy so that a shape error halfway through leaves nothing behind.
        let mut root = doc.root().clone();
        let outcome = self.bind_containers(&mut root, &namespace, &resource)?;
        if outcome.is_modified() {
            *doc.root_mut() = root;
        }
        Ok(outcome)
    }

    fn bind_containers(
        &self,
        root: &mut Map,
        namespace: &str,
        resource: &Resource,
    ) -> Result<MutationOutcome, MutationError> {
        let mut outcome = MutationOutcome::default();

        let path = [
            ("spec", "spec"),
            ("template", "spec.template"),
            ("spec", "spec.template.spec"),
        ];
        let mut current = root;
        for (field, full_path) in path {
            match child_map(current, field, full_path, resource)? {
                Some(child) => current = child,
                None => {
                    outcome.warnings.push(resource.missing(full_path));
                    return Ok(outcome);
                }
            }
        }

        let containers_path = "spec.template.spec.containers";
        let Some(containers) = child_list(current, "containers", containers_path, resource)? else {
            outcome.warnings.push(resource.missing(containers_path));
            return Ok(outcome);
        };

        for (i, container) in containers.iter_mut().enumerate() {
            let Some(container) = container.as_map_mut() else {
                continue;
            };
            let container_name = container
                .get("name")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("#{}", i));

            let env_path = format!("{}[{}].env", containers_path, i);
            let Some(env) = child_list(container, "env", &env_path, resource)? else {
                continue;
            };

            for entry in env.iter_mut() {
                let Some(entry) = entry.as_map_mut() else {
                    continue;
                };
                let Some(variable) = unset_variable(entry) else {
                    continue;
                };

                match resolve(&variable, namespace, self.index) {
                    Some(resolution) => {
                        let key_ref = Map::new()
                            .with("name", resolution.object_name.as_str())
                            .with("key", variable.as_str());
                        entry.set(
                            "valueFrom",
                            Map::new().with(resolution.source.key_ref_field(), key_ref),
                        );
                        debug!(
                            resource = %resource.id,
                            container = %container_name,
                            variable = %variable,
                            source = %resolution.source,
                            object = %resolution.object_name,
                            "bound environment variable"
                        );
                        outcome.bindings.push(EnvBinding {
                            container: container_name.clone(),
                            variable,
                            object_name: resolution.object_name,
                            source: resolution.source,
                        });
                    }
                    None => outcome.warnings.push(MutationWarning::Unresolved {
                        kind: resource.kind.clone(),
                        resource: resource.id.clone(),
                        container: container_name.clone(),
                        variable,
                    }),
                }
            }
        }

        Ok(outcome)
    }
}
