//! Key ordering policies applied before encoding.

use std::fmt;
use std::str::FromStr;

use crate::value::{Map, Value};

const ROOT_KEYS: &[&str] = &[
    "apiVersion",
    "kind",
    "metadata",
    "type",
    "immutable",
    "spec",
    "data",
    "stringData",
    "binaryData",
];
const METADATA_KEYS: &[&str] = &["name", "namespace", "labels", "annotations"];
const WORKLOAD_SPEC_KEYS: &[&str] = &["replicas", "serviceName", "selector", "template"];
const TEMPLATE_KEYS: &[&str] = &["metadata", "spec"];
const CONTAINER_KEYS: &[&str] = &["name", "image", "command", "args", "ports", "env"];
const ENV_KEYS: &[&str] = &["name", "value", "valueFrom"];

/// KeyOrder selects how mapping keys are ordered on output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyOrder {
    /// Keys are written in the order they were read.
    #[default]
    Preserve,
    /// Well-known Kubernetes fields come first in their conventional order;
    /// other keys follow in the order they were read.
    Kubernetes,
}

impl KeyOrder {
    /// Returns a copy of a document root with this policy applied.
    ///
    /// Only positions change: the set of keys and every value stay the same.
    pub fn apply(&self, root: &Map, workload: bool) -> Map {
        match self {
            KeyOrder::Preserve => root.clone(),
            KeyOrder::Kubernetes => kubernetes_order(root, workload),
        }
    }
}

impl FromStr for KeyOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "preserve" => Ok(KeyOrder::Preserve),
            "kubernetes" => Ok(KeyOrder::Kubernetes),
            other => Err(format!(
                "unknown key order '{}', expected 'preserve' or 'kubernetes'",
                other
            )),
        }
    }
}

impl fmt::Display for KeyOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KeyOrder::Preserve => "preserve",
            KeyOrder::Kubernetes => "kubernetes",
        })
    }
}

/// Moves the `priority` keys that are present to the front, in that order.
fn reorder(map: &Map, priority: &[&str]) -> Map {
    let mut ordered = map.clone();
    ordered.move_to_front(priority);
    ordered
}

/// Reorders the map stored under `field`, if there is one.
fn reorder_child(map: &mut Map, field: &str, order: impl FnOnce(&Map) -> Map) {
    if let Some(Value::Map(child)) = map.get_mut(field) {
        *child = order(child);
    }
}

fn kubernetes_order(root: &Map, workload: bool) -> Map {
    let mut ordered = reorder(root, ROOT_KEYS);
    reorder_child(&mut ordered, "metadata", |m| reorder(m, METADATA_KEYS));
    if workload {
        reorder_child(&mut ordered, "spec", workload_spec_order);
    }
    ordered
}

fn workload_spec_order(spec: &Map) -> Map {
    let mut ordered = reorder(spec, WORKLOAD_SPEC_KEYS);
    reorder_child(&mut ordered, "template", |template| {
        let mut template = reorder(template, TEMPLATE_KEYS);
        reorder_child(&mut template, "metadata", |m| reorder(m, METADATA_KEYS));
        reorder_child(&mut template, "spec", |pod| {
            let mut pod = pod.clone();
            if let Some(Value::List(containers)) = pod.get_mut("containers") {
                for container in containers.iter_mut() {
                    if let Value::Map(c) = container {
                        *c = container_order(c);
                    }
                }
            }
            pod
        });
        template
    });
    ordered
}

fn container_order(container: &Map) -> Map {
    let mut ordered = reorder(container, CONTAINER_KEYS);
    if let Some(Value::List(env)) = ordered.get_mut("env") {
        for entry in env.iter_mut() {
            if let Value::Map(e) = entry {
                *e = reorder(e, ENV_KEYS);
            }
        }
    }
    ordered
}
