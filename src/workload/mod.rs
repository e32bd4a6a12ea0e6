//! Workload module - Binds unset container environment variables.
//!
//! The mutator walks `spec.template.spec.containers[*].env` of Deployments,
//! StatefulSets and DaemonSets and turns every entry that has a name but no
//! `value` or `valueFrom` into a `configMapKeyRef` or `secretKeyRef`.

mod mutator;
mod outcome;


pub use mutator::*;
pub use outcome::*;
