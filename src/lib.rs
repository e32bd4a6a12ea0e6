//! # k8sconfig-processor
//!
//! Binds unset container environment variables in Kubernetes manifests to
//! matching ConfigMap and Secret keys.
//!
//! A variable declared as `{name: DB_HOST}` with no `value` or `valueFrom` is
//! looked up by naming convention: the object `db-host` in the workload's
//! namespace must contain the key `DB_HOST`. A matching ConfigMap wins over a
//! matching Secret, and the entry gains a `configMapKeyRef` or `secretKeyRef`.
//!
//! ## Modules
//!
//! - [`value`] - In-memory representation of YAML documents
//! - [`manifest`] - Manifest documents and multi-document streams
//! - [`index`] - ConfigMap and Secret contents by namespace and name
//! - [`resolve`] - Naming-convention lookup of environment variables
//! - [`workload`] - Rewriting of workload container env lists
//! - [`serialize`] - Multi-document YAML output with key ordering policies
//! - [`processor`] - Directory scanning, the two passes, output modes and reporting
//! - [`converter`] - ConfigMap and Secret generation from `.env` files

pub mod converter;
pub mod index;
pub mod manifest;
pub mod processor;
pub mod resolve;
pub mod serialize;
pub mod value;
pub mod workload;

pub use index::{ConfigIndex, ConfigIndexBuilder, SourceKind};
pub use manifest::{ManifestDocument, ResourceKind};
pub use processor::{OutputMode, ProcessOptions, ProcessReport, Processor};
pub use resolve::{resolve, Resolution};
pub use serialize::{encode, KeyOrder};
pub use value::Value;
pub use workload::{MutationOutcome, WorkloadMutator};
