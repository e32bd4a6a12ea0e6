//! Manifest module - Kubernetes documents on top of the generic value tree.
//!
//! A [`ManifestDocument`] exposes typed accessors for the handful of fields the
//! processor reads (kind, metadata, data, stringData, spec) and keeps every
//! other field as an opaque [`Value`](crate::value::Value).

mod document;
mod kind;
mod stream;

pub use document::*;
pub use kind::*;
pub use stream::*;
