//! Index module - ConfigMap and Secret contents, keyed by namespace and name.
//!
//! The index is filled through a [`ConfigIndexBuilder`] and frozen into a
//! read-only [`ConfigIndex`] before any workload is touched.

mod builder;
mod config_index;

pub use builder::*;
pub use config_index::*;
