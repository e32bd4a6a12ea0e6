//! Value module - In-memory representation of YAML documents.
//!
//! Manifests are parsed into this tree so that fields the processor does not
//! understand are carried through untouched.

mod value;

pub use value::*;
