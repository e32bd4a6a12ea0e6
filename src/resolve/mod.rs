//! Resolve module - Naming-convention lookup of environment variables.

mod resolver;

pub use resolver::*;
