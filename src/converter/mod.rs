//! Converter module - Generates ConfigMap and Secret manifests from `.env` files.

mod env_file;

pub use env_file::*;
