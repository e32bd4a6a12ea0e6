//! Serialize module - Multi-document YAML output.

mod encoder;
mod key_order;

pub use encoder::*;
pub use key_order::*;
