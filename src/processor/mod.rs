//! Processor module - Runs the two passes over a directory of manifests.
//!
//! Pass 1 reads and parses every manifest file and indexes its ConfigMaps and
//! Secrets. Pass 2 mutates the workloads of the same parsed files against the
//! frozen index and hands changed files to the [`OutputWriter`].

mod error;
mod options;
mod processor;
mod report;
mod scanner;
mod writer;

#[cfg(test)]
mod processor_test;

pub use error::*;
pub use options::*;
pub use processor::*;
pub use report::*;
pub use scanner::*;
pub use writer::*;
