//! Run options.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::ProcessError;
use crate::serialize::KeyOrder;

/// Output directory used in safe mode when none is given.
pub const DEFAULT_OUTPUT_DIR: &str = "./processed";

/// OutputMode decides where rewritten files go. It is chosen once per run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Write to the output directory, mirroring the input layout.
    #[default]
    Safe,
    /// Replace the source files.
    Overwrite,
    /// Write nothing; return previews instead.
    DryRun,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "safe" => Ok(OutputMode::Safe),
            "overwrite" => Ok(OutputMode::Overwrite),
            "dry-run" => Ok(OutputMode::DryRun),
            other => Err(format!(
                "unknown mode '{}', expected 'safe', 'overwrite' or 'dry-run'",
                other
            )),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputMode::Safe => "safe",
            OutputMode::Overwrite => "overwrite",
            OutputMode::DryRun => "dry-run",
        })
    }
}

/// ProcessOptions configures a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOptions {
    pub input_dir: PathBuf,
    /// Only used in safe mode.
    pub output_dir: PathBuf,
    pub mode: OutputMode,
    pub key_order: KeyOrder,
}

impl ProcessOptions {
    /// Creates options for a safe-mode run into [`DEFAULT_OUTPUT_DIR`].
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        ProcessOptions {
            input_dir: input_dir.into(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            mode: OutputMode::default(),
            key_order: KeyOrder::default(),
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_key_order(mut self, key_order: KeyOrder) -> Self {
        self.key_order = key_order;
        self
    }

    /// Checks that the input directory exists and is a directory.
    pub fn validate(&self) -> Result<(), ProcessError> {
        if !self.input_dir.exists() {
            return Err(ProcessError::InputNotFound(self.input_dir.clone()));
        }
        if !self.input_dir.is_dir() {
            return Err(ProcessError::NotADirectory(self.input_dir.clone()));
        }
        Ok(())
    }
}
