//! Output disposition of rewritten files.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::{OutputMode, ProcessError, ProcessOptions};

/// Preview is the dry-run stand-in for a write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    /// The file the rendering was produced from.
    pub source: PathBuf,
    pub rendered: String,
}

/// Disposition reports what happened to a rendered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    Written(PathBuf),
    Previewed(Preview),
}

/// OutputWriter places rendered files according to the run's [`OutputMode`].
#[derive(Debug, Clone)]
pub struct OutputWriter {
    mode: OutputMode,
    input_root: PathBuf,
    output_root: PathBuf,
}

impl OutputWriter {
    pub fn new(options: &ProcessOptions) -> Self {
        OutputWriter {
            mode: options.mode,
            input_root: options.input_dir.clone(),
            output_root: options.output_dir.clone(),
        }
    }

    /// Returns where a rendering of `source` would be written, or None in
    /// dry-run mode.
    ///
    /// In safe mode the path relative to the input root is rebased onto the
    /// output root; a source outside the input root keeps only its file name.
    pub fn target_path(&self, source: &Path) -> Option<PathBuf> {
        match self.mode {
            OutputMode::Safe => {
                let relative = source
                    .strip_prefix(&self.input_root)
                    .ok()
                    .map(Path::to_path_buf)
                    .or_else(|| source.file_name().map(PathBuf::from))
                    .unwrap_or_else(|| source.to_path_buf());
                Some(self.output_root.join(relative))
            }
            OutputMode::Overwrite => Some(source.to_path_buf()),
            OutputMode::DryRun => None,
        }
    }

    /// Writes or previews the rendering of `source`.
    pub fn write(&self, source: &Path, rendered: String) -> Result<Disposition, ProcessError> {
        let Some(target) = self.target_path(source) else {
            return Ok(Disposition::Previewed(Preview {
                source: source.to_path_buf(),
                rendered,
            }));
        };

        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ProcessError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&target, rendered).map_err(|source| ProcessError::Write {
            path: target.clone(),
            source,
        })?;
        info!(source = %source.display(), target = %target.display(), "wrote manifest");
        Ok(Disposition::Written(target))
    }
}
