//! The two-pass driver.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::{
    scan_manifests, Disposition, OutputWriter, Preview, ProcessError, ProcessOptions,
    ProcessReport,
};
use crate::index::{ConfigIndex, ConfigIndexBuilder};
use crate::manifest::{parse_documents, ManifestDocument, ParseError, ParsedStream};
use crate::serialize::encode;
use crate::workload::{MutationError, MutationOutcome, WorkloadMutator};

/// ManifestFile is a parsed manifest file.
#[derive(Debug)]
pub struct ManifestFile {
    pub path: PathBuf,
    pub stream: ParsedStream,
}

impl ManifestFile {
    /// Reads and parses a file. Only I/O failures are errors; documents that
    /// do not parse are collected in the stream, and a file that is not UTF-8
    /// becomes a stream holding that single error.
    pub fn load(path: &Path) -> Result<Self, ProcessError> {
        let bytes = fs::read(path).map_err(|source| ProcessError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let stream = match String::from_utf8(bytes) {
            Ok(content) => parse_documents(&content),
            Err(e) => ParsedStream {
                documents: Vec::new(),
                errors: vec![ParseError::from(e)],
            },
        };
        Ok(ManifestFile {
            path: path.to_path_buf(),
            stream,
        })
    }
}

/// DocumentResult is the outcome of visiting one document in pass 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentResult {
    /// Nothing was bound; the outcome may still carry warnings.
    Unchanged(MutationOutcome),
    Modified(MutationOutcome),
    Failed(MutationError),
}

/// Mutates each document independently; a failure on one document does not
/// stop the others.
pub fn mutate_documents(
    docs: &mut [ManifestDocument],
    mutator: &WorkloadMutator<'_>,
) -> Vec<DocumentResult> {
    docs.iter_mut()
        .map(|doc| match mutator.process(doc) {
            Ok(outcome) if outcome.is_modified() => DocumentResult::Modified(outcome),
            Ok(outcome) => DocumentResult::Unchanged(outcome),
            Err(e) => DocumentResult::Failed(e),
        })
        .collect()
}

/// Execution is everything a finished run produced.
#[derive(Debug)]
pub struct Execution {
    pub report: ProcessReport,
    pub index: ConfigIndex,
    /// Renderings of changed files, in dry-run mode only.
    pub previews: Vec<Preview>,
}

/// Processor runs both passes over the input directory.
#[derive(Debug)]
pub struct Processor {
    options: ProcessOptions,
    report: ProcessReport,
}

impl Processor {
    pub fn new(options: ProcessOptions) -> Self {
        Processor {
            options,
            report: ProcessReport::new(),
        }
    }

    /// Runs the whole pipeline.
    ///
    /// The index is complete before the first workload is touched, so a
    /// workload can use a ConfigMap or Secret declared in any file.
    pub fn execute(mut self) -> Result<Execution, ProcessError> {
        self.options.validate()?;

        let paths = scan_manifests(&self.options.input_dir)?;
        self.report.total_files = paths.len();
        info!(
            input = %self.options.input_dir.display(),
            files = paths.len(),
            mode = %self.options.mode,
            "found manifest files"
        );

        let mut files = Vec::with_capacity(paths.len());
        for path in &paths {
            files.push(self.load(path)?);
        }
        let index = build_index(&files);
        info!(
            config_maps = index.config_map_count(),
            secrets = index.secret_count(),
            "built config index"
        );

        let mutator = WorkloadMutator::new(&index);
        let writer = OutputWriter::new(&self.options);
        let mut previews = Vec::new();
        for file in files {
            if let Some(Disposition::Previewed(preview)) =
                self.process_file(file, &mutator, &writer)?
            {
                previews.push(preview);
            }
        }

        info!(
            processed = self.report.processed_files,
            updated = self.report.successful_updates,
            warnings = self.report.warnings.len(),
            errors = self.report.errors.len(),
            "processing finished"
        );
        Ok(Execution {
            report: self.report,
            index,
            previews,
        })
    }

    fn load(&mut self, path: &Path) -> Result<ManifestFile, ProcessError> {
        let file = ManifestFile::load(path)?;
        for err in &file.stream.errors {
            self.report
                .error(format!("failed to parse {}: {}", path.display(), err));
        }
        debug!(
            file = %path.display(),
            documents = file.stream.documents.len(),
            "parsed manifest file"
        );
        Ok(file)
    }

    /// Mutates one file's workloads and writes the file if anything changed.
    ///
    /// Returns None when the file produced no output.
    pub fn process_file(
        &mut self,
        mut file: ManifestFile,
        mutator: &WorkloadMutator<'_>,
        writer: &OutputWriter,
    ) -> Result<Option<Disposition>, ProcessError> {
        let path = file.path.display().to_string();
        let results = mutate_documents(&mut file.stream.documents, mutator);

        let mut updated = 0;
        for result in results {
            match result {
                DocumentResult::Modified(outcome) => {
                    updated += 1;
                    self.record_warnings(&path, outcome);
                }
                DocumentResult::Unchanged(outcome) => self.record_warnings(&path, outcome),
                DocumentResult::Failed(e) => self.report.error(format!("{}: {}", path, e)),
            }
        }

        if updated == 0 {
            return Ok(None);
        }
        if file.stream.has_errors() {
            self.report.warn(format!(
                "{}: not rewritten because some of its documents could not be parsed",
                path
            ));
            return Ok(None);
        }

        let rendered = match encode(&file.stream.documents, self.options.key_order) {
            Ok(rendered) => rendered,
            Err(e) => {
                self.report.error(format!("{}: {}", path, e));
                return Ok(None);
            }
        };

        self.report.successful_updates += updated;
        self.report.processed_files += 1;
        writer.write(&file.path, rendered).map(Some)
    }

    fn record_warnings(&mut self, path: &str, outcome: MutationOutcome) {
        for warning in outcome.warnings {
            self.report.warn(format!("{}: {}", path, warning));
        }
    }
}

/// Indexes the ConfigMaps and Secrets of every file.
pub fn build_index(files: &[ManifestFile]) -> ConfigIndex {
    let mut builder = ConfigIndexBuilder::new();
    for file in files {
        builder.add_documents(&file.stream.documents);
    }
    builder.build()
}
