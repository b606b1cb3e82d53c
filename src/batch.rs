//! Directory batch processing.
//!
//! Every `*.pdf` in an input directory yields exactly one `<stem>.json` in the
//! output directory. Documents that cannot be summarized get the placeholder
//! record; write failures are reported and the batch moves on.

use std::any::Any;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::model::DocumentResult;
use crate::parser::ParseOptions;
use crate::render::{to_json, JsonFormat};

/// Input directory used when none is given.
pub const DEFAULT_INPUT_DIR: &str = "/app/input";

/// Output directory used when none is given.
pub const DEFAULT_OUTPUT_DIR: &str = "/app/output";

/// Options for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Directory scanned for PDFs
    pub input_dir: PathBuf,

    /// Directory receiving one JSON file per PDF
    pub output_dir: PathBuf,

    /// JSON layout of the written records
    pub format: JsonFormat,

    /// Extraction options applied to every document
    pub parse: ParseOptions,
}

impl BatchOptions {
    /// Create batch options for the given directories.
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            format: JsonFormat::Pretty,
            parse: ParseOptions::default(),
        }
    }

    /// Set JSON output format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Set extraction options.
    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR)
    }
}

/// What happened to one input document.
#[derive(Debug)]
pub enum BatchOutcome {
    /// A real summary was written.
    Summarized {
        /// Resolved title
        title: String,
        /// Number of outline entries
        entries: usize,
    },
    /// The document failed and the placeholder record was written.
    Placeholder {
        /// Why the document could not be summarized
        reason: String,
    },
    /// The record could not be written.
    WriteFailed {
        /// The write error
        error: Error,
    },
}

/// One input document and its fate.
#[derive(Debug)]
pub struct BatchEntry {
    /// The PDF that was read
    pub input: PathBuf,
    /// The JSON file that was (or should have been) written
    pub output: PathBuf,
    /// Result of processing
    pub outcome: BatchOutcome,
}

impl BatchEntry {
    /// Whether a record was written for this input.
    pub fn is_written(&self) -> bool {
        !matches!(self.outcome, BatchOutcome::WriteFailed { .. })
    }
}

/// Per-document results of a batch run, in sorted input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One entry per input PDF
    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    /// Number of processed inputs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no inputs were found.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of documents summarized successfully.
    pub fn summarized(&self) -> usize {
        self.count(|o| matches!(o, BatchOutcome::Summarized { .. }))
    }

    /// Number of documents that received the placeholder record.
    pub fn placeholders(&self) -> usize {
        self.count(|o| matches!(o, BatchOutcome::Placeholder { .. }))
    }

    /// Number of records that could not be written.
    pub fn write_failures(&self) -> usize {
        self.count(|o| matches!(o, BatchOutcome::WriteFailed { .. }))
    }

    fn count(&self, pred: impl Fn(&BatchOutcome) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.outcome)).count()
    }
}

/// List the PDFs of a directory, sorted by path.
///
/// Matches regular files whose extension is `pdf`, ignoring ASCII case.
pub fn collect_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf && path.is_file() {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}

/// Where the record for `input` goes.
pub fn output_path(output_dir: &Path, input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or(input.as_os_str());
    let mut name = stem.to_os_string();
    name.push(".json");
    output_dir.join(name)
}

/// Summarize every PDF in `options.input_dir`.
pub fn process_dir(options: &BatchOptions) -> Result<BatchReport> {
    process_dir_with_progress(options, |_| {})
}

/// Summarize every PDF in `options.input_dir`, calling `progress` once per
/// finished document.
///
/// Only failure to list the input directory or to create the output
/// directory is an error; everything else is recorded in the report.
pub fn process_dir_with_progress<F>(options: &BatchOptions, progress: F) -> Result<BatchReport>
where
    F: Fn(&BatchEntry) + Sync + Send,
{
    let inputs = collect_inputs(&options.input_dir)?;
    fs::create_dir_all(&options.output_dir)?;

    log::info!(
        "Processing {} PDFs from {} into {}",
        inputs.len(),
        options.input_dir.display(),
        options.output_dir.display()
    );

    let run = |input: &PathBuf| {
        let entry = process_one(input, options);
        progress(&entry);
        entry
    };

    let entries = if options.parse.parallel {
        inputs.par_iter().map(run).collect()
    } else {
        inputs.iter().map(run).collect()
    };

    Ok(BatchReport { entries })
}

fn process_one(input: &Path, options: &BatchOptions) -> BatchEntry {
    let output = output_path(&options.output_dir, input);

    let (result, outcome) = match summarize_contained(input, options.parse.clone()) {
        Ok(result) => {
            let outcome = BatchOutcome::Summarized {
                title: result.title.clone(),
                entries: result.outline.len(),
            };
            (result, outcome)
        }
        Err(e) => {
            log::warn!("{}: {}, writing placeholder", input.display(), e);
            let outcome = BatchOutcome::Placeholder {
                reason: e.to_string(),
            };
            (DocumentResult::placeholder(), outcome)
        }
    };

    let outcome = match write_record(&result, &output, options.format) {
        Ok(()) => outcome,
        Err(error) => {
            log::warn!("{}", error);
            BatchOutcome::WriteFailed { error }
        }
    };

    log::info!("{} -> {}", input.display(), output.display());
    BatchEntry {
        input: input.to_path_buf(),
        output,
        outcome,
    }
}

/// Summarize one file, turning a panic inside the PDF stack into an error.
pub(crate) fn summarize_contained(input: &Path, parse: ParseOptions) -> Result<DocumentResult> {
    panic::catch_unwind(AssertUnwindSafe(|| {
        crate::summarize_file_with_options(input, parse)
    }))
    .unwrap_or_else(|payload| Err(Error::Other(panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown cause".to_string());
    format!("parser panicked: {}", detail)
}

fn write_record(result: &DocumentResult, path: &Path, format: JsonFormat) -> Result<()> {
    let json = to_json(result, format)?;
    fs::write(path, json).map_err(|source| Error::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}
