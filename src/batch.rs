//! Directory batch processing: one outline JSON per input PDF.
//!
//! Documents are independent, so they are classified in parallel with
//! rayon. A document that fails is recorded in the report and the rest of
//! the batch continues. Output names are assigned before any work starts:
//! when two inputs share a stem (`doc.pdf`, `doc.PDF`), the first in name
//! order gets `doc.json` and the other fails with
//! [`Error::OutputConflict`].

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::classify::{ClassifierConfig, OutlineClassifier};
use crate::error::{Error, Result};
use crate::extract::{ExtractOptions, FragmentExtractor};
use crate::model::Outline;
use crate::render::{write_json, JsonFormat};

/// Options for batch processing.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Classifier configuration shared by every document
    pub classifier: ClassifierConfig,

    /// Extraction options shared by every document
    pub extract: ExtractOptions,

    /// Output JSON format
    pub format: JsonFormat,

    /// Whether to process documents in parallel
    pub parallel: bool,
}

impl BatchOptions {
    /// Create new batch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the classifier configuration.
    pub fn with_classifier(mut self, config: ClassifierConfig) -> Self {
        self.classifier = config;
        self
    }

    /// Set the extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract = options;
        self
    }

    /// Set the output format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            extract: ExtractOptions::new().lenient(),
            format: JsonFormat::Pretty,
            parallel: true,
        }
    }
}

/// Outcome for one input document.
#[derive(Debug)]
pub struct DocumentReport {
    /// Input PDF path
    pub input: PathBuf,
    /// Output JSON path
    pub output: PathBuf,
    /// The outline written, or why none was
    pub result: Result<Outline>,
}

impl DocumentReport {
    /// Whether the document was processed successfully.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcome of a whole batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Per-document outcomes, in input file name order
    pub documents: Vec<DocumentReport>,
}

impl BatchReport {
    /// Number of documents processed successfully.
    pub fn succeeded(&self) -> usize {
        self.documents.iter().filter(|d| d.is_ok()).count()
    }

    /// Number of documents that failed.
    pub fn failed(&self) -> usize {
        self.documents.len() - self.succeeded()
    }

    /// Whether there were no input documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// List the PDF files directly inside `dir`, sorted by name.
pub fn find_pdf_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
        if is_pdf && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Output path for an input document: `<output_dir>/<stem>.json`.
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or_default().to_os_string();
    name.push(".json");
    output_dir.join(name)
}

/// One input with its output path, and the earlier input that already
/// owns that path, if any.
struct Job {
    input: PathBuf,
    output: PathBuf,
    claimed_by: Option<PathBuf>,
}

fn assign_outputs(inputs: &[PathBuf], output_dir: &Path) -> Vec<Job> {
    let mut owners: HashMap<PathBuf, &PathBuf> = HashMap::new();
    inputs
        .iter()
        .map(|input| {
            let output = output_path_for(input, output_dir);
            let claimed_by = match owners.get(&output) {
                Some(owner) => Some((*owner).clone()),
                None => {
                    owners.insert(output.clone(), input);
                    None
                }
            };
            Job {
                input: input.clone(),
                output,
                claimed_by,
            }
        })
        .collect()
}

/// Extract, classify, and write one document.
pub fn process_file(
    input: &Path,
    output: &Path,
    classifier: &OutlineClassifier,
    options: &BatchOptions,
) -> Result<Outline> {
    let extractor = FragmentExtractor::open_with_options(input, options.extract.clone())?;
    let fragments = extractor.extract()?;
    let outline = classifier.classify(&fragments);
    write_json(&outline, output, options.format)?;
    Ok(outline)
}

/// Process every PDF in `input_dir`, writing outlines into `output_dir`.
pub fn process_directory<P: AsRef<Path>, Q: AsRef<Path>>(
    input_dir: P,
    output_dir: Q,
    options: &BatchOptions,
) -> Result<BatchReport> {
    process_directory_with_progress(input_dir, output_dir, options, |_| {})
}

/// Like [`process_directory`], calling `on_done` as each document finishes.
///
/// `on_done` may be called from several threads at once.
pub fn process_directory_with_progress<P, Q, F>(
    input_dir: P,
    output_dir: Q,
    options: &BatchOptions,
    on_done: F,
) -> Result<BatchReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    F: Fn(&DocumentReport) + Sync,
{
    let inputs = find_pdf_files(input_dir.as_ref())?;
    if inputs.is_empty() {
        log::warn!("No PDF files found in {}", input_dir.as_ref().display());
        return Ok(BatchReport::default());
    }

    options.classifier.validate()?;
    let classifier = OutlineClassifier::new(options.classifier.clone());

    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;

    let jobs = assign_outputs(&inputs, output_dir);

    let run = |job: &Job| -> DocumentReport {
        let result = match &job.claimed_by {
            Some(owner) => Err(Error::OutputConflict {
                path: job.output.clone(),
                claimed_by: owner.clone(),
            }),
            None => {
                log::info!("Processing {}", job.input.display());
                process_file(&job.input, &job.output, &classifier, options)
            }
        };
        if let Err(e) = &result {
            log::warn!("Failed to process {}: {}", job.input.display(), e);
        }
        let report = DocumentReport {
            input: job.input.clone(),
            output: job.output.clone(),
            result,
        };
        on_done(&report);
        report
    };

    let documents = if options.parallel {
        jobs.par_iter().map(run).collect()
    } else {
        jobs.iter().map(run).collect()
    };

    Ok(BatchReport { documents })
}
