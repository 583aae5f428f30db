//! Driving the simplifier over files and directories

pub mod report;

pub use report::{BatchSummary, FileFailure, FileReport};

use anyhow::{Context, Result, bail};
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};

use crate::config::{Profile, SimplificationConfig};
use crate::document::{DocumentError, read_document, simplify_document, write_document};

const INPUT_EXTENSIONS: [&str; 2] = ["geojson", "json"];

/// One input file and where its simplified copy goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// GeoJSON files directly inside `dir`, sorted by path
pub fn discover_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to list directory: {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to read entry in {}", dir.display()))?
            .path();
        if path.is_file() && has_geojson_extension(&path) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

fn has_geojson_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            INPUT_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Pair every input with its output path
///
/// A single file defaults to `<stem>.<profile>.geojson` beside it. A directory
/// defaults to a sibling directory named after the profile, which is created
/// if missing. Writing into the input directory itself is refused.
pub fn plan_jobs(input: &Path, output: Option<&Path>, profile: Profile) -> Result<Vec<Job>> {
    if input.is_file() {
        let output = match output {
            Some(path) if path.is_dir() => path.join(file_name(input)?),
            Some(path) => path.to_path_buf(),
            None => {
                let stem = input
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "output".to_string());
                input.with_file_name(format!("{}.{}.geojson", stem, profile))
            }
        };
        if output == input {
            bail!("Output would overwrite the input file: {}", input.display());
        }
        return Ok(vec![Job {
            input: input.to_path_buf(),
            output,
        }]);
    }

    if !input.is_dir() {
        bail!("Input not found: {}", input.display());
    }

    let output_dir = match output {
        Some(path) => path.to_path_buf(),
        None => input
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .join(profile.name()),
    };

    if same_location(&output_dir, input) {
        bail!(
            "Output directory is the input directory: {}",
            input.display()
        );
    }

    let inputs = discover_inputs(input)?;
    std::fs::create_dir_all(&output_dir).with_context(|| {
        format!("Failed to create output directory: {}", output_dir.display())
    })?;

    inputs
        .into_iter()
        .map(|input| -> Result<Job> {
            let output = output_dir.join(file_name(&input)?);
            Ok(Job { input, output })
        })
        .collect()
}

fn file_name(path: &Path) -> Result<&std::ffi::OsStr> {
    path.file_name()
        .with_context(|| format!("Path has no file name: {}", path.display()))
}

fn same_location(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Read, simplify and write one file
pub fn process_file(
    job: &Job,
    config: &SimplificationConfig,
    pretty: bool,
) -> Result<FileReport, DocumentError> {
    let original_bytes = std::fs::metadata(&job.input)
        .map_err(|source| DocumentError::Read {
            path: job.input.clone(),
            source,
        })?
        .len();

    let mut document = read_document(&job.input)?;
    let stats = simplify_document(&mut document, config)?;
    let simplified_bytes = write_document(&job.output, &document, pretty)?;

    Ok(FileReport {
        input: job.input.clone(),
        output: job.output.clone(),
        original_bytes,
        simplified_bytes,
        stats,
    })
}

/// Process every job, reporting failures and carrying on
///
/// Messages go through `progress` so they print above the bar. The bar is
/// advanced once per job and left for the caller to finish.
pub fn run_batch(
    jobs: &[Job],
    config: &SimplificationConfig,
    pretty: bool,
    verbose: bool,
    progress: &ProgressBar,
) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for job in jobs {
        progress.set_message(
            job.input
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
        );

        match process_file(job, config, pretty) {
            Ok(report) => {
                progress.println(report.summary());
                if verbose {
                    progress.println(format!("  {}", report.detail()));
                    progress.println(format!("  -> {}", report.output.display()));
                }
                summary.reports.push(report);
            }
            Err(e) => {
                let reason = error_chain(&e);
                progress.println(format!(
                    "Error processing {}: {}",
                    job.input.display(),
                    reason
                ));
                summary.failures.push(FileFailure {
                    input: job.input.clone(),
                    reason,
                });
            }
        }

        progress.inc(1);
    }

    summary
}

fn error_chain(e: &(dyn std::error::Error + 'static)) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
