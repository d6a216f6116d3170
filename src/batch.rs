//! Batch mode: resolve inputs, derive outputs, convert sequentially and
//! aggregate the outcomes.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::conversion::{convert, ConversionRequest, ConversionResult};
use crate::utils::has_valid_extension;

/// Extensions picked up when expanding a directory
pub const DEFAULT_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

/// How a batch input string is turned into file paths
#[derive(Debug, Clone)]
pub struct InputOptions {
    /// Lowercase extensions without the leading dot
    pub extensions: Vec<String>,
    pub recursive: bool,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            recursive: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Converted {
    pub input: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failed {
    pub input: PathBuf,
    pub error: String,
}

/// Aggregated outcome of a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    #[serde(rename = "success")]
    pub succeeded: Vec<Converted>,
    pub failed: Vec<Failed>,
    pub total: usize,
}

impl BatchReport {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    pub fn record(&mut self, result: ConversionResult) {
        match result {
            ConversionResult::Success { input, output } => {
                self.succeeded.push(Converted { input, output })
            }
            ConversionResult::Failure { input, error } => self.failed.push(Failed { input, error }),
        }
    }
}

/// Resolve the `--input` value of batch mode into a list of paths.
///
/// A directory expands to the files whose extension matches (case-insensitive),
/// sorted by path. Anything else is read as a comma-separated list; entries are
/// trimmed, empty ones dropped, and missing files kept so they surface as
/// failures.
pub fn resolve_inputs(input: &str, options: &InputOptions) -> Result<Vec<PathBuf>> {
    let as_path = Path::new(input);
    if as_path.is_dir() {
        return discover_images(as_path, options);
    }

    Ok(split_path_list(input))
}

/// Split a comma-separated path list
pub fn split_path_list(input: &str) -> Vec<PathBuf> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Find all files with an accepted extension inside `dir`
pub fn discover_images(dir: &Path, options: &InputOptions) -> Result<Vec<PathBuf>> {
    let mut image_files = Vec::new();

    if options.recursive {
        for entry in WalkDir::new(dir).follow_links(false) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();
            if path.is_file() && has_valid_extension(path, &options.extensions) {
                image_files.push(path.to_path_buf());
            }
        }
    } else {
        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read input directory: {}", dir.display()))?;
        for entry in entries {
            let path = entry.context("Failed to read directory entry")?.path();
            if path.is_file() && has_valid_extension(&path, &options.extensions) {
                image_files.push(path);
            }
        }
    }

    // Sort for consistent processing order
    image_files.sort();
    Ok(image_files)
}

/// Output path for a batch input: `<output_dir>/<stem>.pdf`
pub fn derive_output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .filter(|s| !s.is_empty())
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "image".into());
    let mut name = stem;
    name.push(".pdf");
    output_dir.join(name)
}

/// Append `-1`, `-2`, ... to the file stem until the path is not in `used`
pub fn disambiguate_output_path(candidate: PathBuf, used: &HashSet<PathBuf>) -> PathBuf {
    if !used.contains(&candidate) {
        return candidate;
    }

    let stem = candidate
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "image".into());
    (1..)
        .map(|n| {
            let mut name = stem.clone();
            name.push(format!("-{}.pdf", n));
            candidate.with_file_name(name)
        })
        .find(|path| !used.contains(path))
        .unwrap_or(candidate)
}

/// Convert every input in order, calling `on_result` after each file.
///
/// Inputs sharing a file stem (`page.jpg` and `page.jpeg`, or `page.jpg` and
/// `sub/page.jpg` in a recursive run) get distinct outputs: later ones are
/// written as `page-1.pdf`, `page-2.pdf`, ...
pub fn convert_batch<F>(
    inputs: &[PathBuf],
    output_dir: &Path,
    quality: u8,
    mut on_result: F,
) -> BatchReport
where
    F: FnMut(&ConversionResult),
{
    let mut report = BatchReport::new(inputs.len());
    let mut used_outputs = HashSet::new();

    for input in inputs {
        let output = disambiguate_output_path(derive_output_path(input, output_dir), &used_outputs);
        used_outputs.insert(output.clone());
        let request = ConversionRequest::new(input, output, quality);
        let result = convert(&request);
        on_result(&result);
        report.record(result);
    }

    report
}
