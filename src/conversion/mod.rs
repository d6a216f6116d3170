pub mod color;
pub mod pdf;

use image::ImageReader;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::error::{ConversionError, Result};
use color::{color_type_name, normalize_to_rgb};

/// Default JPEG quality for the embedded image stream
pub const DEFAULT_QUALITY: u8 = 95;

/// One input image to turn into one PDF
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    /// JPEG quality, 1-100
    pub quality: u8,
}

impl ConversionRequest {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, quality: u8) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            quality,
        }
    }
}

/// Outcome of converting a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ConversionResult {
    Success { input: PathBuf, output: PathBuf },
    Failure { input: PathBuf, error: String },
}

impl ConversionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ConversionResult::Success { .. })
    }

    pub fn input(&self) -> &Path {
        match self {
            ConversionResult::Success { input, .. } | ConversionResult::Failure { input, .. } => {
                input
            }
        }
    }
}

/// Convert one image file into a single-page PDF.
///
/// Never fails outright: every error is logged and reported as
/// [`ConversionResult::Failure`]. Missing parent directories of the output
/// path are created.
pub fn convert(request: &ConversionRequest) -> ConversionResult {
    info!(
        input = %request.input.display(),
        output = %request.output.display(),
        quality = request.quality,
        "starting conversion"
    );

    match try_convert(request) {
        Ok(()) => {
            info!(output = %request.output.display(), "conversion finished");
            ConversionResult::Success {
                input: request.input.clone(),
                output: request.output.clone(),
            }
        }
        Err(e) => {
            error!(input = %request.input.display(), "conversion failed: {}", e);
            ConversionResult::Failure {
                input: request.input.clone(),
                error: e.to_string(),
            }
        }
    }
}

fn try_convert(request: &ConversionRequest) -> Result<()> {
    let input = &request.input;
    if !input.is_file() {
        return Err(ConversionError::InputNotFound(input.clone()));
    }

    let decoded = ImageReader::open(input)?
        .with_guessed_format()?
        .decode()
        .map_err(|source| ConversionError::Decode {
            path: input.clone(),
            source,
        })?;

    let (rgb, source_color) = normalize_to_rgb(decoded);
    if let Some(color) = source_color {
        info!(
            input = %input.display(),
            "converting color mode from {} to RGB8",
            color_type_name(color)
        );
    }

    if let Some(parent) = request.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let (width, height) = rgb.dimensions();
    let jpeg = pdf::encode_jpeg(&rgb, request.quality)?;
    let title = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image");
    let bytes = pdf::build_pdf(jpeg, width, height, title)?;

    fs::write(&request.output, bytes)?;
    Ok(())
}
