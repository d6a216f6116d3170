//! Per-file conversion errors.
//!
//! These never leave the conversion routine as `Err`: they are logged and
//! folded into a failed [`ConversionResult`](crate::conversion::ConversionResult).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("failed to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to encode JPEG stream: {0}")]
    Encode(#[source] image::ImageError),

    #[error("failed to build PDF: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConversionError>;
