// Library exports for reuse by the binary and other applications
pub mod app;
pub mod batch;
pub mod cli;
pub mod config_file;
pub mod conversion;
pub mod error;
pub mod json_output;
pub mod utils;

// Re-export commonly used types
pub use batch::{convert_batch, resolve_inputs, BatchReport, InputOptions};
pub use cli::Args;
pub use conversion::{convert, ConversionRequest, ConversionResult};
pub use error::ConversionError;
pub use json_output::SingleReport;
