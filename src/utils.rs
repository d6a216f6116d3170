use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

use crate::cli::Args;

/// Validate input arguments
pub fn validate_inputs(args: &Args) -> Result<()> {
    // Validate extensions of a batch run
    if args.batch && args.parse_extensions().is_empty() {
        return Err(anyhow::anyhow!("No valid extensions specified"));
    }

    Ok(())
}

/// Create a styled progress bar
pub fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    if let Ok(template) = ProgressStyle::with_template(
        "{spinner:.blue} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}",
    ) {
        pb.set_style(template.progress_chars("#>-"));
    }
    pb
}

/// Format duration in a human-readable way
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if total_secs >= 60 {
        let mins = total_secs / 60;
        let secs = total_secs % 60;
        format!("{}m {}s", mins, secs)
    } else if total_secs > 0 {
        format!("{}.{:03}s", total_secs, millis)
    } else {
        format!("{}ms", duration.as_millis())
    }
}

/// Get file extension in lowercase
pub fn get_file_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Check if a file has one of the specified extensions
pub fn has_valid_extension(path: &Path, extensions: &[String]) -> bool {
    if let Some(ext) = get_file_extension(path) {
        extensions.contains(&ext)
    } else {
        false
    }
}

/// File name of a path for display, falling back to the full path
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

/// Print verbose information if verbose mode is enabled
pub fn verbose_println(verbose: bool, message: &str) {
    if verbose {
        eprintln!("{} {}", style("[VERBOSE]").dim(), message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
        assert_eq!(format_duration(Duration::from_secs(1)), "1.000s");
        assert_eq!(format_duration(Duration::from_secs(65)), "1m 5s");
    }

    #[test]
    fn test_has_valid_extension() {
        let extensions = vec!["jpg".to_string(), "jpeg".to_string()];

        assert!(has_valid_extension(Path::new("a.jpg"), &extensions));
        assert!(has_valid_extension(Path::new("a.JPG"), &extensions));
        assert!(has_valid_extension(Path::new("dir/b.JpEg"), &extensions));
        assert!(!has_valid_extension(Path::new("a.png"), &extensions));
        assert!(!has_valid_extension(Path::new("jpg"), &extensions));
        assert!(!has_valid_extension(Path::new("a.jpg.txt"), &extensions));
    }

    fn parse(args: &[&str]) -> Args {
        use clap::Parser;
        Args::try_parse_from(std::iter::once("jpg2pdf").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_validate_inputs_rejects_empty_extension_list() {
        let args = parse(&["-i", "dir", "-o", "out", "-b", "--extensions", " , ,"]);
        let err = validate_inputs(&args).unwrap_err();
        assert_eq!(err.to_string(), "No valid extensions specified");

        assert!(validate_inputs(&parse(&["-i", "dir", "-o", "out", "-b"])).is_ok());
        // Single mode never looks at the extension list
        assert!(validate_inputs(&parse(&["-i", "a.jpg", "-o", "a.pdf", "--extensions", ","])).is_ok());
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("/photos/IMG_1.jpg")), "IMG_1.jpg");
        assert_eq!(display_name(Path::new("/")), "/");
    }
}
