use clap::Parser;
use std::path::{Path, PathBuf};

use crate::batch::{derive_output_path, InputOptions};
use crate::conversion::DEFAULT_QUALITY;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "jpg2pdf",
    version,
    about = "Convert JPEG images into single-page PDF documents",
    long_about = "
jpg2pdf - JPEG to PDF converter

Every input image becomes its own one-page PDF. The image is normalized to
RGB, re-encoded as JPEG at the requested quality and embedded so that it fills
the page (one pixel per point).

Example Usage:
  # Convert a single file
  jpg2pdf -i ~/Photos/IMG_001.jpg -o ~/pdf/IMG_001.pdf

  # Convert every .jpg/.jpeg in a folder (case-insensitive) into ~/pdf
  jpg2pdf -i ~/Photos -o ~/pdf --batch

  # Convert an explicit list of files with lower quality, JSON report
  jpg2pdf -i a.jpg,b.jpeg,c.JPG -o ~/pdf -b -q 70 --json

  # Walk sub-folders too and accept .jfif files
  jpg2pdf -i ~/Scans -o ~/pdf -b -r --extensions jpg,jpeg,jfif

  # Take defaults from a JSON config file (command-line flags win)
  jpg2pdf -i ~/Photos -o ~/pdf --config jpg2pdf.json"
)]
pub struct Args {
    /// Input image, or in batch mode a directory or comma-separated list of images
    #[arg(short = 'i', long = "input", value_name = "FILE|DIR|LIST")]
    pub input: String,

    /// Output PDF file, or in batch mode the output directory
    #[arg(short = 'o', long = "output", value_name = "FILE|DIR")]
    pub output: PathBuf,

    /// JPEG quality of the embedded image (1-100)
    #[arg(
        short = 'q',
        long = "quality",
        default_value_t = DEFAULT_QUALITY,
        value_parser = clap::value_parser!(u8).range(1..=100),
        value_name = "1-100"
    )]
    pub quality: u8,

    /// Batch mode: convert every image of a directory or comma-separated list
    #[arg(short = 'b', long = "batch")]
    pub batch: bool,

    /// Print the result as JSON instead of text
    #[arg(short = 'j', long = "json")]
    pub json: bool,

    /// Comma-separated list of image extensions picked up from a batch directory
    #[arg(long = "extensions", default_value = "jpg,jpeg", value_name = "LIST")]
    pub extensions_str: String,

    /// Descend into sub-directories when expanding a batch directory
    #[arg(short = 'r', long = "recursive")]
    pub recursive: bool,

    /// Hide the batch progress bar
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    /// Enable verbose output (info-level logging)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// JSON configuration file with default values
    #[arg(long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,
}

impl Args {
    /// Parse the extensions string into a vector
    pub fn parse_extensions(&self) -> Vec<String> {
        self.extensions_str
            .split(',')
            .map(|s| s.trim().trim_start_matches('.').to_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Options for resolving batch inputs
    pub fn input_options(&self) -> InputOptions {
        InputOptions {
            extensions: self.parse_extensions(),
            recursive: self.recursive,
        }
    }

    /// Target file of single mode. An existing directory as `--output`
    /// receives `<input stem>.pdf`.
    pub fn single_output_path(&self) -> PathBuf {
        if self.output.is_dir() {
            derive_output_path(Path::new(&self.input), &self.output)
        } else {
            self.output.clone()
        }
    }

    /// Whether the batch progress bar should be drawn
    pub fn show_progress(&self) -> bool {
        !self.json && !self.no_progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("jpg2pdf").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["-i", "a.jpg", "-o", "a.pdf"]).unwrap();
        assert_eq!(args.input, "a.jpg");
        assert_eq!(args.output, PathBuf::from("a.pdf"));
        assert_eq!(args.quality, 95);
        assert!(!args.batch);
        assert!(!args.json);
        assert!(args.show_progress());
        assert_eq!(args.parse_extensions(), vec!["jpg", "jpeg"]);
    }

    #[test]
    fn test_short_flags() {
        let args = parse(&["-i", "dir", "-o", "out", "-q", "70", "-b", "-j", "-r", "-v"]).unwrap();
        assert_eq!(args.quality, 70);
        assert!(args.batch);
        assert!(args.json);
        assert!(args.recursive);
        assert!(args.verbose);
        assert!(!args.show_progress());
    }

    #[test]
    fn test_quality_range() {
        assert!(parse(&["-i", "a", "-o", "b", "-q", "0"]).is_err());
        assert!(parse(&["-i", "a", "-o", "b", "-q", "101"]).is_err());
        assert!(parse(&["-i", "a", "-o", "b", "-q", "abc"]).is_err());
        assert_eq!(parse(&["-i", "a", "-o", "b", "-q", "1"]).unwrap().quality, 1);
        assert_eq!(parse(&["-i", "a", "-o", "b", "-q", "100"]).unwrap().quality, 100);
    }

    #[test]
    fn test_input_and_output_required() {
        assert!(parse(&["-o", "out"]).is_err());
        assert!(parse(&["-i", "in"]).is_err());
    }

    #[test]
    fn test_usage_errors_exit_two() {
        let err = parse(&["-i", "a", "-o", "b", "-q", "0"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(parse(&["-i", "a"]).unwrap_err().exit_code(), 2);
        assert_eq!(parse(&["-i", "a", "-o", "b", "--bogus"]).unwrap_err().exit_code(), 2);

        let help = parse(&["--help"]).unwrap_err();
        assert_eq!(help.kind(), clap::error::ErrorKind::DisplayHelp);
        assert_eq!(help.exit_code(), 0);
    }

    #[test]
    fn test_single_output_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let out_dir = dir.path().to_str().unwrap();

        let args = parse(&["-i", "scans/page_1.JPG", "-o", out_dir]).unwrap();
        assert_eq!(args.single_output_path(), dir.path().join("page_1.pdf"));

        let file = dir.path().join("custom.pdf");
        let args = parse(&["-i", "scans/page_1.JPG", "-o", file.to_str().unwrap()]).unwrap();
        assert_eq!(args.single_output_path(), file);
    }

    #[test]
    fn test_parse_extensions() {
        let args = parse(&["-i", "a", "-o", "b", "--extensions", "JPG, .jpeg , ,JFIF"]).unwrap();
        assert_eq!(args.parse_extensions(), vec!["jpg", "jpeg", "jfif"]);
    }
}
