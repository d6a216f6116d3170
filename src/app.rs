//! Driver shared by the binary: dispatch on the mode, write the text or JSON
//! report and map the outcome to a process exit code.

use anyhow::{Context, Result};
use console::style;
use std::io::Write;
use std::time::Instant;

use crate::batch::{convert_batch, resolve_inputs, BatchReport};
use crate::cli::Args;
use crate::conversion::{convert, ConversionRequest, ConversionResult};
use crate::json_output::{self, SingleReport};
use crate::utils::{
    create_progress_bar, display_name, format_duration, validate_inputs, verbose_println,
};

pub const EXIT_SUCCESS: u8 = 0;
/// Single-mode conversion failure, or a fatal error before any conversion
pub const EXIT_FAILURE: u8 = 1;

/// Run one invocation, writing the report to `out`.
///
/// Batch mode returns [`EXIT_SUCCESS`] even when files failed; the failures
/// are part of the report. `Err` means nothing was converted (bad arguments,
/// unreadable batch directory, broken stdout).
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<u8> {
    validate_inputs(args)?;

    if args.verbose {
        verbose_println(true, &format!("Input: {}", args.input));
        verbose_println(true, &format!("Output: {}", args.output.display()));
        verbose_println(true, &format!("Quality: {}", args.quality));
        verbose_println(
            true,
            &format!("Mode: {}", if args.batch { "batch" } else { "single" }),
        );
    }

    if args.batch {
        run_batch(args, out)
    } else {
        run_single(args, out)
    }
}

pub fn run_single<W: Write>(args: &Args, out: &mut W) -> Result<u8> {
    let output = args.single_output_path();
    let request = ConversionRequest::new(&args.input, &output, args.quality);
    let result = convert(&request);

    if args.json {
        json_output::emit_single(out, &SingleReport::from_result(&result, &output))
            .context("Failed to write result")?;
    } else {
        // The error itself is already logged on stderr
        match &result {
            ConversionResult::Success { output, .. } => writeln!(
                out,
                "{} {}",
                style("✓ Converted:").bold().green(),
                output.display()
            )?,
            ConversionResult::Failure { input, .. } => writeln!(
                out,
                "{} {}",
                style("✗ Conversion failed:").bold().red(),
                input.display()
            )?,
        }
    }

    Ok(if result.is_success() {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    })
}

pub fn run_batch<W: Write>(args: &Args, out: &mut W) -> Result<u8> {
    let start_time = Instant::now();
    let inputs = resolve_inputs(&args.input, &args.input_options())?;
    verbose_println(
        args.verbose,
        &format!("Resolved {} input file(s) from {}", inputs.len(), args.input),
    );

    let progress = if args.show_progress() && !inputs.is_empty() {
        let pb = create_progress_bar(inputs.len() as u64);
        pb.set_message("Converting");
        Some(pb)
    } else {
        None
    };

    let report = convert_batch(&inputs, &args.output, args.quality, |result| {
        if let Some(pb) = &progress {
            pb.set_message(display_name(result.input()));
            pb.inc(1);
        }
    });

    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }

    if args.json {
        json_output::emit_batch(out, &report).context("Failed to write batch report")?;
    } else {
        print_batch_summary(out, &report, start_time)?;
    }

    Ok(EXIT_SUCCESS)
}

fn print_batch_summary<W: Write>(
    out: &mut W,
    report: &BatchReport,
    start_time: Instant,
) -> std::io::Result<()> {
    let line = format!(
        "Converted {}/{} files",
        report.succeeded.len(),
        report.total
    );
    let header = if report.failed.is_empty() {
        style(line).bold().green()
    } else {
        style(line).bold().yellow()
    };
    writeln!(out, "{}", header)?;
    writeln!(
        out,
        "  Total processing time: {}",
        style(format_duration(start_time.elapsed())).dim()
    )?;

    if !report.failed.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", style("Failed files:").bold().red())?;
        for (i, failed) in report.failed.iter().enumerate() {
            writeln!(
                out,
                "  {}: {} - {}",
                style(format!("#{}", i + 1)).dim(),
                style(failed.input.display()).bold().red(),
                failed.error
            )?;
        }
    }

    Ok(())
}
