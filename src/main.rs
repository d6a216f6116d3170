use anyhow::Result;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use jpg2pdf::app;
use jpg2pdf::cli::Args;

/// Logs go to stderr so `--json` output on stdout stays parseable.
/// `RUST_LOG` overrides the verbosity flag.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<ExitCode> {
    let args = Args::parse_with_config()?;
    init_logging(args.verbose);

    let code = app::run(&args, &mut std::io::stdout().lock())?;
    Ok(ExitCode::from(code))
}
