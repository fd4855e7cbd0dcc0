use anyhow::{Context, Result};
use clap::Parser;
use license_detector::cli;
use license_detector::logging::{self, Verbosity};

fn main() -> Result<()> {
    let args = cli::Args::parse();
    logging::init(Verbosity::from_flags(args.verbose, args.quiet));
    args.validate().context("Invalid arguments")?;

    let report = cli::run(&args).context("License detection failed")?;

    let stdout = std::io::stdout();
    cli::write_report(&mut stdout.lock(), &report, args.format)?;
    Ok(())
}
