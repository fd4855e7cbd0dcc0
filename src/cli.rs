use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::Config;
use crate::detector::{Detector, LicenseMetadata};
use crate::tree::DirTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "license-detector")]
#[command(about = "Detect license files in a module and decide whether it may be redistributed", long_about = None)]
pub struct Args {
    /// Module content directory to examine
    #[arg(long, value_name = "DIR")]
    pub path: PathBuf,

    /// Module path the directory holds (e.g., github.com/user/repo)
    #[arg(long, value_name = "MODULE")]
    pub module_path: String,

    /// Module version, for log and report context
    #[arg(long, value_name = "VERSION", default_value = "")]
    pub version: String,

    /// Package directory to report on, relative to the module root. Can be
    /// specified multiple times.
    #[arg(long, value_name = "DIR")]
    pub package: Vec<String>,

    /// Extra exceptions file (JSON or YAML)
    #[arg(long, value_name = "FILE")]
    pub exceptions: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, default_value = "text")]
    pub format: OutputFormat,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all logging except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn validate(&self) -> Result<()> {
        validate_dir(&self.path)?;
        if self.module_path.trim().is_empty() {
            anyhow::bail!("Module path must not be empty");
        }
        if let Some(ref exceptions) = self.exceptions {
            if !exceptions.is_file() {
                anyhow::bail!("Exceptions file does not exist: {}", exceptions.display());
            }
        }
        Ok(())
    }
}

pub fn validate_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }
    if !path.is_dir() {
        anyhow::bail!("Path is not a directory: {}", path.display());
    }
    std::fs::read_dir(path).with_context(|| format!("Cannot read directory: {}", path.display()))?;
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub module_path: String,
    pub version: String,
    pub redistributable: bool,
    pub licenses: Vec<LicenseMetadata>,
    pub packages: Vec<PackageReport>,
}

#[derive(Debug, Serialize)]
pub struct PackageReport {
    pub dir: String,
    pub redistributable: bool,
    /// Paths of the licenses that apply to the package.
    pub licenses: Vec<String>,
}

/// Builds the configuration the arguments describe and reports on the
/// module directory.
pub fn run(args: &Args) -> crate::Result<Report> {
    let mut builder = Config::builder();
    if let Some(ref path) = args.exceptions {
        builder = builder.load_exceptions_file(path)?;
    }
    let config = builder.build()?;
    let tree = DirTree::open(&args.path)?;

    info!(module = %args.module_path, path = %args.path.display(), "detecting licenses");
    let mut detector = Detector::new(&args.module_path, &args.version, &tree, &config);
    Ok(build_report(&mut detector, &args.package))
}

/// Runs every query the arguments ask for against `detector`.
pub fn build_report(detector: &mut Detector<'_>, packages: &[String]) -> Report {
    let packages = packages
        .iter()
        .map(|dir| {
            let info = detector.package_info(dir);
            PackageReport {
                dir: dir.clone(),
                redistributable: info.redistributable,
                licenses: info
                    .licenses
                    .iter()
                    .map(|l| l.file_path().to_string())
                    .collect(),
            }
        })
        .collect();

    Report {
        module_path: detector.module_path().to_string(),
        version: detector.version().to_string(),
        redistributable: detector.module_is_redistributable(),
        licenses: detector
            .all_licenses()
            .iter()
            .map(|l| l.metadata.clone())
            .collect(),
        packages,
    }
}

pub fn write_report(out: &mut impl Write, report: &Report, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report).context("Failed to encode report")?;
            writeln!(out)?;
        }
        OutputFormat::Text => write_text(out, report)?,
    }
    Ok(())
}

fn write_text(out: &mut impl Write, report: &Report) -> Result<()> {
    let version = if report.version.is_empty() {
        String::new()
    } else {
        format!("@{}", report.version)
    };
    writeln!(out, "module {}{}", report.module_path, version)?;
    writeln!(out, "redistributable: {}", yes_no(report.redistributable))?;
    writeln!(out, "licenses:")?;
    if report.licenses.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for license in &report.licenses {
        writeln!(
            out,
            "  {:<32} {:<24} {:>6.1}%",
            license.file_path,
            join_types(license),
            license.coverage.percent
        )?;
    }
    for package in &report.packages {
        writeln!(
            out,
            "package {}: redistributable: {}",
            display_dir(&package.dir),
            yes_no(package.redistributable)
        )?;
        for path in &package.licenses {
            writeln!(out, "  {path}")?;
        }
    }
    Ok(())
}

fn join_types(license: &LicenseMetadata) -> String {
    license
        .types
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn display_dir(dir: &str) -> &str {
    if dir.is_empty() {
        "."
    } else {
        dir
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
