//! RVA23 Check - Entry Point
//!
//! Prints the kernel release and the verdict to stdout; diagnostics go to
//! stderr. Exits 0 only when every applicable required extension is present.

use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use tracing::{Level, debug, error};
use tracing_subscriber::{EnvFilter, fmt};

use rva23_check::{check, profile, system};

/// Check whether this RISC-V host supports the RVA23 extension baseline.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging, including the status of every extension
    #[arg(short, long, default_value = "false")]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // stdout carries only the release line and the verdict
    let filter = if args.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let report = match check::run(&system::Uname, &system::LinuxHwProbe) {
        Ok(report) => report,
        Err(e) => {
            error!("RVA23 check could not complete");
            return Err(e.into());
        }
    };

    if args.verbose && report.probe.base_behavior.contains(profile::BaseBehavior::IMA) {
        for (ext, status) in profile::statuses(report.probe.ima_ext_0, report.version) {
            debug!("{:<12} {status}", ext.label);
        }
    }

    println!("{}", report.verdict);

    Ok(if report.verdict.is_supported() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
