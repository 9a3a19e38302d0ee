//! compliance-check binary.
//!
//! Entry point for the `compliance-check` command-line tool.

use std::process::ExitCode;

use clap::Parser;
use compliance_cli::exit::{codes, exit_code};
use compliance_cli::{
    execute_check, execute_conformance, execute_normalize, CheckArgs, Cli, Command,
    CommandError, ConformanceArgs, NormalizeArgs, NormalizeOutput, StderrLogger,
};
use compliance_fs::RealFilesystem;

fn main() -> ExitCode {
    // Usage errors share the invalid-argument exit code with our own
    // validation errors instead of clap's default of 2.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(codes::INVALID_ARGS as u8)
            } else {
                ExitCode::from(codes::SUCCESS as u8)
            };
        }
    };
    let logger = StderrLogger::from_count(cli.verbose);

    let result = match cli.command {
        Command::Normalize(args) => run_normalize(args, &logger),
        Command::Check(args) => run_check(args, &logger),
        Command::Conformance(args) => run_conformance(args, &logger),
    };

    match result {
        Ok(()) => ExitCode::from(codes::SUCCESS as u8),
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(exit_code(&e) as u8)
        }
    }
}

/// Run the normalize command.
fn run_normalize(args: NormalizeArgs, logger: &StderrLogger) -> Result<(), CommandError> {
    let result = execute_normalize(&args, &RealFilesystem, logger)?;

    match result.output {
        NormalizeOutput::Stdout(json) => println!("{}", json),
        NormalizeOutput::File(path) => println!("Normalized report: {}", path.display()),
    }

    Ok(())
}

/// Run the check command.
fn run_check(args: CheckArgs, logger: &StderrLogger) -> Result<(), CommandError> {
    let result = execute_check(&args, &RealFilesystem, logger)?;

    println!("All {} profiles passed", result.profile_count());

    Ok(())
}

/// Run the conformance command.
fn run_conformance(args: ConformanceArgs, logger: &StderrLogger) -> Result<(), CommandError> {
    let summary = execute_conformance(&args, logger)?;

    println!(
        "All {} fixtures passed ({})",
        summary.results.len(),
        summary.root.display()
    );

    Ok(())
}
