//! # tz CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tz_cli::mrz::{run_mrz, MrzArgs};
use tz_cli::verify::{run_verify, VerifyArgs};

/// Treazury identity pipeline toolchain.
///
/// Extracts machine-readable zones from OCR output and runs end-to-end
/// verification sessions against a configured proof service.
#[derive(Parser, Debug)]
#[command(name = "tz", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse OCR lines and print the identity from the machine-readable zone.
    Mrz(MrzArgs),

    /// Run a full verification session from a frame file.
    Verify(VerifyArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise verbosity picks the level.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("info"),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if cli.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let result = match cli.command {
        Commands::Mrz(args) => run_mrz(&args),
        Commands::Verify(args) => run_verify(&args).await,
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tz_cli::verify::DocumentArg;

    #[test]
    fn cli_parse_mrz_stdin() {
        let cli = Cli::try_parse_from(["tz", "mrz"]).unwrap();
        match cli.command {
            Commands::Mrz(args) => assert!(args.path.is_none()),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_parse_mrz_file() {
        let cli = Cli::try_parse_from(["tz", "-v", "mrz", "scan.txt"]).unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Mrz(args) => assert_eq!(args.path, Some(PathBuf::from("scan.txt"))),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_parse_verify() {
        let cli = Cli::try_parse_from([
            "tz",
            "verify",
            "--frame",
            "scan.txt",
            "--document",
            "id-card",
            "--subject",
            "0xabc",
            "--kyc-level",
            "3",
        ])
        .unwrap();
        match cli.command {
            Commands::Verify(args) => {
                assert_eq!(args.frame, PathBuf::from("scan.txt"));
                assert_eq!(args.document, DocumentArg::IdCard);
                assert_eq!(args.subject, "0xabc");
                assert_eq!(args.kyc_level, Some(3));
                assert!(args.verifier.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_parse_verify_requires_subject() {
        assert!(Cli::try_parse_from([
            "tz",
            "verify",
            "--frame",
            "scan.txt",
            "--document",
            "passport",
        ])
        .is_err());
    }
}
