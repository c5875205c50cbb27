//! # MRZ Subcommand
//!
//! Reads recognized text, one OCR line per input line, and prints the
//! extracted identity.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use tz_mrz::ParsedIdentity;

/// Arguments for the `tz mrz` subcommand.
#[derive(Args, Debug)]
pub struct MrzArgs {
    /// File holding OCR output. Reads stdin when omitted.
    pub path: Option<PathBuf>,
}

/// Execute `tz mrz`. Returns the process exit code.
pub fn run_mrz(args: &MrzArgs) -> Result<u8> {
    let text = match &args.path {
        Some(path) => read_file(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read OCR text from stdin")?;
            buf
        }
    };

    match parse_text(&text) {
        Ok(identity) => {
            println!("{}", serde_json::to_string_pretty(&identity)?);
            Ok(0)
        }
        Err(err) => {
            eprintln!("error: {err}");
            Ok(2)
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Extract an identity from newline-separated OCR text.
pub fn parse_text(text: &str) -> Result<ParsedIdentity, tz_core::ScanError> {
    let lines: Vec<&str> = text.lines().collect();
    tz_mrz::extract(lines.as_slice()).map_err(Into::into)
}
