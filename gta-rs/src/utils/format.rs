//! Formatting and parsing of user-facing values

use anyhow::{Context, Result, bail};
use console::style;
use gta_cmp::Diagnostics;
use humansize::{DECIMAL, format_size};
use serde::Serialize;

use crate::cli::OutputOptions;

/// Format file size in human-readable format
pub fn format_bytes(bytes: u64) -> String {
    format_size(bytes, DECIMAL)
}

/// Print decode or encode warnings to stderr, one line each
pub fn report_diagnostics(diagnostics: &Diagnostics, output: OutputOptions) {
    if output.quiet || diagnostics.is_empty() {
        return;
    }
    for diagnostic in diagnostics {
        eprintln!("{} {diagnostic}", style("warning:").yellow().bold());
    }
}

/// Pretty-print a value as JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{text}");
    Ok(())
}

/// Parse `x,y`
pub fn parse_point(raw: &str) -> Result<(usize, usize)> {
    let Some((x, y)) = raw.split_once(',') else {
        bail!("Expected x,y but got '{raw}'");
    };
    let x = x.trim().parse().with_context(|| format!("Invalid x in '{raw}'"))?;
    let y = y.trim().parse().with_context(|| format!("Invalid y in '{raw}'"))?;
    Ok((x, y))
}

/// Parse `path=value`. The value is passed on untrimmed so text fields
/// keep their spaces.
pub fn parse_assignment(raw: &str) -> Result<(&str, &str)> {
    match raw.split_once('=') {
        Some((path, value)) if !path.trim().is_empty() => Ok((path.trim(), value)),
        _ => bail!("Expected path=value but got '{raw}'"),
    }
}
