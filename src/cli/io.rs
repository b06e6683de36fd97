//! JSON lines I/O for the CLI
//!
//! - Input: one JSON operation per line
//! - Output: one JSON response per line
//! - UTF-8 only

use std::io::{BufRead, Write};

use serde::Serialize;
use serde_json::Value;

use super::errors::CliResult;

/// Read non-blank lines as JSON values
///
/// A line that fails to parse yields an error for that line only.
pub fn read_operations<R: BufRead>(reader: R) -> impl Iterator<Item = CliResult<Value>> {
    reader
        .lines()
        .filter(|line| !matches!(line, Ok(l) if l.trim().is_empty()))
        .map(|line| -> CliResult<Value> {
            let line = line?;
            Ok(serde_json::from_str(&line)?)
        })
}

/// Write a success response
pub fn write_response<W: Write, T: Serialize>(out: &mut W, data: &T) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    serde_json::to_writer(&mut *out, &response)?;
    writeln!(out)?;
    out.flush()?;

    Ok(())
}

/// Write an error response
pub fn write_error<W: Write>(out: &mut W, code: &str, message: &str) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    });

    serde_json::to_writer(&mut *out, &response)?;
    writeln!(out)?;
    out.flush()?;

    Ok(())
}
