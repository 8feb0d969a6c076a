//! Line-oriented JSON I/O
//!
//! - Input: one JSON request per line
//! - Output: one JSON response per line, flushed immediately
//! - UTF-8 only

use std::io::{BufRead, Write};

use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Reads the next non-blank line, or `None` at end of input
pub fn read_request<R: BufRead>(reader: &mut R) -> CliResult<Option<String>> {
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            return Ok(Some(trimmed.to_string()));
        }
    }
}

/// Reads exactly one request; blank input is an error
pub fn read_single_request<R: BufRead>(reader: &mut R) -> CliResult<String> {
    read_request(reader)?.ok_or_else(|| CliError::io_error("Empty input"))
}

/// Write a success response
pub fn write_response<W: Write>(out: &mut W, data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });
    write_json(out, &response.to_string())
}

/// Write a raw JSON string followed by a newline
pub fn write_json<W: Write>(out: &mut W, json_str: &str) -> CliResult<()> {
    writeln!(out, "{}", json_str)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_blank_lines_skipped() {
        let mut input = Cursor::new("\n  \n{\"function\":\"GetAllUsers\"}\n");
        assert_eq!(
            read_request(&mut input).unwrap().as_deref(),
            Some("{\"function\":\"GetAllUsers\"}")
        );
        assert_eq!(read_request(&mut input).unwrap(), None);
    }

    #[test]
    fn test_single_request_requires_input() {
        let mut input = Cursor::new("");
        let err = read_single_request(&mut input).unwrap_err();
        assert_eq!(err.code_str(), "REC_CLI_IO_ERROR");
    }

    #[test]
    fn test_write_response_line() {
        let mut out = Vec::new();
        write_response(&mut out, serde_json::json!({"initialized": true})).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"status\":\"ok\",\"data\":{\"initialized\":true}}\n"
        );
    }
}
