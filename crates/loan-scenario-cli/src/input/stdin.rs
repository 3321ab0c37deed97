use serde_json::Value;
use std::io::{self, Read};

/// Read a JSON document from piped stdin. Returns None when stdin is an
/// interactive terminal or the pipe carried nothing but whitespace, so
/// commands can fall back to requiring --input.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().lock().read_to_string(&mut buffer)?;
    if buffer.trim().is_empty() {
        return Ok(None);
    }

    Ok(Some(serde_json::from_str(buffer.trim())?))
}
