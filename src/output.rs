use crate::error::{PoiError, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value as JsonValue};
use std::fs;
use std::path::Path;

/// Layout of a written JSON document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonStyle {
    /// Single line, no whitespace between tokens
    Compact,
    /// One tab per nesting level
    Tabs,
}

/// Render a value in the given style, terminated by a newline
pub fn to_json_string<T: Serialize + ?Sized>(value: &T, style: JsonStyle) -> Result<String> {
    let mut buf = Vec::new();

    match style {
        JsonStyle::Compact => serde_json::to_writer(&mut buf, value)?,
        JsonStyle::Tabs => {
            let formatter = PrettyFormatter::with_indent(b"\t");
            let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
            value.serialize(&mut ser)?;
        }
    }
    buf.push(b'\n');

    // serde_json only ever emits UTF-8
    String::from_utf8(buf).map_err(|e| PoiError::IoError(std::io::Error::other(e)))
}

/// Serialize a value and write it to `path`, replacing any existing file
///
/// The document is rendered fully in memory before the file is touched, so a
/// serialization failure leaves a previous file intact.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T, style: JsonStyle) -> Result<()> {
    let output = to_json_string(value, style)?;
    fs::write(path, output)?;
    Ok(())
}

/// Read and parse a JSON file
pub fn read_json(path: &Path) -> Result<JsonValue> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Read a JSON file whose top level must be an object
pub fn read_json_object(path: &Path) -> Result<Map<String, JsonValue>> {
    match read_json(path)? {
        JsonValue::Object(map) => Ok(map),
        _ => Err(PoiError::NotAnObject(path.to_path_buf())),
    }
}
