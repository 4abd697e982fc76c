//! Reading records from JSON text and files.

use std::io;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{Record, RecordSchema};

/// Path argument that reads from stdin instead of a file.
pub const STDIN_PATH: &str = "-";

/// Parse a JSON array of record objects.
#[instrument(level = "debug", skip(text))]
pub fn parse_records(text: &str, schema: &RecordSchema) -> ApplicationResult<Vec<Record>> {
    let value: Value =
        serde_json::from_str(text).map_err(|source| ApplicationError::Parse { source })?;

    let Value::Array(values) = value else {
        return Err(ApplicationError::NotAnArray {
            found: json_kind(&value).to_string(),
        });
    };

    let records = values
        .into_iter()
        .enumerate()
        .map(|(position, value)| Record::from_json(value, schema, position))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(count = records.len(), "Parsed records");
    Ok(records)
}

/// Read and parse a record file, `-` for stdin.
#[instrument(level = "debug")]
pub fn load_records(path: &Path, schema: &RecordSchema) -> ApplicationResult<Vec<Record>> {
    let text = if path == Path::new(STDIN_PATH) {
        io::read_to_string(io::stdin()).with_path(path)?
    } else {
        std::fs::read_to_string(path).with_path(path)?
    };
    parse_records(&text, schema)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
