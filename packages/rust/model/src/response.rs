//! Strict decoding of the model's JSON answer.

use placard_shared::{ParsedLabel, PlacardError, Result};
use serde_json::{Map, Value};

use crate::prompt::LABEL_KEYS;

/// Decode a model answer into a [`ParsedLabel`].
///
/// The answer (ignoring surrounding whitespace) must be a JSON object with
/// exactly the four label keys, each a string or `null`. `null` maps to an
/// empty field. Anything else is a schema error.
pub fn parse_response(raw: &str) -> Result<ParsedLabel> {
    let value: Value = serde_json::from_str(raw.trim())
        .map_err(|e| PlacardError::schema(format!("response is not JSON: {e}")))?;

    let Value::Object(object) = value else {
        return Err(PlacardError::schema("response is not a JSON object"));
    };

    if let Some(extra) = object.keys().find(|key| !LABEL_KEYS.contains(&key.as_str())) {
        return Err(PlacardError::schema(format!("unexpected key `{extra}`")));
    }

    Ok(ParsedLabel {
        title: field(&object, "title")?,
        author: field(&object, "author")?,
        background: field(&object, "background")?,
        interpretation: field(&object, "interpretation")?,
    })
}

fn field(object: &Map<String, Value>, key: &str) -> Result<String> {
    match object.get(key) {
        Some(Value::String(text)) => Ok(text.clone()),
        Some(Value::Null) => Ok(String::new()),
        Some(other) => Err(PlacardError::schema(format!(
            "`{key}` must be a string or null, got {other}"
        ))),
        None => Err(PlacardError::schema(format!("missing key `{key}`"))),
    }
}
