//! Conversion of JSON documents into variable stores.
//!
//! Nested objects are flattened into dotted names, so `{"user": {"age": 42}}`
//! is reachable as `user.age`. `null` members are dropped and therefore read
//! as undefined.

use std::collections::HashMap;

use logical_eval::{Scalar, Value};
use serde_json::{Map, Value as Json};

use crate::commands::{CommandError, Result};

/// Flattens one JSON object into a variable store.
pub fn flatten_record(record: &Map<String, Json>) -> HashMap<String, Value> {
    let mut store = HashMap::new();
    flatten_into(&mut store, None, record);
    store
}

fn flatten_into(
    store: &mut HashMap<String, Value>,
    prefix: Option<&str>,
    object: &Map<String, Json>,
) {
    for (key, member) in object {
        let name = match prefix {
            Some(prefix) => format!("{prefix}.{key}"),
            None => key.clone(),
        };
        match member {
            Json::Null => {}
            Json::Object(nested) => flatten_into(store, Some(name.as_str()), nested),
            Json::Array(items) => {
                let items = items.iter().filter_map(to_scalar).collect();
                store.insert(name, Value::Sequence(items));
            }
            scalar => {
                if let Some(scalar) = to_scalar(scalar) {
                    store.insert(name, Value::Scalar(scalar));
                }
            }
        }
    }
}

/// Array elements that are themselves arrays or objects keep their JSON text.
fn to_scalar(json: &Json) -> Option<Scalar> {
    match json {
        Json::Null => None,
        Json::Bool(b) => Some(Scalar::Bool(*b)),
        Json::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Some(Scalar::Integer(i)),
            (None, Some(f)) => Some(Scalar::Number(f)),
            (None, None) => Some(Scalar::Text(n.to_string())),
        },
        Json::String(s) => Some(Scalar::Text(s.clone())),
        other => Some(Scalar::Text(other.to_string())),
    }
}

/// Parses a JSON object document, such as a `--vars` file.
pub fn parse_object(content: &str) -> Result<Map<String, Json>> {
    match serde_json::from_str::<Json>(content)? {
        Json::Object(map) => Ok(map),
        other => Err(CommandError::InvalidInput(format!(
            "expected a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

/// Parses a record stream: either one JSON array of objects, or a sequence
/// of objects separated by whitespace (newline-delimited JSON).
pub fn parse_records(content: &str) -> Result<Vec<Map<String, Json>>> {
    let values: Vec<Json> = if content.trim_start().starts_with('[') {
        serde_json::from_str(content)?
    } else {
        serde_json::Deserializer::from_str(content)
            .into_iter::<Json>()
            .collect::<std::result::Result<_, _>>()?
    };

    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| match value {
            Json::Object(map) => Ok(map),
            other => Err(CommandError::InvalidInput(format!(
                "record {} is {}, expected an object",
                index + 1,
                json_type_name(&other)
            ))),
        })
        .collect()
}

fn json_type_name(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}
