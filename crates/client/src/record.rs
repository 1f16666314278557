//! Key-normalized API records
//!
//! Metadata endpoints return camelCase JSON objects. A [`Record`] holds one of
//! them with every key converted to snake_case, nested objects included, so
//! `categoryId` is read as `category_id`.

use std::collections::BTreeMap;

use heck::ToSnakeCase;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ClientError, Result};

/// A JSON object with snake_case keys
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Build a record from a JSON object
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedResponse` if `value` is not an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self {
                fields: map
                    .into_iter()
                    .map(|(key, value)| (snake_case(&key), normalize(value)))
                    .collect(),
            }),
            other => Err(ClientError::unexpected(format!(
                "expected a JSON object, got {}",
                kind(&other)
            ))),
        }
    }

    /// Build records from a JSON array of objects
    pub fn from_array(value: Value) -> Result<Vec<Self>> {
        match value {
            Value::Array(items) => items.into_iter().map(Self::from_value).collect(),
            other => Err(ClientError::unexpected(format!(
                "expected a JSON array, got {}",
                kind(&other)
            ))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// String value of a field, if it is a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields.into_iter().collect::<Map<String, Value>>())
    }
}

fn normalize(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (snake_case(&key), normalize(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize).collect()),
        other => other,
    }
}

/// `categoryId` -> `category_id`, `ABTest` -> `ab_test`, `a-b` -> `a_b`
pub(crate) fn snake_case(key: &str) -> String {
    key.to_snake_case()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
