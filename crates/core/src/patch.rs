//! Decoding of JSON request bodies for create and partial-update requests.
//!
//! Bodies are kept as a raw JSON object so that "field absent", "field
//! null" and "field present but falsy" can be told apart. How a present
//! field is treated on update is governed by [`PatchSemantics`].

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::CoreError;

/// How a partial update treats fields that are present in the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatchSemantics {
    /// Every present field is applied and validated. `null` is rejected.
    #[default]
    Presence,
    /// Present-but-falsy values (`null`, `""`, `0`, `false`, `[]`, `{}`) are
    /// ignored as if absent. Legacy behaviour.
    SkipFalsy,
}

impl FromStr for PatchSemantics {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "presence" => Ok(PatchSemantics::Presence),
            "skip-falsy" | "skip_falsy" => Ok(PatchSemantics::SkipFalsy),
            other => Err(format!(
                "unknown patch semantics '{other}', expected 'presence' or 'skip-falsy'"
            )),
        }
    }
}

impl fmt::Display for PatchSemantics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchSemantics::Presence => f.write_str("presence"),
            PatchSemantics::SkipFalsy => f.write_str("skip-falsy"),
        }
    }
}

/// JSON truthiness: `null`, `false`, `0`, `""`, `[]` and `{}` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// A request body that is known to be a JSON object.
#[derive(Debug, Clone, Default)]
pub struct RequestBody {
    fields: Map<String, Value>,
}

impl RequestBody {
    /// Wrap a parsed JSON value. Anything other than an object is rejected.
    pub fn from_value(value: Value) -> Result<Self, CoreError> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(CoreError::Validation(format!(
                "Request body must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// True if at least one of `keys` is present, whatever its value.
    pub fn contains_any(&self, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.contains(k))
    }

    /// The subset of `keys` that are absent from the body.
    pub fn missing<'a>(&self, keys: &[&'a str]) -> Vec<&'a str> {
        keys.iter().copied().filter(|k| !self.contains(k)).collect()
    }

    /// Decode a field that must be present and non-null.
    pub fn required<T: DeserializeOwned>(&self, key: &str) -> Result<T, CoreError> {
        match self.fields.get(key) {
            None => Err(CoreError::Validation(format!(
                "Missing required field '{key}'"
            ))),
            Some(Value::Null) => Err(CoreError::Validation(format!(
                "Field '{key}' must not be null"
            ))),
            Some(value) => decode(key, value),
        }
    }

    /// Decode a field for a partial update.
    ///
    /// Returns `Ok(None)` when the field should leave the stored column
    /// untouched.
    pub fn optional<T: DeserializeOwned>(
        &self,
        key: &str,
        semantics: PatchSemantics,
    ) -> Result<Option<T>, CoreError> {
        let Some(value) = self.fields.get(key) else {
            return Ok(None);
        };
        match semantics {
            PatchSemantics::SkipFalsy if !is_truthy(value) => Ok(None),
            _ if value.is_null() => Err(CoreError::Validation(format!(
                "Field '{key}' must not be null"
            ))),
            _ => decode(key, value).map(Some),
        }
    }
}

fn decode<T: DeserializeOwned>(key: &str, value: &Value) -> Result<T, CoreError> {
    T::deserialize(value)
        .map_err(|e| CoreError::Validation(format!("Invalid value for '{key}': {e}")))
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
