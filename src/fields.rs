use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::error::PushError;

/// Label key holding the service name.
pub const SERVICE_LABEL: &str = "service";
/// Label key holding the deployment environment.
pub const ENV_LABEL: &str = "env";
/// Label key holding the optional function name tag.
pub const FUNCTION_NAME_LABEL: &str = "function_name";

/// Field key the scoped logger stores the log message under.
pub const MESSAGE_FIELD: &str = "message";
/// Field key used by [`crate::context::with_error`].
pub const ERROR_FIELD: &str = "error";
/// Field key used by [`crate::context::with_user_uuid`].
pub const USER_UUID_FIELD: &str = "user_uuid";

/// Low-cardinality labels identifying the stream a line belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet {
    labels: BTreeMap<String, String>,
}

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a label, overwriting any previous value for `key`.
    pub fn attach(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.labels.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    /// Value for `key`, or the empty string when the label is missing.
    pub fn get_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// A single field value as held by a [`FieldSet`].
///
/// Values are converted to JSON when attached. A value whose `Serialize`
/// impl fails is kept as [`FieldValue::Unserializable`] so that the failure
/// surfaces when the next entry is built, not at the call site.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Json(Value),
    Unserializable(String),
}

impl FieldValue {
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(json) => FieldValue::Json(json),
            Err(e) => FieldValue::Unserializable(e.to_string()),
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue::Json(value)
    }
}

/// Per-entry key/value payload accumulated over a unit of work.
///
/// Grows monotonically: there is no removal, and writing an existing key
/// replaces its previous value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSet {
    fields: BTreeMap<String, FieldValue>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to the JSON form of `value`. Last write wins.
    pub fn attach<T: Serialize + ?Sized>(&mut self, key: impl Into<String>, value: &T) {
        self.insert(key, FieldValue::from_serialize(value));
    }

    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) {
        self.fields.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Flatten into a JSON object.
    ///
    /// Fails with [`PushError::Serialization`] naming the first field whose
    /// value could not be converted.
    pub fn to_object(&self) -> Result<Map<String, Value>, PushError> {
        let mut object = Map::with_capacity(self.fields.len());
        for (key, value) in &self.fields {
            match value {
                FieldValue::Json(json) => {
                    object.insert(key.clone(), json.clone());
                }
                FieldValue::Unserializable(reason) => {
                    return Err(PushError::Serialization(format!(
                        "field `{}`: {}",
                        key, reason
                    )));
                }
            }
        }
        Ok(object)
    }

    /// Render the set as a compact JSON object string, used as a log line.
    pub fn to_json(&self) -> Result<String, PushError> {
        let object = self.to_object()?;
        serde_json::to_string(&object).map_err(|e| PushError::Serialization(e.to_string()))
    }
}
