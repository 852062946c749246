//! Structured log records and their lenient decoding.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::naming::NULL_USER;

/// A structured log document as stored in the bucket.
///
/// Every field is optional on the wire. Missing fields, `null`s and values of
/// the wrong type decode to the field's zero value rather than failing the
/// whole document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    /// Event time in epoch milliseconds
    #[serde(default, deserialize_with = "lenient")]
    pub timestamp: i64,

    #[serde(default, deserialize_with = "lenient_object")]
    pub data: LogData,

    #[serde(default, deserialize_with = "lenient_object")]
    pub meta: LogMeta,
}

/// The request/response payload of a log record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogData {
    #[serde(default, deserialize_with = "lenient")]
    pub user_id: String,

    #[serde(default, deserialize_with = "lenient")]
    pub status: String,

    #[serde(default, deserialize_with = "lenient")]
    pub request: Map<String, Value>,

    #[serde(default)]
    pub response: Value,
}

/// Connection metadata of a log record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogMeta {
    #[serde(default, deserialize_with = "lenient")]
    pub resource: String,

    #[serde(default, deserialize_with = "lenient")]
    pub identifier: String,

    #[serde(default, deserialize_with = "lenient")]
    pub source_ip: String,

    #[serde(default, deserialize_with = "lenient")]
    pub source_port: i64,

    #[serde(default, deserialize_with = "lenient")]
    pub dest_ip: String,

    #[serde(default, deserialize_with = "lenient")]
    pub dest_port: i64,

    #[serde(default, deserialize_with = "lenient")]
    pub user_agent: String,

    #[serde(default, deserialize_with = "lenient")]
    pub os: String,

    #[serde(default, deserialize_with = "lenient")]
    pub device_id: String,
}

/// The outcome of decoding a log document.
///
/// Decoding never fails: a document that is not a JSON object yields the
/// zero-valued record together with a warning describing why.
#[derive(Debug, Clone)]
pub struct Decoded {
    pub record: LogRecord,
    pub warning: Option<String>,
}

impl Decoded {
    pub fn is_clean(&self) -> bool {
        self.warning.is_none()
    }

    fn rejected(warning: String) -> Self {
        Self {
            record: LogRecord::default(),
            warning: Some(warning),
        }
    }
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

impl LogRecord {
    /// Decode raw document bytes.
    ///
    /// Only a JSON object is decoded; arrays and scalars are rejected rather
    /// than read positionally into the record's fields.
    pub fn decode(bytes: &[u8]) -> Decoded {
        let object = match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(object)) => object,
            Ok(other) => {
                return Decoded::rejected(format!(
                    "log document is not a JSON object: found {}",
                    json_kind(&other)
                ));
            }
            Err(e) => return Decoded::rejected(format!("malformed log document: {e}")),
        };

        match serde_json::from_value::<LogRecord>(Value::Object(object)) {
            Ok(record) => Decoded {
                record,
                warning: None,
            },
            Err(e) => Decoded::rejected(format!("malformed log document: {e}")),
        }
    }

    /// The record's user id, with `"null"` standing in for a missing one.
    pub fn user_id(&self) -> &str {
        if self.data.user_id.is_empty() {
            NULL_USER
        } else {
            &self.data.user_id
        }
    }

    /// The `email` field of the request, if it is a non-empty string.
    pub fn request_email(&self) -> Option<&str> {
        self.data
            .request
            .get("email")
            .and_then(Value::as_str)
            .filter(|email| !email.is_empty())
    }
}

/// Deserialize a field, falling back to its default on a type mismatch.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Like [`lenient`], but anything other than a JSON object is a mismatch.
fn lenient_object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    match Value::deserialize(deserializer)? {
        object @ Value::Object(_) => Ok(serde_json::from_value(object).unwrap_or_default()),
        _ => Ok(T::default()),
    }
}
