//! Untyped store documents and the helpers used to read them defensively.
//!
//! Documents come back from the shared store exactly as some other client
//! wrote them. Typed records ([`LogRecord`](super::LogRecord),
//! [`StatsSnapshot`](super::StatsSnapshot), [`AdminProfile`](super::AdminProfile))
//! are built from them through these accessors, which never fail: a missing
//! or mistyped field reads as `None` and the caller applies its default.

use serde_json::{Map, Value};

/// A JSON object as stored in the document store.
pub type Document = Map<String, Value>;

/// Key of the server-value placeholder object.
const SERVER_VALUE_KEY: &str = ".sv";

/// Placeholder asking the store to fill in its own clock at write time.
///
/// ```
/// use modpanel::domain::document::{is_server_timestamp, server_timestamp};
///
/// assert!(is_server_timestamp(&server_timestamp()));
/// ```
#[must_use]
pub fn server_timestamp() -> Value {
    serde_json::json!({ ".sv": "timestamp" })
}

/// Returns `true` if `value` is the [`server_timestamp`] placeholder.
#[must_use]
pub fn is_server_timestamp(value: &Value) -> bool {
    value
        .as_object()
        .and_then(|obj| obj.get(SERVER_VALUE_KEY))
        .and_then(Value::as_str)
        == Some("timestamp")
}

/// Reads a string field; empty strings count as present.
#[must_use]
pub fn str_field<'a>(doc: &'a Document, key: &str) -> Option<&'a str> {
    doc.get(key).and_then(Value::as_str)
}

/// Reads an integer field. Floats with no fractional part are accepted.
#[must_use]
pub fn int_field(doc: &Document, key: &str) -> Option<i64> {
    let value = doc.get(key)?;
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.is_finite())
            .map(|f| {
                #[allow(clippy::cast_possible_truncation)]
                let whole = f as i64;
                whole
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn reads_mistyped_fields_as_absent() {
        let d = doc(json!({ "name": 5, "count": "seven" }));
        assert_eq!(str_field(&d, "name"), None);
        assert_eq!(int_field(&d, "count"), None);
        assert_eq!(int_field(&d, "missing"), None);
    }

    #[test]
    fn accepts_whole_floats_as_integers() {
        let d = doc(json!({ "a": 12.0, "b": 12.5, "c": 7 }));
        assert_eq!(int_field(&d, "a"), Some(12));
        assert_eq!(int_field(&d, "b"), None);
        assert_eq!(int_field(&d, "c"), Some(7));
    }

    #[test]
    fn placeholder_is_not_a_plain_string() {
        assert!(!is_server_timestamp(&json!("timestamp")));
        assert!(!is_server_timestamp(&json!({ ".sv": "increment" })));
    }
}
