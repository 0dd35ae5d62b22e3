use crate::domain::model::ValueKind;
use crate::utils::error::ConvertError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;

/// Short description of a token for error messages.
pub fn describe(wire: &Value) -> String {
    match wire {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => format!("string \"{}\"", s),
        Value::Array(_) => "array".to_string(),
        Value::Object(_) => "object".to_string(),
    }
}

/// A string token the canonical parser rejected, with the parser's reason.
pub fn unparsable(kind: ValueKind, expected: &'static str, wire: &Value, reason: impl fmt::Display) -> ConvertError {
    ConvertError::malformed(kind, expected, format!("{} ({})", describe(wire), reason))
}

/// Canonical forms are all strings.
pub fn expect_str<'a>(
    kind: ValueKind,
    expected: &'static str,
    wire: &'a Value,
) -> Result<&'a str, ConvertError> {
    wire.as_str()
        .ok_or_else(|| ConvertError::malformed(kind, expected, describe(wire)))
}

/// Decode a legacy object into its field layout struct.
pub fn decode_legacy<T: DeserializeOwned>(
    kind: ValueKind,
    expected: &'static str,
    wire: &Value,
) -> Result<T, ConvertError> {
    if !wire.is_object() {
        return Err(ConvertError::malformed(kind, expected, describe(wire)));
    }
    T::deserialize(wire).map_err(|e| ConvertError::malformed(kind, expected, e.to_string()))
}

pub fn encode_legacy<T: serde::Serialize>(kind: ValueKind, layout: &T) -> Result<Value, ConvertError> {
    serde_json::to_value(layout).map_err(|e| ConvertError::out_of_range(kind, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Pair {
        a: i32,
        b: i32,
    }

    #[test]
    fn test_expect_str_rejects_objects() {
        let err = expect_str(ValueKind::LocalDate, "ISO date string", &json!({"year": 1})).unwrap_err();
        assert!(matches!(err, ConvertError::MalformedToken { found, .. } if found == "object"));
        assert_eq!(expect_str(ValueKind::LocalDate, "x", &json!("2024-01-01")).unwrap(), "2024-01-01");
    }

    #[test]
    fn test_unparsable_keeps_reason() {
        let err = unparsable(ValueKind::Instant, "ISO UTC timestamp string", &json!("noon"), "premature end of input");
        assert_eq!(
            err.to_string(),
            "Malformed instant token: expected ISO UTC timestamp string, found string \"noon\" (premature end of input)"
        );
    }

    #[test]
    fn test_decode_legacy_requires_object_with_fields() {
        let pair: Pair = decode_legacy(ValueKind::Duration, "pair", &json!({"a": 1, "b": 2})).unwrap();
        assert_eq!(pair.a + pair.b, 3);
        assert!(decode_legacy::<Pair>(ValueKind::Duration, "pair", &json!({"a": 1})).is_err());
        assert!(decode_legacy::<Pair>(ValueKind::Duration, "pair", &json!([1, 2])).is_err());
    }
}
