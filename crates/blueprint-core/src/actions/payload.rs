use serde_json::Value;

/// Normalize a configuration payload to the text form the workflow expects.
///
/// Strings are returned as-is, arrays and objects as compact JSON. Anything
/// else yields `None`, which callers treat as "omit the field".
pub fn convert_payload_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => serde_json::to_string(value).ok(),
        Value::Null | Value::Bool(_) | Value::Number(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_is_unchanged() {
        assert_eq!(convert_payload_to_text(&json!("hello")).as_deref(), Some("hello"));
        assert_eq!(convert_payload_to_text(&json!("")).as_deref(), Some(""));
    }

    #[test]
    fn array_serializes_compact() {
        assert_eq!(convert_payload_to_text(&json!([1, 2, 3])).as_deref(), Some("[1,2,3]"));
    }

    #[test]
    fn object_serializes_compact() {
        assert_eq!(convert_payload_to_text(&json!({"a": 1})).as_deref(), Some(r#"{"a":1}"#));
        let nested = json!({"env": {"stage": "prod"}, "tags": ["x"]});
        let text = convert_payload_to_text(&nested).unwrap();
        let back: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(back, nested);
    }

    #[test]
    fn scalars_are_absent() {
        assert_eq!(convert_payload_to_text(&Value::Null), None);
        assert_eq!(convert_payload_to_text(&json!(42)), None);
        assert_eq!(convert_payload_to_text(&json!(true)), None);
    }
}
