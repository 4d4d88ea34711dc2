//! Request body parsing module
//!
//! Turns a collected request body into a JSON value according to its
//! declared content type. URL-encoded and JSON bodies are parsed; anything
//! else (including no body at all) comes back as an empty object, which is
//! what the echo route then returns verbatim.

use hyper::body::Bytes;
use serde_json::{Map, Value};

/// Parse a request body according to its `Content-Type` header.
///
/// - `application/json`: any JSON value (object, array, or scalar)
/// - `application/x-www-form-urlencoded`: object mapping keys to string
///   values; a repeated key collects its values into an array
/// - empty body, missing or unrecognized content type: empty object
///
/// A declared JSON body that does not parse is the only error case.
pub fn parse_body(content_type: Option<&str>, body: &Bytes) -> Result<Value, serde_json::Error> {
    if body.is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    match media_type(content_type).as_deref() {
        Some("application/json") => serde_json::from_slice(body),
        Some("application/x-www-form-urlencoded") => Ok(parse_form(body)),
        _ => Ok(Value::Object(Map::new())),
    }
}

/// Extract the media type from a `Content-Type` header value, dropping
/// parameters such as `; charset=utf-8` and normalizing case.
fn media_type(content_type: Option<&str>) -> Option<String> {
    content_type.map(|ct| {
        ct.split(';')
            .next()
            .unwrap_or(ct)
            .trim()
            .to_ascii_lowercase()
    })
}

/// Parse a form-encoded body into a JSON object.
///
/// All values are strings. A key that appears more than once is promoted
/// to an array holding every value in order.
fn parse_form(body: &Bytes) -> Value {
    let mut map = Map::new();

    for (key, value) in form_urlencoded::parse(body) {
        let value = Value::String(value.into_owned());
        match map.get_mut(key.as_ref()) {
            Some(Value::Array(values)) => values.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                map.insert(key.into_owned(), value);
            }
        }
    }

    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(content_type: Option<&str>, body: &str) -> Result<Value, serde_json::Error> {
        parse_body(content_type, &Bytes::from(body.to_string()))
    }

    #[test]
    fn test_json_object() {
        let value = parse(Some("application/json"), r#"{"a":1,"b":"two"}"#).unwrap();
        assert_eq!(value, json!({"a": 1, "b": "two"}));
    }

    #[test]
    fn test_json_array_and_scalar() {
        assert_eq!(parse(Some("application/json"), "[1,2,3]").unwrap(), json!([1, 2, 3]));
        assert_eq!(parse(Some("application/json"), "42").unwrap(), json!(42));
    }

    #[test]
    fn test_json_with_charset_parameter() {
        let value = parse(Some("application/json; charset=utf-8"), r#"{"a":1}"#).unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn test_content_type_case_insensitive() {
        let value = parse(Some("Application/JSON"), r#"{"a":1}"#).unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(parse(Some("application/json"), "{not json").is_err());
    }

    #[test]
    fn test_form_body() {
        let value = parse(
            Some("application/x-www-form-urlencoded"),
            "name=alice&role=admin",
        )
        .unwrap();
        assert_eq!(value, json!({"name": "alice", "role": "admin"}));
    }

    #[test]
    fn test_form_repeated_key_becomes_array() {
        let value = parse(
            Some("application/x-www-form-urlencoded"),
            "tag=a&tag=b&tag=c&single=x",
        )
        .unwrap();
        assert_eq!(value, json!({"tag": ["a", "b", "c"], "single": "x"}));
    }

    #[test]
    fn test_form_percent_decoding() {
        let value = parse(
            Some("application/x-www-form-urlencoded"),
            "msg=hello+world&sym=%26%3D",
        )
        .unwrap();
        assert_eq!(value, json!({"msg": "hello world", "sym": "&="}));
    }

    #[test]
    fn test_empty_body_is_empty_object() {
        assert_eq!(parse(Some("application/json"), "").unwrap(), json!({}));
        assert_eq!(parse(None, "").unwrap(), json!({}));
    }

    #[test]
    fn test_unrecognized_content_type_is_empty_object() {
        assert_eq!(parse(Some("text/plain"), "hello").unwrap(), json!({}));
        assert_eq!(parse(None, "hello").unwrap(), json!({}));
    }
}
