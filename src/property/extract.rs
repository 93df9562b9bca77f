//! Scalar extraction from individual properties.

use serde_json::{Number, Value};

use super::PropertyBag;

/// Subfield read from list-shaped payloads (`title`, `rich_text`) when the
/// caller does not name one.
pub const DEFAULT_LIST_SUBFIELD: &str = "plain_text";

/// Extracts a text value from a property bag.
///
/// Lookup rules:
/// 1. Missing property, non-object property, or falsy payload under
///    `type_tag` → empty string
/// 2. List payload → `subfield` (default `plain_text`) of the first element
/// 3. Object payload with a `subfield` → that subfield
/// 4. Anything else → empty string
///
/// `type_tag` is used only as the key of the payload inside the property
/// object. It is not checked against the property's declared `type`, so a
/// mismatched pairing simply finds no payload.
#[must_use]
pub fn extract(bag: &PropertyBag, name: &str, type_tag: &str, subfield: Option<&str>) -> String {
    let Some(payload) = bag.get(name).and_then(|prop| prop.get(type_tag)) else {
        return String::new();
    };

    if !is_truthy(payload) {
        return String::new();
    }

    let found = match payload {
        Value::Array(fragments) => fragments
            .first()
            .and_then(|first| first.get(subfield.unwrap_or(DEFAULT_LIST_SUBFIELD))),
        Value::Object(fields) => subfield.and_then(|sub| fields.get(sub)),
        _ => None,
    };

    found
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

/// Returns true when a JSON value counts as present.
///
/// Null, `false`, zero, and empty strings, arrays, or objects are all absent.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// Returns the declared `type` tag of a property value.
#[must_use]
pub fn declared_type(property: &Value) -> Option<&str> {
    property.get("type").and_then(Value::as_str)
}

/// Reads the `number` payload of a named property.
///
/// Only the payload key is consulted; the declared type is ignored. The value
/// is returned as sent, fractions included. Missing, null, non-numeric, and
/// zero payloads return `None`.
#[must_use]
pub fn number_value<'a>(bag: &'a PropertyBag, name: &str) -> Option<&'a Number> {
    match bag.get(name)?.get("number")? {
        Value::Number(number) if number.as_f64().is_some_and(|n| n != 0.0) => Some(number),
        _ => None,
    }
}

/// Returns the URL carried by a `url`-typed property.
///
/// Properties of any other declared type, and empty or null URLs, yield `None`.
#[must_use]
pub fn url_value(property: &Value) -> Option<&str> {
    if declared_type(property) != Some("url") {
        return None;
    }
    property
        .get("url")
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
}
