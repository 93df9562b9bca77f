//! Property bag access for Notion-style page records.
//!
//! A page's `properties` object maps user-defined names to typed values. Every
//! value is an object carrying a declared `type` tag and a payload stored under
//! the key named by that tag:
//!
//! ```json
//! { "Name": { "type": "title", "title": [{ "plain_text": "Demo Night" }] } }
//! ```
//!
//! The schema varies per page, so nothing here fails on absence: a missing
//! property, a null payload, or an unexpected shape all read as empty.
//!
//! # Example
//!
//! ```
//! use eventfeed_core::property::extract;
//! use serde_json::json;
//!
//! let bag = json!({
//!     "Name": { "type": "title", "title": [{ "plain_text": "Demo Night" }] }
//! });
//! let bag = bag.as_object().unwrap();
//!
//! assert_eq!(extract(bag, "Name", "title", None), "Demo Night");
//! assert_eq!(extract(bag, "Missing", "title", None), "");
//! ```

mod extract;

pub use extract::{
    DEFAULT_LIST_SUBFIELD, declared_type, extract, is_truthy, number_value, url_value,
};

use serde_json::{Map, Value};

/// Per-record mapping of property name to typed property value.
pub type PropertyBag = Map<String, Value>;

/// Returns the property bag of a raw page record.
///
/// Records without a `properties` object yield `None`.
#[must_use]
pub fn properties_of(record: &Value) -> Option<&PropertyBag> {
    record.get("properties").and_then(Value::as_object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_properties_of_returns_bag() {
        let record = json!({"id": "p1", "properties": {"Name": {"type": "title"}}});
        let bag = properties_of(&record);
        assert!(bag.is_some_and(|b| b.contains_key("Name")));
    }

    #[test]
    fn test_properties_of_missing_or_wrong_shape() {
        assert!(properties_of(&json!({"id": "p1"})).is_none());
        assert!(properties_of(&json!({"properties": []})).is_none());
        assert!(properties_of(&json!("not a page")).is_none());
    }
}
