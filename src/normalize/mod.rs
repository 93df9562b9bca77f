//! Record normalization: raw pages to flat event records.
//!
//! Each output field is resolved in two independent phases:
//!
//! 1. **Named phase** - try the field's candidate list from the [`FieldTable`]
//!    in priority order and keep the first non-empty value.
//! 2. **Typed scan** - for the title and the attendance form only, walk every
//!    property in source order looking for one of the right declared type.
//!
//! A page whose title is still empty after both phases is discarded.
//!
//! # Example
//!
//! ```
//! use eventfeed_core::normalize::RecordNormalizer;
//! use serde_json::json;
//!
//! let page = json!({
//!     "id": "page-1",
//!     "properties": {
//!         "Name": { "type": "title", "title": [{ "plain_text": "Demo Night" }] },
//!         "Capacity": { "type": "number", "number": 40 }
//!     }
//! });
//!
//! let record = RecordNormalizer::default().normalize(&page).unwrap();
//! assert_eq!(record.title, "Demo Night");
//! assert_eq!(record.max_attendees.as_i64(), Some(40));
//! ```

mod fields;
mod record;

pub use fields::{FieldCandidate, FieldSpec, FieldTable};
pub use record::NormalizedRecord;

use serde_json::{Number, Value};
use tracing::debug;

use crate::property::{PropertyBag, declared_type, extract, number_value, properties_of, url_value};

/// Named phase: returns the first non-empty value among `spec`'s candidates.
#[must_use]
pub fn resolve_named(bag: &PropertyBag, spec: &[FieldCandidate]) -> String {
    spec.iter()
        .map(|candidate| {
            extract(
                bag,
                &candidate.name,
                &candidate.type_tag,
                candidate.subfield.as_deref(),
            )
        })
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

/// Typed scan for the title: the first `title`-typed property with text.
#[must_use]
pub fn scan_title(bag: &PropertyBag) -> String {
    bag.iter()
        .filter(|(_, property)| declared_type(property) == Some("title"))
        .map(|(name, _)| extract(bag, name, "title", None))
        .find(|title| !title.is_empty())
        .unwrap_or_default()
}

/// Named phase for the attendance form.
///
/// A candidate only matches when its declared type is `url` and it carries a
/// non-empty URL.
#[must_use]
pub fn resolve_link_named(bag: &PropertyBag, names: &[String]) -> Option<String> {
    names
        .iter()
        .find_map(|name| bag.get(name).and_then(url_value))
        .map(str::to_string)
}

/// Typed scan for the attendance form.
///
/// Accepts the first `url` property, in source order, whose name contains one
/// of `keywords` (case-insensitive).
#[must_use]
pub fn scan_link(bag: &PropertyBag, keywords: &[String]) -> Option<String> {
    bag.iter()
        .filter(|(name, _)| {
            let name = name.to_lowercase();
            keywords
                .iter()
                .any(|keyword| name.contains(&keyword.to_lowercase()))
        })
        .find_map(|(_, property)| url_value(property))
        .map(str::to_string)
}

/// Returns the first present, non-zero `number` payload among `names`, or 0.
#[must_use]
pub fn resolve_number(bag: &PropertyBag, names: &[String]) -> Number {
    names
        .iter()
        .find_map(|name| number_value(bag, name))
        .cloned()
        .unwrap_or_else(|| Number::from(0))
}

/// Maps raw pages onto [`NormalizedRecord`]s using a [`FieldTable`].
///
/// The normalizer holds no mutable state; the same page always yields the same
/// result.
#[derive(Debug, Clone, Default)]
pub struct RecordNormalizer {
    table: FieldTable,
}

impl RecordNormalizer {
    /// Creates a normalizer over a custom candidate table.
    #[must_use]
    pub fn new(table: FieldTable) -> Self {
        Self { table }
    }

    /// Returns the candidate table in use.
    #[must_use]
    pub fn table(&self) -> &FieldTable {
        &self.table
    }

    /// Normalizes one raw page.
    ///
    /// Returns `None` when no title can be resolved. A missing `properties`
    /// object is treated as an empty bag, so such pages are discarded too.
    #[must_use]
    pub fn normalize(&self, raw: &Value) -> Option<NormalizedRecord> {
        let empty = PropertyBag::new();
        let bag = properties_of(raw).unwrap_or(&empty);
        let id = raw.get("id").and_then(Value::as_str).unwrap_or_default();

        let title = self.resolve_title(bag);
        if title.is_empty() {
            debug!(id, "Discarding page without a resolvable title");
            return None;
        }

        let table = &self.table;
        Some(NormalizedRecord {
            id: id.to_string(),
            title,
            date: resolve_named(bag, &table.date),
            category: resolve_named(bag, &table.category),
            category_color: resolve_named(bag, &table.category_color),
            location: resolve_named(bag, &table.location),
            max_attendees: resolve_number(bag, &table.max_attendees),
            attendees: 0,
            format: resolve_named(bag, &table.format),
            status: resolve_named(bag, &table.status),
            status_color: resolve_named(bag, &table.status_color),
            description: resolve_named(bag, &table.description),
            points: resolve_number(bag, &table.points),
            attendance_form: self.resolve_attendance_form(bag),
        })
    }

    fn resolve_title(&self, bag: &PropertyBag) -> String {
        let title = resolve_named(bag, &self.table.title);
        if title.is_empty() {
            scan_title(bag)
        } else {
            title
        }
    }

    fn resolve_attendance_form(&self, bag: &PropertyBag) -> Option<String> {
        resolve_link_named(bag, &self.table.attendance_form)
            .or_else(|| scan_link(bag, &self.table.link_keywords))
    }
}
