//! The flat event record produced by normalization.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A normalized event in the shape consumed by feed clients.
///
/// Every field is always serialized. Absent text is `""`, absent numbers are
/// `0`, and a missing attendance form is `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRecord {
    /// Source page id.
    pub id: String,
    /// Event title, never empty.
    pub title: String,
    /// Start date as given by the source (`YYYY-MM-DD` or ISO timestamp).
    pub date: String,
    /// Category name.
    pub category: String,
    /// Color of the category option.
    pub category_color: String,
    /// Venue or location text.
    pub location: String,
    /// Capacity as sent by the source, 0 when unknown.
    pub max_attendees: Number,
    /// Current attendance. The source carries no attendance data, so always 0.
    pub attendees: i64,
    /// Event format, such as in-person or online.
    pub format: String,
    /// Status name.
    pub status: String,
    /// Color of the status option.
    pub status_color: String,
    /// Plain-text description.
    pub description: String,
    /// Reward points as sent by the source, 0 when unknown.
    pub points: Number,
    /// RSVP or attendance form link.
    pub attendance_form: Option<String>,
}

impl Default for NormalizedRecord {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            date: String::new(),
            category: String::new(),
            category_color: String::new(),
            location: String::new(),
            max_attendees: Number::from(0),
            attendees: 0,
            format: String::new(),
            status: String::new(),
            status_color: String::new(),
            description: String::new(),
            points: Number::from(0),
            attendance_form: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_every_key_with_client_names() {
        let record = NormalizedRecord {
            id: "p1".to_string(),
            title: "Demo Night".to_string(),
            ..NormalizedRecord::default()
        };

        let value = serde_json::to_value(&record).unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();

        assert_eq!(
            keys,
            vec![
                "id",
                "title",
                "date",
                "category",
                "categoryColor",
                "location",
                "maxAttendees",
                "attendees",
                "format",
                "status",
                "statusColor",
                "description",
                "points",
                "attendanceForm",
            ]
        );
        assert!(value["attendanceForm"].is_null());
        assert_eq!(value["maxAttendees"], 0);
        assert_eq!(value["category"], "");
    }
}
