//! Candidate-name tables used to locate each canonical field.
//!
//! Property names are user-defined, so each output field is found by trying a
//! prioritized list of synonyms. The lists are plain data: adding a synonym
//! never requires touching the lookup code, and a JSON file can override any
//! entry (see [`crate::config::load_field_table`]).

use serde::{Deserialize, Serialize};

/// One named lookup: property name, payload key, and optional subfield.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldCandidate {
    /// Property name to look up (case-sensitive).
    pub name: String,
    /// Payload key inside the property, normally its type tag.
    pub type_tag: String,
    /// Subfield to read from the payload.
    #[serde(default)]
    pub subfield: Option<String>,
}

impl FieldCandidate {
    /// Creates a candidate.
    #[must_use]
    pub fn new(name: impl Into<String>, type_tag: impl Into<String>, subfield: Option<&str>) -> Self {
        Self {
            name: name.into(),
            type_tag: type_tag.into(),
            subfield: subfield.map(str::to_string),
        }
    }
}

/// Ordered candidates for one output field. First non-empty match wins.
pub type FieldSpec = Vec<FieldCandidate>;

/// Candidate lists for every canonical output field.
///
/// Fields omitted from a deserialized table keep their built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldTable {
    /// Candidates for the event title, tried before the typed title scan.
    pub title: FieldSpec,
    /// Candidates for the start date.
    pub date: FieldSpec,
    /// Candidates for the category name.
    pub category: FieldSpec,
    /// Candidates for the category color.
    pub category_color: FieldSpec,
    /// Candidates for the venue or location.
    pub location: FieldSpec,
    /// Candidates for the event format.
    pub format: FieldSpec,
    /// Candidates for the status name.
    pub status: FieldSpec,
    /// Candidates for the status color.
    pub status_color: FieldSpec,
    /// Candidates for the description.
    pub description: FieldSpec,
    /// Property names whose `number` payload gives the capacity.
    pub max_attendees: Vec<String>,
    /// Property names whose `number` payload gives the reward points.
    pub points: Vec<String>,
    /// Property names tried for the attendance form before keyword scanning.
    pub attendance_form: Vec<String>,
    /// Case-insensitive substrings that mark a `url` property as a form link.
    pub link_keywords: Vec<String>,
}

fn spec(type_tag: &str, subfield: Option<&str>, names: &[&str]) -> FieldSpec {
    names
        .iter()
        .map(|name| FieldCandidate::new(*name, type_tag, subfield))
        .collect()
}

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

const CATEGORY_NAMES: &[&str] = &["Category", "Type", "Event Type"];
const STATUS_NAMES: &[&str] = &["Status", "Event Status"];

impl Default for FieldTable {
    fn default() -> Self {
        let mut location = spec("select", Some("name"), &["Venue", "Location", "Where"]);
        location.extend(spec("rich_text", None, &["Venue", "Location"]));

        Self {
            title: spec("title", None, &["Event name", "Name", "Title", "Event"]),
            date: spec(
                "date",
                Some("start"),
                &["Event date", "Date", "Event Date", "When"],
            ),
            category: spec("select", Some("name"), CATEGORY_NAMES),
            category_color: spec("select", Some("color"), CATEGORY_NAMES),
            location,
            format: spec(
                "select",
                Some("name"),
                &["Format", "Event Format", "Type"],
            ),
            status: spec("status", Some("name"), STATUS_NAMES),
            status_color: spec("status", Some("color"), STATUS_NAMES),
            description: spec(
                "rich_text",
                None,
                &["Description", "Event Description", "Details", "About"],
            ),
            max_attendees: names(&["Capacity", "Max Attendees", "Max Capacity"]),
            points: names(&["Points", "Event Points", "Reward Points", "Point Value"]),
            attendance_form: names(&[
                "Attendance Form",
                "RSVP Form",
                "RSVP Link",
                "Registration Form",
                "Registration Link",
                "Form",
                "Link",
                "RSVP",
                "Attendance",
                "RSVP URL",
            ]),
            link_keywords: names(&["form", "rsvp", "link", "attendance", "register"]),
        }
    }
}
