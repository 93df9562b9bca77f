//! Shared User-Agent string for source HTTP clients.

/// Project URL for User-Agent identification (good citizenship; RFC 9308).
const PROJECT_UA_URL: &str = "https://github.com/fierce/eventfeed";

/// Default User-Agent for collection source requests.
#[must_use]
pub(crate) fn default_source_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("eventfeed/{version} (event-feed; +{PROJECT_UA_URL})")
}
