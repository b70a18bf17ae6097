//! Transient record types produced by the enrichment adapters.
//!
//! None of these is an entity in its own right: they are produced per
//! request and only persisted as JSONB annotations on a todo row.

use serde::{Deserialize, Serialize};

/// Structured fields extracted from a free-text todo description.
///
/// All fields are optional because the extraction service sets anything
/// it cannot determine to `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedData {
    pub task: Option<String>,
    /// Date in `YYYY-MM-DD` format, if mentioned.
    pub date: Option<String>,
    /// Time in `HH:MM` format, if mentioned.
    pub time: Option<String>,
    pub business_name: Option<String>,
    pub business_type: Option<String>,
    pub location: Option<String>,
    pub urgency: Option<String>,
    pub category: Option<String>,
}

impl ParsedData {
    /// Degraded-mode record used when the extraction service is not
    /// configured or returned unparseable content: the whole input text
    /// becomes the task and everything else takes a neutral default.
    pub fn fallback(text: &str) -> Self {
        Self {
            task: Some(text.to_string()),
            date: None,
            time: None,
            business_name: None,
            business_type: None,
            location: None,
            urgency: Some("medium".to_string()),
            category: Some("Personal".to_string()),
        }
    }
}

/// Coarse confidence tag on a business lookup. Not a guarantee of
/// accuracy -- `found` only means an hours string was extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessStatus {
    Found,
    LimitedInfo,
    Unknown,
    ApiNotConfigured,
}

/// One search-result snippet that contributed to a [`BusinessInfo`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessSource {
    pub title: String,
    pub url: String,
    /// Snippet content, truncated to 300 characters.
    pub content: Option<String>,
}

/// Consolidated business record synthesized from search snippets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessInfo {
    pub name: String,
    pub location: Option<String>,
    pub hours: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: BusinessStatus,
    #[serde(default)]
    pub sources: Vec<BusinessSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BusinessInfo {
    /// Sentinel returned when no search credential is configured.
    pub fn unconfigured(name: &str, location: &str) -> Self {
        Self {
            name: name.to_string(),
            location: Some(location.to_string()),
            hours: None,
            phone: None,
            address: None,
            status: BusinessStatus::ApiNotConfigured,
            sources: Vec::new(),
            error: Some("Search API key not provided".to_string()),
        }
    }

    /// Sentinel returned when the search request itself failed.
    pub fn unknown(name: &str, location: &str) -> Self {
        Self {
            name: name.to_string(),
            location: Some(location.to_string()),
            hours: None,
            phone: None,
            address: None,
            status: BusinessStatus::Unknown,
            sources: Vec::new(),
            error: Some("Failed to fetch business information".to_string()),
        }
    }
}

/// One entry from a nearby-business search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyBusiness {
    pub name: String,
    pub url: String,
    /// Snippet content, truncated to 200 characters.
    pub description: Option<String>,
    /// The full result title the name was derived from.
    pub source: String,
}

/// A single actionable suggestion from the extraction service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub action: String,
}

/// Alternative-suggestion payload attached to a validation result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestedAlternatives {
    pub suggestions: Vec<Suggestion>,
    pub reasoning: String,
}

/// A themed group of alternatives for the suggestions-by-id endpoint
/// (e.g. nearby businesses, or replacement dates).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlternativeSet {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub options: Vec<serde_json::Value>,
}

/// Location context assembled from parsed text and business lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationData {
    pub query: Option<String>,
    pub address: Option<String>,
    /// Always `null` for now; geocoding is not wired up.
    pub coordinates: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_carries_input_verbatim() {
        let p = ParsedData::fallback("buy groceries from Walmart on Saturday morning");
        assert_eq!(
            p.task.as_deref(),
            Some("buy groceries from Walmart on Saturday morning")
        );
        assert_eq!(p.category.as_deref(), Some("Personal"));
        assert_eq!(p.urgency.as_deref(), Some("medium"));
        assert!(p.date.is_none());
        assert!(p.business_name.is_none());
    }

    #[test]
    fn business_status_serializes_snake_case() {
        let json = serde_json::to_value(BusinessStatus::ApiNotConfigured).unwrap();
        assert_eq!(json, "api_not_configured");
        let json = serde_json::to_value(BusinessStatus::LimitedInfo).unwrap();
        assert_eq!(json, "limited_info");
    }
}
