//! Web-search adapter for business lookups.
//!
//! Everything here is best-effort: the adapter never propagates a hard
//! error. Missing credentials and transport failures both degrade to a
//! sentinel [`BusinessInfo`] status, and field extraction is regex
//! scanning over free-text snippets, with the first match per field
//! winning.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::json;
use tasksense_core::enrichment::{
    BusinessInfo, BusinessSource, BusinessStatus, NearbyBusiness,
};
use tasksense_core::validation::{weekday_name, HoursCheck};

use crate::config::EnrichmentConfig;

// ---------------------------------------------------------------------------
// Snippet patterns
// ---------------------------------------------------------------------------

static HOURS_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // "Mon-Fri 9am - 5pm", "hours: tue 10:00 - 18:00"
        Regex::new(
            r"(?i)(?:hours?:?\s*)?(?:mon|tue|wed|thu|fri|sat|sun)[\s\w]*?\d{1,2}(?::\d{2})?\s*(?:am|pm)?\s*-\s*\d{1,2}(?::\d{2})?\s*(?:am|pm)?",
        )
        .expect("valid regex"),
        // "open 9am - 5pm", "opens: 10 - 6"
        Regex::new(
            r"(?i)(?:open|opens?):?\s*\d{1,2}(?::\d{2})?\s*(?:am|pm)?\s*-\s*\d{1,2}(?::\d{2})?\s*(?:am|pm)?",
        )
        .expect("valid regex"),
        // bare "9am - 5pm"
        Regex::new(r"(?i)\d{1,2}(?::\d{2})?\s*(?:am|pm)?\s*-\s*\d{1,2}(?::\d{2})?\s*(?:am|pm)?")
            .expect("valid regex"),
    ]
});

static LABELED_PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:phone|call|tel|contact):?\s*([\(\)\d\s\-\.]{10,})").expect("valid regex")
});

static BARE_PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").expect("valid regex")
});

static ADDRESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\d+\s+[a-z\s]+(?:street|st|avenue|ave|road|rd|drive|dr|lane|ln|boulevard|blvd)[^,\n]*(?:,\s*[a-z\s]+(?:,\s*[a-z]{2})?)*",
    )
    .expect("valid regex")
});

/// Hours phrasing scan: up to three matches joined with ", ".
fn extract_hours(text: &str) -> Option<String> {
    for pattern in HOURS_PATTERNS.iter() {
        let matches: Vec<&str> = pattern.find_iter(text).take(3).map(|m| m.as_str()).collect();
        if !matches.is_empty() {
            return Some(matches.join(", "));
        }
    }
    None
}

/// Labeled phone numbers win over bare digit groups.
fn extract_phone(text: &str) -> Option<String> {
    if let Some(captures) = LABELED_PHONE_RE.captures(text) {
        return Some(captures[1].trim().to_string());
    }
    BARE_PHONE_RE.find(text).map(|m| m.as_str().to_string())
}

/// Street-suffix address scan.
fn extract_address(text: &str) -> Option<String> {
    ADDRESS_RE.find(text).map(|m| m.as_str().trim().to_string())
}

/// Derive a business name from a result title: everything before the
/// first `-` or `|` separator.
fn extract_business_name(title: &str) -> String {
    let head = title.split('-').next().unwrap_or(title);
    head.split('|').next().unwrap_or(head).trim().to_string()
}

/// Character-bounded truncation for stored snippet content.
fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    content: Option<String>,
}

// ---------------------------------------------------------------------------
// Snippet aggregation
// ---------------------------------------------------------------------------

/// Consolidate search results into one [`BusinessInfo`].
///
/// Only results whose title or content mentions the business name
/// (case-insensitive) contribute. The first matching snippet for each
/// field wins; later results never overwrite an already-found field.
fn extract_business_info(results: &[SearchResult], name: &str, location: &str) -> BusinessInfo {
    let mut info = BusinessInfo {
        name: name.to_string(),
        location: Some(location.to_string()),
        hours: None,
        phone: None,
        address: None,
        status: BusinessStatus::Unknown,
        sources: Vec::new(),
        error: None,
    };

    let needle = name.to_lowercase();
    for result in results {
        let content_lower = result.content.as_deref().unwrap_or("").to_lowercase();
        let title_lower = result.title.to_lowercase();

        if !title_lower.contains(&needle) && !content_lower.contains(&needle) {
            continue;
        }

        info.sources.push(BusinessSource {
            title: result.title.clone(),
            url: result.url.clone(),
            content: result.content.as_deref().map(|c| truncate(c, 300)),
        });

        if info.hours.is_none() {
            info.hours = extract_hours(&content_lower);
        }
        if info.phone.is_none() {
            info.phone = extract_phone(&content_lower);
        }
        if info.address.is_none() {
            info.address = extract_address(result.content.as_deref().unwrap_or(""));
        }
    }

    info.status = if info.hours.is_some() {
        BusinessStatus::Found
    } else {
        BusinessStatus::LimitedInfo
    };
    info
}

// ---------------------------------------------------------------------------
// Hours heuristic
// ---------------------------------------------------------------------------

/// Purely local business-hours check.
///
/// Free-text substring matching, not parsed opening-hour intervals: the
/// business counts as closed when the hours text contains both "closed"
/// and the 3-letter abbreviation of the scheduled weekday. Known to be
/// approximate; callers depend on its permissiveness.
pub fn validate_business_hours(info: &BusinessInfo, scheduled_date: &str) -> HoursCheck {
    let (Some(hours), Some(weekday)) = (&info.hours, weekday_name(scheduled_date)) else {
        return HoursCheck {
            is_valid: false,
            reason: "Insufficient information to validate hours".to_string(),
            suggestions: vec!["Contact the business directly to confirm hours".to_string()],
        };
    };

    let hours_lower = hours.to_lowercase();
    if hours_lower.contains("closed") && hours_lower.contains(&weekday[..3]) {
        return HoursCheck {
            is_valid: false,
            reason: format!("Business appears to be closed on {weekday}"),
            suggestions: vec![
                "Try a different day".to_string(),
                "Contact the business to confirm current hours".to_string(),
                "Look for alternative businesses nearby".to_string(),
            ],
        };
    }

    HoursCheck {
        is_valid: true,
        reason: "Business appears to be open".to_string(),
        suggestions: vec!["Consider calling ahead to confirm availability".to_string()],
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for the web-search service.
pub struct LookupClient {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl LookupClient {
    pub fn new(config: &EnrichmentConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.search_api_key.clone(),
            base_url: config.search_base_url.clone(),
        }
    }

    /// Whether a credential is configured.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn search(
        &self,
        api_key: &str,
        query: &str,
        depth: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, reqwest::Error> {
        let body = json!({
            "api_key": api_key,
            "query": query,
            "search_depth": depth,
            "include_images": false,
            "include_answer": true,
            "max_results": max_results,
        });

        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let parsed: SearchResponse = response.json().await?;
        Ok(parsed.results)
    }

    /// Look up a business by name and location.
    ///
    /// Never returns a hard error: unconfigured and transport failures
    /// each degrade to their sentinel status.
    pub async fn search_business(&self, name: &str, location: &str) -> BusinessInfo {
        let Some(api_key) = self.api_key.clone() else {
            return BusinessInfo::unconfigured(name, location);
        };

        let query = format!("{name} {location} hours contact information");
        match self.search(&api_key, &query, "advanced", 5).await {
            Ok(results) => {
                let info = extract_business_info(&results, name, location);
                tracing::debug!(
                    business = %name,
                    status = ?info.status,
                    sources = info.sources.len(),
                    "Business lookup completed"
                );
                info
            }
            Err(err) => {
                tracing::warn!(business = %name, error = %err, "Business lookup failed");
                BusinessInfo::unknown(name, location)
            }
        }
    }

    /// Best-effort nearby-business search. Returns an empty list (not
    /// an error) when unconfigured or on transport failure.
    pub async fn search_nearby_businesses(
        &self,
        business_type: &str,
        location: &str,
        max_results: usize,
    ) -> Vec<NearbyBusiness> {
        let Some(api_key) = self.api_key.clone() else {
            return Vec::new();
        };

        let query = format!("{business_type} near {location} hours contact");
        match self.search(&api_key, &query, "basic", max_results).await {
            Ok(results) => results
                .into_iter()
                .map(|result| NearbyBusiness {
                    name: extract_business_name(&result.title),
                    url: result.url,
                    description: result.content.as_deref().map(|c| truncate(c, 200)),
                    source: result.title,
                })
                .collect(),
            Err(err) => {
                tracing::warn!(error = %err, "Nearby-business search failed");
                Vec::new()
            }
        }
    }
}
