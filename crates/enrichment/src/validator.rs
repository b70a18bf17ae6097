//! The validation orchestrator: one linear pass per input text.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use serde_json::json;
use tasksense_core::enrichment::{
    AlternativeSet, BusinessInfo, BusinessStatus, LocationData, ParsedData,
};
use tasksense_core::validation::{
    check_date, combine_date_time, IssueType, ValidationIssue, ValidationResult, ValidationStatus,
};

use crate::extraction::{ExtractionClient, ExtractionError};
use crate::lookup::{validate_business_hours, LookupClient};

/// Sequences the extraction and lookup adapters over one request.
///
/// Adapters are constructed once at process start and injected here;
/// the orchestrator holds no per-request state. All steps within one
/// `validate` call are strictly sequential: extraction, then lookup,
/// then local checks, then (conditionally) suggestions. No retries, no
/// fan-out.
pub struct TodoValidator {
    extraction: Arc<ExtractionClient>,
    lookup: Arc<LookupClient>,
}

impl TodoValidator {
    pub fn new(extraction: Arc<ExtractionClient>, lookup: Arc<LookupClient>) -> Self {
        Self { extraction, lookup }
    }

    /// The shared lookup adapter (also used by the nearby-business
    /// search endpoint).
    pub fn lookup(&self) -> &Arc<LookupClient> {
        &self.lookup
    }

    /// Run the full validation pipeline over one input text.
    ///
    /// A transport failure from the extraction adapter propagates; the
    /// lookup adapter never fails hard. Status moves only up the
    /// `valid < warning < requires_attention` lattice.
    pub async fn validate(&self, text: &str) -> Result<ValidationResult, ExtractionError> {
        let parsed = self.extraction.parse_todo_text(text).await?;

        let mut status = ValidationStatus::Valid;
        let mut issues: Vec<ValidationIssue> = Vec::new();
        let mut business_info: Option<BusinessInfo> = None;

        if let (Some(name), Some(location)) = (&parsed.business_name, &parsed.location) {
            let info = self.lookup.search_business(name, location).await;

            if let Some(date) = &parsed.date {
                let hours_check = validate_business_hours(&info, date);
                if !hours_check.is_valid {
                    status = status.escalate(ValidationStatus::RequiresAttention);
                    issues.push(ValidationIssue {
                        issue_type: IssueType::BusinessHours,
                        message: hours_check.reason,
                        suggestions: hours_check.suggestions,
                    });
                }
            }

            if info.status == BusinessStatus::Unknown {
                status = status.escalate(ValidationStatus::Warning);
                issues.push(ValidationIssue {
                    issue_type: IssueType::BusinessInfo,
                    message: "Could not find detailed business information".to_string(),
                    suggestions: vec![
                        "Verify business name and location".to_string(),
                        "Contact business directly".to_string(),
                    ],
                });
            }

            business_info = Some(info);
        }

        if let Some(date) = &parsed.date {
            let date_check = check_date(date, Utc::now().date_naive());
            if !date_check.is_valid {
                status = status.escalate(ValidationStatus::Warning);
                issues.push(ValidationIssue {
                    issue_type: IssueType::Date,
                    message: date_check.reason,
                    suggestions: date_check.suggestions,
                });
            }
        }

        // Suggestions are attached for the user to act on; they never
        // auto-correct the record.
        let suggested_alternatives = if issues.is_empty() {
            None
        } else {
            let alternatives = self
                .extraction
                .generate_suggestions(&parsed, business_info.as_ref(), &issues)
                .await?;
            Some(serde_json::to_value(alternatives).unwrap_or(serde_json::Value::Null))
        };

        tracing::info!(
            status = status.as_str(),
            issues = issues.len(),
            has_business = business_info.is_some(),
            "Todo validation completed"
        );

        Ok(ValidationResult {
            original_text: text.to_string(),
            scheduled_datetime: combine_date_time(parsed.date.as_deref(), parsed.time.as_deref()),
            location_data: LocationData {
                query: parsed.location.clone(),
                address: business_info.as_ref().and_then(|b| b.address.clone()),
                coordinates: None,
            },
            parsed_data: parsed,
            validation_status: status,
            business_info,
            suggested_alternatives,
            validation_issues: issues,
        })
    }

    /// Build themed alternative groups for a stored todo: nearby
    /// businesses when business context exists, and replacement dates
    /// when a business-hours issue was recorded. Best-effort only.
    pub async fn generate_alternatives(
        &self,
        parsed: &ParsedData,
        business_info: Option<&BusinessInfo>,
        issues: &[ValidationIssue],
    ) -> Vec<AlternativeSet> {
        let mut alternatives = Vec::new();

        if business_info.is_some() && parsed.business_name.is_some() {
            if let Some(location) = &parsed.location {
                let business_type = parsed.business_type.as_deref().unwrap_or("business");
                let nearby = self
                    .lookup
                    .search_nearby_businesses(business_type, location, 3)
                    .await;

                if !nearby.is_empty() {
                    alternatives.push(AlternativeSet {
                        kind: "alternative_businesses".to_string(),
                        title: "Try nearby businesses".to_string(),
                        options: nearby
                            .into_iter()
                            .map(|b| {
                                json!({
                                    "name": b.name,
                                    "description": b.description,
                                    "action": "replace_business",
                                })
                            })
                            .collect(),
                    });
                }
            }
        }

        let has_hours_issue = issues
            .iter()
            .any(|issue| issue.issue_type == IssueType::BusinessHours);
        if has_hours_issue {
            if let Some(date) = &parsed.date {
                let options: Vec<_> = date_alternatives(date)
                    .into_iter()
                    .map(|alt| {
                        json!({
                            "date": alt.format("%Y-%m-%d").to_string(),
                            "description": alt.format("%A, %B %-d").to_string(),
                            "action": "update_date",
                        })
                    })
                    .collect();
                if !options.is_empty() {
                    alternatives.push(AlternativeSet {
                        kind: "alternative_dates".to_string(),
                        title: "Try different dates".to_string(),
                        options,
                    });
                }
            }
        }

        alternatives
    }
}

/// The three days following the original date, as candidates for
/// rescheduling.
fn date_alternatives(original_date: &str) -> Vec<NaiveDate> {
    let Ok(base) = NaiveDate::parse_from_str(original_date, "%Y-%m-%d") else {
        return Vec::new();
    };
    (1..=3).map(|offset| base + Duration::days(offset)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnrichmentConfig;
    use mockito::Server;

    fn offline_validator() -> TodoValidator {
        let config = EnrichmentConfig::disabled();
        TodoValidator::new(
            Arc::new(ExtractionClient::new(&config)),
            Arc::new(LookupClient::new(&config)),
        )
    }

    /// Validator with both adapters configured against a mock server.
    fn mocked_validator(server: &Server) -> TodoValidator {
        let config = EnrichmentConfig {
            extraction_api_key: Some("sk-test".to_string()),
            extraction_base_url: server.url(),
            extraction_model: "test-model".to_string(),
            search_api_key: Some("tvly-test".to_string()),
            search_base_url: server.url(),
        };
        TodoValidator::new(
            Arc::new(ExtractionClient::new(&config)),
            Arc::new(LookupClient::new(&config)),
        )
    }

    fn completion_body(content: &str) -> String {
        serde_json::json!({
            "choices": [
                { "message": { "content": content } }
            ]
        })
        .to_string()
    }

    #[tokio::test]
    async fn degraded_mode_end_to_end_is_valid_with_zero_issues() {
        let validator = offline_validator();
        let result = validator
            .validate("buy groceries from Walmart on Saturday morning")
            .await
            .unwrap();

        // Fallback extraction: the whole text is the task, no business
        // context, so no lookup and no issues.
        assert_eq!(
            result.parsed_data.task.as_deref(),
            Some("buy groceries from Walmart on Saturday morning")
        );
        assert_eq!(result.parsed_data.category.as_deref(), Some("Personal"));
        assert!(result.parsed_data.business_name.is_none());
        assert_eq!(result.validation_status, ValidationStatus::Valid);
        assert!(result.validation_issues.is_empty());
        assert!(result.business_info.is_none());
        assert!(result.suggested_alternatives.is_none());
        assert!(result.scheduled_datetime.is_none());
    }

    #[test]
    fn date_alternatives_are_the_next_three_days() {
        let alts = date_alternatives("2026-09-05");
        assert_eq!(
            alts,
            vec![
                NaiveDate::from_ymd_opt(2026, 9, 6).unwrap(),
                NaiveDate::from_ymd_opt(2026, 9, 7).unwrap(),
                NaiveDate::from_ymd_opt(2026, 9, 8).unwrap(),
            ]
        );
        assert!(date_alternatives("whenever").is_empty());
    }

    #[tokio::test]
    async fn failed_lookup_with_past_date_escalates_to_requires_attention() {
        let mut server = Server::new_async().await;
        // Extraction yields business context plus a date in the past.
        // The same completion body also serves the suggestions call,
        // where it is not valid suggestions JSON and so degrades to the
        // canned fallback.
        let content = r#"{"task":"pick up cake","date":"2020-01-01","time":null,
            "business_name":"Sweet Crumb","business_type":"bakery",
            "location":"Portland","urgency":"medium","category":"Personal"}"#;
        let _extraction = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_body(content))
            .create_async()
            .await;
        let _lookup = server
            .mock("POST", "/search")
            .with_status(500)
            .create_async()
            .await;

        let validator = mocked_validator(&server);
        let result = validator
            .validate("pick up cake from Sweet Crumb in Portland on Jan 1 2020")
            .await
            .unwrap();

        // The hours check cannot pass with no hours on record, so the
        // status reaches requires_attention; the later warning-level
        // lookup and date issues never downgrade it.
        assert_eq!(result.validation_status, ValidationStatus::RequiresAttention);

        let types: Vec<_> = result
            .validation_issues
            .iter()
            .map(|issue| issue.issue_type)
            .collect();
        assert_eq!(
            types,
            vec![IssueType::BusinessHours, IssueType::BusinessInfo, IssueType::Date]
        );
        assert!(result
            .validation_issues
            .iter()
            .any(|issue| issue.message == "Date is in the past"));

        let info = result.business_info.expect("lookup ran");
        assert_eq!(info.status, BusinessStatus::Unknown);
        // Issues were found, so suggestions were attached.
        assert!(result.suggested_alternatives.is_some());
    }

    #[tokio::test]
    async fn failed_lookup_without_date_is_only_a_warning() {
        let mut server = Server::new_async().await;
        let content = r#"{"task":"pick up cake","date":null,"time":null,
            "business_name":"Sweet Crumb","business_type":"bakery",
            "location":"Portland","urgency":"medium","category":"Personal"}"#;
        let _extraction = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_body(content))
            .create_async()
            .await;
        let _lookup = server
            .mock("POST", "/search")
            .with_status(500)
            .create_async()
            .await;

        let validator = mocked_validator(&server);
        let result = validator
            .validate("pick up cake from Sweet Crumb in Portland")
            .await
            .unwrap();

        // No date means no hours check and no date check; the unknown
        // lookup result alone raises a warning.
        assert_eq!(result.validation_status, ValidationStatus::Warning);
        assert_eq!(result.validation_issues.len(), 1);
        assert_eq!(result.validation_issues[0].issue_type, IssueType::BusinessInfo);
        assert!(result.scheduled_datetime.is_none());
    }

    #[tokio::test]
    async fn alternatives_without_business_context_are_empty() {
        let validator = offline_validator();
        let parsed = ParsedData::fallback("walk the dog");
        let alternatives = validator.generate_alternatives(&parsed, None, &[]).await;
        assert!(alternatives.is_empty());
    }
}
