//! Validation status lattice, issue records, and the local date check.

use chrono::{Datelike, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::enrichment::{BusinessInfo, LocationData, ParsedData};
use crate::types::Timestamp;

/// Overall validation status of a todo.
///
/// `pending` is the stored default before any validation has run;
/// `error` only surfaces when the outer request handler catches a
/// propagated extraction failure. Within one orchestration run the
/// status moves only along `valid < warning < requires_attention`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Pending,
    Valid,
    Warning,
    RequiresAttention,
    Error,
}

impl ValidationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationStatus::Pending => "pending",
            ValidationStatus::Valid => "valid",
            ValidationStatus::Warning => "warning",
            ValidationStatus::RequiresAttention => "requires_attention",
            ValidationStatus::Error => "error",
        }
    }

    /// Severity rank used by [`escalate`](Self::escalate).
    fn severity(&self) -> u8 {
        match self {
            ValidationStatus::Pending => 0,
            ValidationStatus::Valid => 1,
            ValidationStatus::Warning => 2,
            ValidationStatus::RequiresAttention => 3,
            ValidationStatus::Error => 4,
        }
    }

    /// Monotonic status merge: returns the more severe of the two.
    ///
    /// This is the only way the orchestrator changes status, so a
    /// `requires_attention` can never be downgraded by a later step.
    #[must_use]
    pub fn escalate(self, to: ValidationStatus) -> ValidationStatus {
        if to.severity() > self.severity() {
            to
        } else {
            self
        }
    }
}

/// Category an issue belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    BusinessHours,
    BusinessInfo,
    Date,
}

/// One problem found during orchestration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub message: String,
    pub suggestions: Vec<String>,
}

/// The orchestrator's complete output for one input text.
///
/// Never persisted as its own entity; only used to populate a todo row
/// at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub original_text: String,
    pub parsed_data: ParsedData,
    pub validation_status: ValidationStatus,
    pub business_info: Option<BusinessInfo>,
    pub suggested_alternatives: Option<serde_json::Value>,
    pub validation_issues: Vec<ValidationIssue>,
    pub scheduled_datetime: Option<Timestamp>,
    pub location_data: LocationData,
}

/// Result of the local business-hours heuristic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoursCheck {
    pub is_valid: bool,
    pub reason: String,
    pub suggestions: Vec<String>,
}

/// Result of the local date check.
#[derive(Debug, Clone)]
pub struct DateCheck {
    pub is_valid: bool,
    pub reason: String,
    pub suggestions: Vec<String>,
}

/// Check a parsed date string against `today` (day granularity,
/// midnight-normalized). Unparseable or past dates are invalid.
pub fn check_date(date: &str, today: NaiveDate) -> DateCheck {
    let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
        return DateCheck {
            is_valid: false,
            reason: "Invalid date format".to_string(),
            suggestions: vec![
                "Use format YYYY-MM-DD".to_string(),
                "Specify a clear date".to_string(),
            ],
        };
    };

    if parsed < today {
        return DateCheck {
            is_valid: false,
            reason: "Date is in the past".to_string(),
            suggestions: vec![
                "Choose a future date".to_string(),
                "Update the date to today or later".to_string(),
            ],
        };
    }

    DateCheck {
        is_valid: true,
        reason: "Date is valid".to_string(),
        suggestions: Vec::new(),
    }
}

/// Combine a parsed `YYYY-MM-DD` date and optional `HH:MM` time into a
/// UTC timestamp. An unparseable time falls back to midnight; an
/// unparseable (or absent) date yields `None`.
pub fn combine_date_time(date: Option<&str>, time: Option<&str>) -> Option<Timestamp> {
    let date = NaiveDate::parse_from_str(date?, "%Y-%m-%d").ok()?;
    let time = time
        .and_then(|t| NaiveTime::parse_from_str(t, "%H:%M").ok())
        .unwrap_or(NaiveTime::MIN);
    Some(Utc.from_utc_datetime(&date.and_time(time)))
}

/// Full lowercase weekday name for a `YYYY-MM-DD` date string.
pub fn weekday_name(date: &str) -> Option<&'static str> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    Some(match parsed.weekday() {
        chrono::Weekday::Mon => "monday",
        chrono::Weekday::Tue => "tuesday",
        chrono::Weekday::Wed => "wednesday",
        chrono::Weekday::Thu => "thursday",
        chrono::Weekday::Fri => "friday",
        chrono::Weekday::Sat => "saturday",
        chrono::Weekday::Sun => "sunday",
    })
}
