//! Chat-completion adapter for text extraction and suggestions.
//!
//! Error policy is deliberately asymmetric: transport and API failures
//! propagate as [`ExtractionError`], while an unconfigured credential
//! or unparseable completion content degrades to a fallback value. The
//! distinct cases are modeled by [`Outcome`] before being collapsed.

use serde::Deserialize;
use serde_json::json;
use tasksense_core::enrichment::{BusinessInfo, ParsedData, SuggestedAlternatives, Suggestion};
use tasksense_core::validation::ValidationIssue;

use crate::config::EnrichmentConfig;

/// Errors from the chat-completion adapter. These always propagate to
/// the caller; degraded modes are not errors.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// The HTTP request itself failed (network, DNS, TLS, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Completion API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The service answered 2xx but the completion envelope had no
    /// choices to read.
    #[error("Malformed completion response: no choices returned")]
    MalformedResponse,
}

/// Per-call outcome of a completion request, kept distinct so callers
/// can react differently even though several variants currently map to
/// the same fallback value. Transport failures are `Err`, not a
/// variant.
#[derive(Debug)]
pub enum Outcome<T> {
    Success(T),
    /// No API key configured; the call was never made.
    Unconfigured,
    /// The call succeeded but the content was not the expected shape.
    ContentError {
        raw: String,
    },
}

impl Outcome<String> {
    /// Decode a successful completion's content as JSON, downgrading a
    /// parse failure to [`Outcome::ContentError`].
    fn decode<T: serde::de::DeserializeOwned>(self) -> Outcome<T> {
        match self {
            Outcome::Success(raw) => match serde_json::from_str(&raw) {
                Ok(value) => Outcome::Success(value),
                Err(_) => Outcome::ContentError { raw },
            },
            Outcome::Unconfigured => Outcome::Unconfigured,
            Outcome::ContentError { raw } => Outcome::ContentError { raw },
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

/// HTTP client for the chat-completion service.
pub struct ExtractionClient {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl ExtractionClient {
    pub fn new(config: &EnrichmentConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.extraction_api_key.clone(),
            base_url: config.extraction_base_url.clone(),
            model: config.extraction_model.clone(),
        }
    }

    /// Whether a credential is configured.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Issue one chat-completion request and return the raw content of
    /// the first choice.
    async fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f64,
    ) -> Result<Outcome<String>, ExtractionError> {
        let Some(api_key) = &self.api_key else {
            return Ok(Outcome::Unconfigured);
        };

        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
            "temperature": temperature,
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatResponse = response.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .ok_or(ExtractionError::MalformedResponse)?
            .message
            .content;

        Ok(Outcome::Success(content.trim().to_string()))
    }

    /// Extract structured fields from a free-text todo description.
    ///
    /// Degraded modes (no credential, unparseable content) return
    /// [`ParsedData::fallback`]; transport failures propagate.
    pub async fn parse_todo_text(&self, text: &str) -> Result<ParsedData, ExtractionError> {
        let today = chrono::Utc::now().date_naive();
        let system = format!(
            "You are a helpful assistant that extracts structured data from natural \
             language todo entries. Extract the following information and return ONLY \
             a valid JSON object:\n\
             - task: the main action/task to be performed\n\
             - date: the date if mentioned (format: YYYY-MM-DD)\n\
             - time: the time if mentioned (format: HH:MM)\n\
             - business_name: the name of a business if mentioned\n\
             - business_type: the type of business (bakery, restaurant, store, etc.)\n\
             - location: the address or city mentioned\n\
             - urgency: low/medium/high based on context\n\
             - category: Work/Personal based on context\n\n\
             If a field is not mentioned or unclear, set it to null.\n\
             Current date context: {today}"
        );

        match self.complete(&system, text, 0.1).await?.decode::<ParsedData>() {
            Outcome::Success(parsed) => Ok(parsed),
            Outcome::Unconfigured => Ok(ParsedData::fallback(text)),
            Outcome::ContentError { raw } => {
                tracing::warn!(
                    content = %raw,
                    "Completion content was not parseable as extraction JSON; using fallback"
                );
                Ok(ParsedData::fallback(text))
            }
        }
    }

    /// Generate alternative suggestions for a todo with validation
    /// issues. Same error policy as [`parse_todo_text`](Self::parse_todo_text).
    pub async fn generate_suggestions(
        &self,
        parsed: &ParsedData,
        business_info: Option<&BusinessInfo>,
        issues: &[ValidationIssue],
    ) -> Result<SuggestedAlternatives, ExtractionError> {
        let system = "You are a helpful assistant that generates practical suggestions for \
                      todo items that have validation issues. Based on the parsed todo data, \
                      business information, and validation issues, provide helpful \
                      alternatives. Return a JSON object with:\n\
                      - suggestions: array of suggestion objects with {type, description, action}\n\
                      - reasoning: brief explanation of why the suggestions were made";

        let user = format!(
            "Parsed Data: {}\nBusiness Info: {}\nValidation Issues: {}\n\n\
             Please provide practical suggestions to resolve these issues.",
            serde_json::to_string(parsed).unwrap_or_default(),
            serde_json::to_string(&business_info).unwrap_or_default(),
            serde_json::to_string(issues).unwrap_or_default(),
        );

        match self
            .complete(system, &user, 0.3)
            .await?
            .decode::<SuggestedAlternatives>()
        {
            Outcome::Success(alternatives) => Ok(alternatives),
            Outcome::Unconfigured => Ok(SuggestedAlternatives {
                suggestions: vec![Suggestion {
                    kind: "general".to_string(),
                    description: "Suggestion service not available. Please review the todo manually."
                        .to_string(),
                    action: "manual_review".to_string(),
                }],
                reasoning: "Extraction API not configured".to_string(),
            }),
            Outcome::ContentError { raw } => {
                tracing::warn!(
                    content = %raw,
                    "Completion content was not parseable as suggestions JSON; using fallback"
                );
                Ok(SuggestedAlternatives {
                    suggestions: vec![Suggestion {
                        kind: "general".to_string(),
                        description: "Please review the todo details and try again".to_string(),
                        action: "modify_todo".to_string(),
                    }],
                    reasoning: "Unable to generate specific suggestions".to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn client_for(server: &Server, api_key: Option<&str>) -> ExtractionClient {
        ExtractionClient::new(&EnrichmentConfig {
            extraction_api_key: api_key.map(String::from),
            extraction_base_url: server.url(),
            extraction_model: "test-model".to_string(),
            search_api_key: None,
            search_base_url: server.url(),
        })
    }

    fn completion_body(content: &str) -> String {
        serde_json::json!({
            "choices": [
                { "message": { "role": "assistant", "content": content } }
            ]
        })
        .to_string()
    }

    #[tokio::test]
    async fn unconfigured_returns_fallback_without_calling_out() {
        let server = Server::new_async().await;
        // No mock registered: any request would fail the test via Err.
        let client = client_for(&server, None);

        let parsed = client.parse_todo_text("buy bread").await.unwrap();
        assert_eq!(parsed.task.as_deref(), Some("buy bread"));
        assert_eq!(parsed.category.as_deref(), Some("Personal"));
    }

    #[tokio::test]
    async fn parses_structured_completion_content() {
        let mut server = Server::new_async().await;
        let content = r#"{"task":"pick up cake","date":"2026-09-05","time":"10:00",
            "business_name":"Sweet Crumb","business_type":"bakery",
            "location":"Portland","urgency":"high","category":"Personal"}"#;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_body(content))
            .create_async()
            .await;

        let client = client_for(&server, Some("sk-test"));
        let parsed = client
            .parse_todo_text("pick up cake from Sweet Crumb in Portland Sept 5 at 10")
            .await
            .unwrap();

        assert_eq!(parsed.task.as_deref(), Some("pick up cake"));
        assert_eq!(parsed.business_name.as_deref(), Some("Sweet Crumb"));
        assert_eq!(parsed.date.as_deref(), Some("2026-09-05"));
    }

    #[tokio::test]
    async fn garbage_content_degrades_to_fallback() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_body("Sure! Here are the fields you asked for..."))
            .create_async()
            .await;

        let client = client_for(&server, Some("sk-test"));
        let parsed = client.parse_todo_text("water the plants").await.unwrap();
        assert_eq!(parsed.task.as_deref(), Some("water the plants"));
        assert!(parsed.business_name.is_none());
    }

    #[tokio::test]
    async fn api_failure_propagates() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .with_body("upstream exploded")
            .create_async()
            .await;

        let client = client_for(&server, Some("sk-test"));
        let err = client.parse_todo_text("anything").await.unwrap_err();
        match err {
            ExtractionError::Api { status, .. } => assert_eq!(status, 500),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_choices_is_malformed() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let client = client_for(&server, Some("sk-test"));
        let err = client.parse_todo_text("anything").await.unwrap_err();
        assert!(matches!(err, ExtractionError::MalformedResponse));
    }

    #[tokio::test]
    async fn unconfigured_suggestions_are_canned() {
        let server = Server::new_async().await;
        let client = client_for(&server, None);

        let alternatives = client
            .generate_suggestions(&ParsedData::fallback("x"), None, &[])
            .await
            .unwrap();
        assert_eq!(alternatives.suggestions.len(), 1);
        assert_eq!(alternatives.suggestions[0].action, "manual_review");
    }
}
