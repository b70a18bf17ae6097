//! Configuration for the outbound enrichment services.

/// Connection settings for both external services.
///
/// Either API key may be absent; each adapter then runs in its
/// documented degraded mode instead of failing.
#[derive(Debug, Clone)]
pub struct EnrichmentConfig {
    /// Chat-completion API key (`OPENAI_API_KEY`). `None` disables
    /// extraction and suggestion calls.
    pub extraction_api_key: Option<String>,
    /// Chat-completion base URL (default `https://api.openai.com/v1`).
    pub extraction_base_url: String,
    /// Completion model name (default `gpt-3.5-turbo`).
    pub extraction_model: String,
    /// Search API key (`TAVILY_API_KEY`). `None` disables lookups.
    pub search_api_key: Option<String>,
    /// Search base URL (default `https://api.tavily.com`).
    pub search_base_url: String,
}

impl EnrichmentConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                     |
    /// |------------------------|-----------------------------|
    /// | `OPENAI_API_KEY`       | unset (degraded mode)       |
    /// | `OPENAI_BASE_URL`      | `https://api.openai.com/v1` |
    /// | `EXTRACTION_MODEL`     | `gpt-3.5-turbo`             |
    /// | `TAVILY_API_KEY`       | unset (degraded mode)       |
    /// | `TAVILY_BASE_URL`      | `https://api.tavily.com`    |
    pub fn from_env() -> Self {
        let extraction_api_key = std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty());
        if extraction_api_key.is_none() {
            tracing::warn!("OPENAI_API_KEY not set; text extraction runs in degraded mode");
        }

        let search_api_key = std::env::var("TAVILY_API_KEY").ok().filter(|k| !k.is_empty());
        if search_api_key.is_none() {
            tracing::warn!("TAVILY_API_KEY not set; business lookup runs in degraded mode");
        }

        Self {
            extraction_api_key,
            extraction_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".into()),
            extraction_model: std::env::var("EXTRACTION_MODEL")
                .unwrap_or_else(|_| "gpt-3.5-turbo".into()),
            search_api_key,
            search_base_url: std::env::var("TAVILY_BASE_URL")
                .unwrap_or_else(|_| "https://api.tavily.com".into()),
        }
    }

    /// Configuration with both services disabled. Useful in tests and
    /// as an explicit offline mode.
    pub fn disabled() -> Self {
        Self {
            extraction_api_key: None,
            extraction_base_url: "https://api.openai.com/v1".into(),
            extraction_model: "gpt-3.5-turbo".into(),
            search_api_key: None,
            search_base_url: "https://api.tavily.com".into(),
        }
    }
}
