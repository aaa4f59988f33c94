use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TutorConfig {
    /// Base URL of the chat-completions API
    pub api_url: String,

    /// API key; without one the client answers with fixed fallbacks
    pub api_key: Option<String>,

    /// Model name sent with every request
    pub model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl TutorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank keys count as not configured.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        self.api_key = (!api_key.trim().is_empty()).then_some(api_key);
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
