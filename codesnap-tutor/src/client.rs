use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use crate::{
    config::TutorConfig,
    error::Error,
    types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Explanation},
};

const EXPLAIN_SYSTEM_PROMPT: &str =
    "You are a strict JSON-only API. Respond ONLY with valid JSON.";

const EXPLAIN_PROMPT: &str = r#"Return ONLY valid JSON. No markdown. No extra text.

{
  "explanation": "Explain the error clearly for a beginner",
  "corrected_code": "Provide corrected full code",
  "learning_tip": "One short learning tip"
}
"#;

const TUTOR_PROMPT: &str = "You are a friendly programming tutor for beginners.
- Be clear and concise; avoid jargon.
- Support Python, JavaScript, Java, and C.
- Explain concepts, syntax, logic, common errors, and best practices.
- Give short examples when helpful.
- Encourage and keep a positive tone.";

pub const EXPLAIN_NOT_CONFIGURED: &str = "Groq API key not configured.";
pub const EXPLAIN_NOT_CONFIGURED_TIP: &str = "Set your GROQ_API_KEY environment variable.";
pub const EXPLAIN_FAILED: &str = "Internal AI processing error.";
pub const MISSING_EXPLANATION: &str = "The AI did not return an explanation.";
pub const MISSING_LEARNING_TIP: &str =
    "Try to understand why this error happened and how the fix works.";
pub const TUTOR_NOT_CONFIGURED: &str =
    "AI tutor is unavailable because GROQ_API_KEY is not configured.";
pub const TUTOR_FAILED: &str = "The AI tutor encountered a problem. Please try again in a moment.";

/// Client for the chat-completions API behind explain and tutor
#[derive(Clone)]
pub struct TutorClient {
    client: Client,
    config: TutorConfig,
}

impl TutorClient {
    pub fn new(config: TutorConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(Error::HttpClient)?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &TutorConfig {
        &self.config
    }

    /// Explain `error` for a beginner and propose a fix. Never fails: a
    /// missing key or a failed call yields a fallback explanation that
    /// echoes the submitted code.
    pub async fn explain(&self, language: &str, code: &str, error: &str) -> Explanation {
        if !self.config.is_configured() {
            return Explanation {
                explanation: EXPLAIN_NOT_CONFIGURED.to_string(),
                corrected_code: code.to_string(),
                learning_tip: EXPLAIN_NOT_CONFIGURED_TIP.to_string(),
            };
        }

        match self.try_explain(language, code, error).await {
            Ok(explanation) => explanation,
            Err(e) => {
                warn!("Explain request failed: {}", e);
                Explanation {
                    explanation: EXPLAIN_FAILED.to_string(),
                    corrected_code: code.to_string(),
                    learning_tip: e.to_string(),
                }
            }
        }
    }

    /// Free-form tutoring reply. Never fails.
    pub async fn tutor(&self, message: &str, language: &str) -> String {
        if !self.config.is_configured() {
            return TUTOR_NOT_CONFIGURED.to_string();
        }

        match self.try_tutor(message, language).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Tutor request failed: {}", e);
                TUTOR_FAILED.to_string()
            }
        }
    }

    async fn try_explain(
        &self,
        language: &str,
        code: &str,
        error: &str,
    ) -> Result<Explanation, Error> {
        let prompt = format!(
            "{}\nLanguage: {}\n\nCode:\n{}\n\nError:\n{}\n",
            EXPLAIN_PROMPT, language, code, error
        );
        let content = self
            .complete(
                vec![
                    ChatMessage::system(EXPLAIN_SYSTEM_PROMPT),
                    ChatMessage::user(prompt),
                ],
                0.2,
                512,
            )
            .await?;

        parse_explanation(&content, code)
    }

    async fn try_tutor(&self, message: &str, language: &str) -> Result<String, Error> {
        let system = format!(
            "{}\nCurrent language focus: {}\nIf the user asks something unrelated to programming, briefly steer them back to coding topics.",
            TUTOR_PROMPT, language
        );
        let content = self
            .complete(
                vec![ChatMessage::system(system), ChatMessage::user(message)],
                0.6,
                600,
            )
            .await?;

        Ok(content.trim().to_string())
    }

    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, Error> {
        let api_key = self.config.api_key.as_deref().ok_or(Error::NotConfigured)?;
        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            temperature,
            max_tokens,
            stream: false,
        };

        debug!("Sending chat completion to {}", self.config.api_url);
        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.api_url))
            .header("Content-Type", "application/json")
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Api {
                status_code: response.status().as_u16(),
                message: response.text().await?,
            });
        }

        let completion: ChatCompletionResponse =
            response.json().await.map_err(Error::HttpClient)?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| Error::InvalidResponse("no choices returned".to_string()))
    }
}

/// Pull the JSON object out of a model reply that may carry text around it,
/// filling absent keys with defaults.
fn parse_explanation(content: &str, code: &str) -> Result<Explanation, Error> {
    let json_text = match (content.find('{'), content.rfind('}')) {
        (Some(start), Some(end)) if start < end => &content[start..=end],
        _ => {
            return Err(Error::InvalidResponse(
                "reply does not contain a JSON object".to_string(),
            ))
        }
    };

    let data: serde_json::Value = serde_json::from_str(json_text)?;
    let field = |key: &str, default: &str| {
        data.get(key)
            .and_then(serde_json::Value::as_str)
            .unwrap_or(default)
            .to_string()
    };

    Ok(Explanation {
        explanation: field("explanation", MISSING_EXPLANATION),
        corrected_code: field("corrected_code", code),
        learning_tip: field("learning_tip", MISSING_LEARNING_TIP),
    })
}
