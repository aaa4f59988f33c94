use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("API error: {status_code} - {message}")]
    Api { status_code: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid JSON in model reply: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API key not configured")]
    NotConfigured,
}
