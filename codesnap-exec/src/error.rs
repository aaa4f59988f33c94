use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("{0} execution is disabled in this environment.")]
    LanguageDisabled(String),

    #[error("{0} is not installed")]
    ToolchainMissing(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Workspace error: {0}")]
    Workspace(String),

    #[error("Process error: {0}")]
    Process(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
