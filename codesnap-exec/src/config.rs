use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{error::Error, types::Language};

/// Engine configuration. Every field has a default so a partial TOML file
/// (or none at all) is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Wall-clock budget for running the program (seconds)
    pub run_timeout_secs: u64,
    /// Wall-clock budget for the compile step of Java and C (seconds)
    pub compile_timeout_secs: u64,
    /// Captured bytes kept per stream; the rest is drained and dropped
    pub max_output_bytes: usize,
    /// Parent directory for per-request workspaces
    pub workspace_root: PathBuf,
    /// Languages answered with a fixed "disabled" message
    pub disabled_languages: Vec<Language>,
    /// Maximum number of executions running at the same time
    pub max_concurrent_executions: usize,
    pub toolchain: ToolchainConfig,
}

/// Program names (or absolute paths) of the interpreters and compilers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    pub python: String,
    pub node: String,
    pub javac: String,
    pub java: String,
    pub cc: String,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            run_timeout_secs: 8,
            compile_timeout_secs: 8,
            max_output_bytes: 1024 * 1024, // 1MB
            workspace_root: std::env::temp_dir(),
            disabled_languages: Vec::new(),
            max_concurrent_executions: 10,
            toolchain: ToolchainConfig::default(),
        }
    }
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            python: "python3".to_string(),
            node: "node".to_string(),
            javac: "javac".to_string(),
            java: "java".to_string(),
            cc: "gcc".to_string(),
        }
    }
}

impl ExecutionConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, Error> {
        let config: Self = toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub async fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.run_timeout_secs == 0 || self.compile_timeout_secs == 0 {
            return Err(Error::Config("timeouts must be at least 1 second".to_string()));
        }
        if self.max_concurrent_executions == 0 {
            return Err(Error::Config(
                "max_concurrent_executions must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn run_timeout(&self) -> Duration {
        Duration::from_secs(self.run_timeout_secs)
    }

    pub fn compile_timeout(&self) -> Duration {
        Duration::from_secs(self.compile_timeout_secs)
    }

    pub fn is_disabled(&self, language: Language) -> bool {
        self.disabled_languages.contains(&language)
    }

    pub fn with_disabled(mut self, language: Language) -> Self {
        if !self.is_disabled(language) {
            self.disabled_languages.push(language);
        }
        self
    }

    pub fn with_workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = root.into();
        self
    }

    pub fn with_run_timeout(mut self, secs: u64) -> Self {
        self.run_timeout_secs = secs;
        self
    }
}
