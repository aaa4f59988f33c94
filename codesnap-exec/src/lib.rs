//! # CodeSnap execution engine
//!
//! Runs user-submitted Python, JavaScript, Java and C programs in a
//! per-request workspace directory, feeds them pre-supplied input lines and
//! returns what they printed. Every spawned process is bounded by a
//! wall-clock timeout and killed together with its process group.

mod config;
mod error;
mod executor;
mod input;
mod languages;
mod normalize;
mod runner;
mod service;
mod types;
mod workspace;

#[cfg(test)]
mod tests;

pub use config::{ExecutionConfig, ToolchainConfig};
pub use error::Error;
pub use executor::CodeExecutor;
pub use input::InputLines;
pub use languages::{
    adapter_for, extract_class_name, needs_input_wrapper, LanguageAdapter, PreparedProgram,
    SourceFile,
};
pub use normalize::{
    timeout_message, INPUT_EXHAUSTED_EXIT_CODE, INPUT_EXHAUSTED_SENTINEL,
    INSUFFICIENT_INPUT_MESSAGE,
};
pub use runner::{CommandRunner, CommandSpec, ProcessRunner};
pub use service::CodeExecutionService;
pub use types::{ExecutionRequest, ExecutionResult, Language, ProcessOutput};
pub use workspace::Workspace;

/// Result type for code execution operations
pub type Result<T> = std::result::Result<T, Error>;
