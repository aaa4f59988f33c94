//! Language-specific adapters.
//!
//! An adapter turns user source plus the serialized input lines into the
//! files to write into the workspace and the commands to run there. It does
//! no I/O itself; the executor materializes the files and drives the runner.

mod c;
mod java;
mod javascript;
mod python;

pub use c::CAdapter;
pub use java::{extract_class_name, JavaAdapter};
pub use javascript::{needs_input_wrapper, JavaScriptAdapter};
pub use python::PythonAdapter;

use crate::{
    config::ToolchainConfig,
    error::Error,
    input::InputLines,
    runner::CommandSpec,
    types::Language,
};
use which::which;

/// A file generated into the workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub contents: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }
}

/// Everything needed to execute one program
#[derive(Debug, Clone)]
pub struct PreparedProgram {
    pub files: Vec<SourceFile>,
    /// Present for compiled languages; must exit 0 before `run` is attempted
    pub compile: Option<CommandSpec>,
    pub run: CommandSpec,
    /// Set when a generated wrapper owns the program's input and reports
    /// exhaustion through `INPUT_EXHAUSTED_EXIT_CODE`; any other program's
    /// exit status is its own
    pub input_guarded: bool,
}

impl PreparedProgram {
    pub fn file(&self, name: &str) -> Option<&SourceFile> {
        self.files.iter().find(|file| file.name == name)
    }
}

/// Trait for language-specific adapters
pub trait LanguageAdapter: Send + Sync {
    fn language(&self) -> Language;

    /// Name used in the "<name> is not installed" message
    fn toolchain_name(&self) -> &str;

    /// Programs that must be on `PATH` for this language
    fn required_tools(&self) -> Vec<&str>;

    /// Wrap the source and build the compile/run commands
    fn prepare(&self, code: &str, input: &InputLines) -> Result<PreparedProgram, Error>;

    fn check_tools(&self) -> Result<(), Error> {
        let missing: Vec<_> = self
            .required_tools()
            .into_iter()
            .filter(|tool| which(tool).is_err())
            .collect();

        if !missing.is_empty() {
            tracing::warn!(
                "Missing {} tools: {}",
                self.language(),
                missing.join(", ")
            );
            return Err(Error::ToolchainMissing(self.toolchain_name().to_string()));
        }
        Ok(())
    }
}

/// Build the adapter for `language` using the configured program names
pub fn adapter_for(language: Language, toolchain: &ToolchainConfig) -> Box<dyn LanguageAdapter> {
    match language {
        Language::Python => Box::new(PythonAdapter::new(toolchain.python.clone())),
        Language::JavaScript => Box::new(JavaScriptAdapter::new(toolchain.node.clone())),
        Language::Java => Box::new(JavaAdapter::new(
            toolchain.javac.clone(),
            toolchain.java.clone(),
        )),
        Language::C => Box::new(CAdapter::new(toolchain.cc.clone())),
    }
}

/// Render `text` as a double-quoted literal valid in both Python and JavaScript
pub(crate) fn quoted_literal(text: &str) -> Result<String, Error> {
    Ok(serde_json::to_string(text)?)
}

#[cfg(test)]
pub(crate) fn skip_if_not_available(tools: &[&str]) -> bool {
    let missing: Vec<_> = tools
        .iter()
        .filter(|tool| which(**tool).is_err())
        .map(|s| (*s).to_string())
        .collect();

    if !missing.is_empty() {
        eprintln!("Skipping test: {} not available", missing.join(", "));
        return true;
    }
    false
}
