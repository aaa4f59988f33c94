//! Conversion of raw process output and engine errors into `ExecutionResult`.

use crate::{
    error::Error,
    types::{ExecutionResult, ProcessOutput},
};

/// Exit status reserved by the input wrappers for "ran out of input lines"
pub const INPUT_EXHAUSTED_EXIT_CODE: i32 = 87;

/// Line the input wrappers write to stderr before exiting with
/// [`INPUT_EXHAUSTED_EXIT_CODE`]
pub const INPUT_EXHAUSTED_SENTINEL: &str = "EOFError: not enough input provided";

pub const INSUFFICIENT_INPUT_MESSAGE: &str =
    "Not enough input provided. Add one value per line in the input box and run again.";

pub const COMPILATION_FAILED_MESSAGE: &str = "Compilation failed";

pub fn timeout_message(secs: u64) -> String {
    format!(
        "Execution timed out ({} seconds). Check for infinite loops or code waiting on input.",
        secs
    )
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn input_exhausted(output: &ProcessOutput) -> bool {
    output.exit_code == Some(INPUT_EXHAUSTED_EXIT_CODE)
        || output.stderr.contains(INPUT_EXHAUSTED_SENTINEL)
}

/// Map the run step of any language.
///
/// Stdout produced before a failure is kept. Stderr from a successful run
/// (warnings, debug prints) is still surfaced. Only `input_guarded` runs
/// read exit status 87 as exhausted input.
pub fn run_result(output: ProcessOutput, input_guarded: bool) -> ExecutionResult {
    if input_guarded && input_exhausted(&output) {
        return ExecutionResult {
            output: non_empty(output.stdout),
            error: Some(INSUFFICIENT_INPUT_MESSAGE.to_string()),
        };
    }

    let stderr = output.stderr.trim().to_string();
    let error = match (output.exit_code, stderr.is_empty()) {
        (_, false) => Some(stderr),
        (Some(0), true) => None,
        (Some(code), true) => Some(format!("Process exited with status {}", code)),
        (None, true) => Some("Process was terminated by a signal".to_string()),
    };

    ExecutionResult {
        output: non_empty(output.stdout),
        error,
    }
}

/// Map a failed compile step: the compiler's diagnostics verbatim
pub fn compile_failure(output: ProcessOutput) -> ExecutionResult {
    let diagnostics = if output.stderr.trim().is_empty() {
        // javac occasionally reports on stdout
        output.stdout
    } else {
        output.stderr
    };
    if diagnostics.trim().is_empty() {
        return ExecutionResult::from_error(COMPILATION_FAILED_MESSAGE);
    }
    ExecutionResult::from_error(diagnostics)
}

impl From<Error> for ExecutionResult {
    fn from(error: Error) -> Self {
        let message = match error {
            Error::Timeout(secs) => timeout_message(secs),
            Error::UnsupportedLanguage(_)
            | Error::LanguageDisabled(_)
            | Error::ToolchainMissing(_) => error.to_string(),
            other => format!("Execution failed: {}", other),
        };
        ExecutionResult::from_error(message)
    }
}
