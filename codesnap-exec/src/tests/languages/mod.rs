use super::utils::defaults::*;
use crate::{languages::skip_if_not_available, CodeExecutionService, ExecutionResult};
use assert_fs::TempDir;

pub mod c;
pub mod java;
pub mod javascript;
pub mod python;

// Common test utilities for language tests

/// Execute through a real service; `None` when the toolchain is missing
pub(crate) async fn run_program(
    tools: &[&str],
    language: &str,
    code: &str,
    input: Option<&str>,
) -> Option<ExecutionResult> {
    if skip_if_not_available(tools) {
        return None;
    }
    let root = TempDir::new().unwrap();
    let service = CodeExecutionService::new(test_config(root.path())).unwrap();
    let result = service.execute(language, code, input).await;

    // Nothing generated for the request may survive it
    assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
    Some(result)
}

pub(crate) async fn run_with_short_timeout(
    tools: &[&str],
    language: &str,
    code: &str,
) -> Option<ExecutionResult> {
    if skip_if_not_available(tools) {
        return None;
    }
    let root = TempDir::new().unwrap();
    let service = CodeExecutionService::new(short_timeout_config(root.path())).unwrap();
    Some(service.execute(language, code, None).await)
}

pub(crate) async fn test_language_execution(tools: &[&str], language: &str, code: &str) {
    let Some(result) = run_program(tools, language, code, None).await else {
        return;
    };
    assert!(result.output.unwrap().contains("Hello from"));
    assert_eq!(result.error, None);
}
