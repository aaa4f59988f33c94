use super::*;
use crate::tests::fixtures::{
    code_samples::C_HELLO,
    code_with_input::C_SCANF,
    test_scenarios::{C_COMPILE_ERROR, C_EXITS_87, C_INFINITE_LOOP},
};

const TOOLS: &[&str] = &["gcc"];

#[tokio::test]
async fn test_c_basic() {
    test_language_execution(TOOLS, "c", C_HELLO).await
}

#[tokio::test]
async fn test_c_reads_stdin() {
    let Some(result) = run_program(TOOLS, "c", C_SCANF, Some("50\n8")).await else {
        return;
    };
    assert_eq!(result.output.as_deref(), Some("42\n"));
}

#[tokio::test]
async fn test_c_compile_error() {
    let Some(result) = run_program(TOOLS, "c", C_COMPILE_ERROR, None).await else {
        return;
    };
    assert_eq!(result.output, None);
    assert!(result.error.unwrap().contains("main.c"));
}

#[tokio::test]
async fn test_c_timeout() {
    let Some(result) = run_with_short_timeout(TOOLS, "c", C_INFINITE_LOOP).await else {
        return;
    };
    assert!(result.error.unwrap().starts_with("Execution timed out"));
}

#[tokio::test]
async fn test_c_exit_status_87_is_a_runtime_failure() {
    let Some(result) = run_program(TOOLS, "c", C_EXITS_87, None).await else {
        return;
    };
    assert_eq!(result.output.as_deref(), Some("done\n"));
    assert_eq!(result.error.as_deref(), Some("Process exited with status 87"));
}
