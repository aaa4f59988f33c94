use super::*;
use crate::{
    normalize::INSUFFICIENT_INPUT_MESSAGE,
    tests::fixtures::{code_samples::JS_HELLO, code_with_input::*, test_scenarios::*},
};

const TOOLS: &[&str] = &["node"];

#[tokio::test]
async fn test_javascript_basic() {
    test_language_execution(TOOLS, "javascript", JS_HELLO).await
}

#[tokio::test]
async fn test_javascript_prompt_reads_lines() {
    let Some(result) = run_program(TOOLS, "javascript", JS_PROMPT, Some("Ada\n")).await else {
        return;
    };
    assert_eq!(result.output.as_deref(), Some("Name: Hello, Ada!\n"));
    assert_eq!(result.error, None);
}

#[tokio::test]
async fn test_javascript_prompt_exhausted() {
    let code = "const a = prompt();\nconst b = prompt();\nconsole.log(a + b);";
    let Some(result) = run_program(TOOLS, "javascript", code, Some("only one")).await else {
        return;
    };
    assert_eq!(result.output, None);
    assert_eq!(result.error.as_deref(), Some(INSUFFICIENT_INPUT_MESSAGE));
}

#[tokio::test]
async fn test_javascript_readline_gets_stdin() {
    let Some(result) = run_program(TOOLS, "javascript", JS_READLINE, Some("abc\nde")).await else {
        return;
    };
    assert_eq!(result.output.as_deref(), Some("3\n2\n"));
}

#[tokio::test]
async fn test_javascript_uncaught_error() {
    let Some(result) = run_program(TOOLS, "javascript", JS_THROWS, None).await else {
        return;
    };
    assert_eq!(result.output, None);
    assert!(result.error.unwrap().contains("Error: boom"));
}

#[tokio::test]
async fn test_javascript_timeout() {
    let Some(result) = run_with_short_timeout(TOOLS, "javascript", JS_INFINITE_LOOP).await else {
        return;
    };
    assert!(result.error.unwrap().starts_with("Execution timed out"));
}

#[tokio::test]
async fn test_javascript_may_declare_its_own_prompt() {
    let Some(result) = run_program(TOOLS, "javascript", JS_REDECLARES_PROMPT, None).await else {
        return;
    };
    assert_eq!(result.output.as_deref(), Some("function\n"));
    assert_eq!(result.error, None);
}

#[tokio::test]
async fn test_javascript_errors_point_at_user_lines() {
    let Some(result) = run_program(TOOLS, "javascript", JS_THROWS_ON_LINE_3, Some("7")).await
    else {
        return;
    };
    assert_eq!(result.output.as_deref(), Some("7\n"));
    let error = result.error.unwrap();
    assert!(error.contains("solution.js:3"), "unexpected error: {}", error);
    assert!(error.contains("Error: line three"));
}

#[tokio::test]
async fn test_javascript_exit_87_with_input_left_is_not_exhaustion() {
    let Some(result) = run_program(TOOLS, "javascript", JS_EXITS_87, Some("x")).await else {
        return;
    };
    assert_eq!(result.output.as_deref(), Some("x\n"));
    assert_eq!(result.error.as_deref(), Some("Process exited with status 1"));
}
