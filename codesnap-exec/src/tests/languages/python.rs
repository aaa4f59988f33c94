use super::*;
use crate::{
    normalize::INSUFFICIENT_INPUT_MESSAGE,
    tests::fixtures::{code_samples::PYTHON_HELLO, code_with_input::*, test_scenarios::*},
};
use std::time::{Duration, Instant};

const TOOLS: &[&str] = &["python3"];

#[tokio::test]
async fn test_python_basic() {
    test_language_execution(TOOLS, "python", PYTHON_HELLO).await
}

#[tokio::test]
async fn test_python_echoes_input() {
    let Some(result) = run_program(TOOLS, "python", PYTHON_ECHO, Some("hello")).await else {
        return;
    };
    assert_eq!(result.output.as_deref(), Some("hello\n"));
    assert_eq!(result.error, None);
}

#[tokio::test]
async fn test_python_prompts_are_printed() {
    let Some(result) = run_program(TOOLS, "python", PYTHON_SUM, Some("2\n40\n\n")).await else {
        return;
    };
    assert_eq!(result.output.as_deref(), Some("a: b: 42\n"));
    assert_eq!(result.error, None);
}

#[tokio::test]
async fn test_python_reads_sys_stdin() {
    let Some(result) = run_program(TOOLS, "python", PYTHON_STDIN, Some("ab\ncd")).await else {
        return;
    };
    assert_eq!(result.output.as_deref(), Some("AB\nCD\n"));
}

#[tokio::test]
async fn test_python_insufficient_input() {
    let started = Instant::now();
    let Some(result) = run_program(TOOLS, "python", PYTHON_SUM, Some("2")).await else {
        return;
    };
    assert_eq!(result.output.as_deref(), Some("a: b: "));
    assert_eq!(result.error.as_deref(), Some(INSUFFICIENT_INPUT_MESSAGE));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_python_exhaustion_cannot_be_swallowed() {
    let Some(result) =
        run_program(TOOLS, "python", PYTHON_SWALLOWS_EXCEPTIONS, Some("x\ny")).await
    else {
        return;
    };
    assert_eq!(result.output.as_deref(), Some("got x\ngot y\n"));
    assert_eq!(result.error.as_deref(), Some(INSUFFICIENT_INPUT_MESSAGE));
}

#[tokio::test]
async fn test_python_runtime_error_keeps_traceback() {
    let Some(result) = run_program(TOOLS, "python", PYTHON_RUNTIME_ERROR, None).await else {
        return;
    };
    assert_eq!(result.output.as_deref(), Some("before\n"));
    let error = result.error.unwrap();
    assert!(error.contains("ZeroDivisionError"));
    assert!(error.contains("solution.py"));
    assert!(error.contains("print(1 / 0)"));
    assert!(!error.contains("main.py"));
}

#[tokio::test]
async fn test_python_syntax_error() {
    let Some(result) = run_program(TOOLS, "python", PYTHON_SYNTAX_ERROR, None).await else {
        return;
    };
    assert_eq!(result.output, None);
    assert!(result.error.unwrap().contains("SyntaxError"));
}

#[tokio::test]
async fn test_python_timeout() {
    let started = Instant::now();
    let Some(result) = run_with_short_timeout(TOOLS, "python", PYTHON_INFINITE_LOOP).await else {
        return;
    };
    assert!(result
        .error
        .unwrap()
        .starts_with("Execution timed out (1 seconds)"));
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn test_python_timeout_with_spawned_child() {
    let started = Instant::now();
    let Some(result) = run_with_short_timeout(TOOLS, "python", PYTHON_SPAWNS_CHILD).await else {
        return;
    };
    assert!(result.error.unwrap().starts_with("Execution timed out"));
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn test_python_repeatable() {
    let first = run_program(TOOLS, "python", PYTHON_SUM, Some("1\n2")).await;
    let second = run_program(TOOLS, "python", PYTHON_SUM, Some("1\n2")).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_python_sys_exit_87_is_not_exhausted_input() {
    let Some(result) = run_program(TOOLS, "python", PYTHON_EXITS_87, Some("unused")).await else {
        return;
    };
    assert_eq!(result.output.as_deref(), Some("bye\n"));
    assert_eq!(result.error.as_deref(), Some("Process exited with status 1"));
}
