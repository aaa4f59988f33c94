use super::*;
use crate::tests::fixtures::{
    code_samples::JAVA_HELLO, code_with_input::JAVA_SCANNER, test_scenarios::JAVA_COMPILE_ERROR,
};

const TOOLS: &[&str] = &["javac", "java"];

#[tokio::test]
async fn test_java_basic() {
    test_language_execution(TOOLS, "java", JAVA_HELLO).await
}

#[tokio::test]
async fn test_java_reads_stdin() {
    let Some(result) = run_program(TOOLS, "java", JAVA_SCANNER, Some("6\n7")).await else {
        return;
    };
    assert_eq!(result.output.as_deref(), Some("42\n"));
    assert_eq!(result.error, None);
}

#[tokio::test]
async fn test_java_compile_error() {
    let Some(result) = run_program(TOOLS, "java", JAVA_COMPILE_ERROR, None).await else {
        return;
    };
    assert_eq!(result.output, None);
    assert!(result.error.unwrap().contains("Broken.java"));
}
