use super::{
    fixtures::{code_samples::*, code_with_input::*},
    utils::{defaults::test_config, output, RecordingRunner},
};
use crate::{languages::skip_if_not_available, CodeExecutionService, ExecutionResult};
use assert_fs::TempDir;
use std::sync::Arc;

/// What ends up in the workspace for each language
pub mod workspace_layout {
    use super::*;

    async fn files_for(language: &str, code: &str, input: Option<&str>) -> Vec<Vec<String>> {
        let root = TempDir::new().unwrap();
        let runner = RecordingRunner::new(vec![
            Ok(output("", "", Some(0))),
            Ok(output("", "", Some(0))),
        ]);
        let service = CodeExecutionService::with_runner(test_config(root.path()), runner).unwrap();
        service.execute(language, code, input).await;

        service
            .executor()
            .runner()
            .recorded()
            .into_iter()
            .map(|call| call.files)
            .collect()
    }

    #[tokio::test]
    async fn test_python_writes_single_driver() {
        assert_eq!(files_for("python", PYTHON_ECHO, Some("x")).await, vec![vec!["main.py"]]);
    }

    #[tokio::test]
    async fn test_javascript_input_file_only_when_reading_input() {
        assert_eq!(files_for("javascript", JS_HELLO, None).await, vec![vec!["main.js"]]);
        assert_eq!(
            files_for("javascript", JS_PROMPT, Some("Ada")).await,
            vec![vec!["input.txt", "main.js"]]
        );
    }

    #[tokio::test]
    async fn test_java_source_named_after_class() {
        assert_eq!(
            files_for("java", JAVA_SCANNER, None).await,
            vec![vec!["Solver.java"], vec!["Solver.java"]]
        );
    }

    #[tokio::test]
    async fn test_c_compiles_then_runs() {
        let files = files_for("c", C_HELLO, None).await;
        assert_eq!(files.len(), 2);
        assert_eq!(files[0], vec!["main.c"]);
    }
}

/// Tests for concurrent execution
pub mod concurrent_execution {
    use super::*;

    #[tokio::test]
    async fn test_concurrent_mixed_execution() {
        if skip_if_not_available(&["python3", "node"]) {
            return;
        }
        let root = TempDir::new().unwrap();
        let service = Arc::new(CodeExecutionService::new(test_config(root.path())).unwrap());

        let requests = vec![
            ("python", PYTHON_HELLO, None),
            ("javascript", JS_HELLO, None),
            ("python", PYTHON_ECHO, Some("Hello from input")),
            ("javascript", JS_PROMPT, Some("Hello from prompt")),
        ];

        let mut handles = vec![];
        for (language, code, input) in requests {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service.execute(language, code, input).await
            }));
        }

        for handle in handles {
            let result: ExecutionResult = handle.await.unwrap();
            assert!(result.output.unwrap().contains("Hello from"));
            assert_eq!(result.error, None);
        }

        assert_eq!(service.get_available_slots(), 10);
        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
    }
}
