use async_trait::async_trait;
use std::{
    collections::VecDeque,
    path::{Path, PathBuf},
    sync::Mutex,
};
use tokio::time::Duration;

use crate::{
    runner::{CommandRunner, CommandSpec},
    Error, ProcessOutput, Result,
};

pub fn output(stdout: &str, stderr: &str, exit_code: Option<i32>) -> ProcessOutput {
    ProcessOutput {
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
        exit_code,
    }
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub spec: CommandSpec,
    pub working_dir: PathBuf,
    /// Files present in the working directory when the command was issued
    pub files: Vec<String>,
}

/// Runner that replays canned results and records every invocation
pub struct RecordingRunner {
    responses: Mutex<VecDeque<Result<ProcessOutput>>>,
    calls: Mutex<Vec<RecordedCall>>,
    panic_on_run: bool,
    delay: Duration,
}

impl RecordingRunner {
    pub fn new(responses: Vec<Result<ProcessOutput>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
            panic_on_run: false,
            delay: Duration::ZERO,
        }
    }

    /// Hold every call for `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn panicking() -> Self {
        Self {
            panic_on_run: true,
            ..Self::new(vec![])
        }
    }

    pub fn recorded(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.recorded().into_iter().map(|call| call.spec).collect()
    }

    pub fn working_dirs(&self) -> Vec<PathBuf> {
        self.recorded()
            .into_iter()
            .map(|call| call.working_dir)
            .collect()
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(
        &self,
        spec: &CommandSpec,
        working_dir: &Path,
        _timeout: Duration,
    ) -> Result<ProcessOutput> {
        if self.panic_on_run {
            panic!("runner exploded");
        }

        let mut files: Vec<String> = std::fs::read_dir(working_dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        files.sort();

        self.calls.lock().unwrap().push(RecordedCall {
            spec: spec.clone(),
            working_dir: working_dir.to_path_buf(),
            files,
        });

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Process(format!("unexpected call: {}", spec.program))))
    }
}

pub mod defaults {
    use crate::ExecutionConfig;
    use std::path::Path;

    pub fn test_config(workspace_root: &Path) -> ExecutionConfig {
        ExecutionConfig::default()
            .with_workspace_root(workspace_root)
            .with_run_timeout(5)
    }

    pub fn short_timeout_config(workspace_root: &Path) -> ExecutionConfig {
        ExecutionConfig::default()
            .with_workspace_root(workspace_root)
            .with_run_timeout(1)
    }
}
