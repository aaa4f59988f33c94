use tokio::time::Duration;
use tracing::{debug, info, warn};

use crate::{
    config::ExecutionConfig,
    error::Error,
    input::InputLines,
    languages::{adapter_for, LanguageAdapter},
    normalize,
    runner::{CommandRunner, CommandSpec, ProcessRunner},
    types::{ExecutionRequest, ExecutionResult, ProcessOutput},
    workspace::Workspace,
};

/// Drives one request through adapter, workspace and runner.
///
/// Every failure is turned into an `ExecutionResult`; `execute` itself never
/// fails. The workspace lives on this call's stack and is removed whichever
/// way it returns.
pub struct CodeExecutor<R = ProcessRunner> {
    config: ExecutionConfig,
    runner: R,
}

impl CodeExecutor<ProcessRunner> {
    pub fn new(config: ExecutionConfig) -> Self {
        let runner = ProcessRunner::new(config.max_output_bytes);
        Self { config, runner }
    }
}

impl<R: CommandRunner> CodeExecutor<R> {
    /// Create an executor that spawns through a custom runner
    pub fn with_runner(config: ExecutionConfig, runner: R) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub async fn execute(&self, request: &ExecutionRequest) -> ExecutionResult {
        match self.try_execute(request).await {
            Ok(result) => result,
            Err(e) => {
                warn!("{} execution failed: {}", request.language, e);
                e.into()
            }
        }
    }

    async fn try_execute(&self, request: &ExecutionRequest) -> Result<ExecutionResult, Error> {
        if self.config.is_disabled(request.language) {
            return Err(Error::LanguageDisabled(request.language.to_string()));
        }

        let adapter = adapter_for(request.language, &self.config.toolchain);
        let input = InputLines::parse(request.input.as_deref());
        let program = adapter.prepare(&request.code, &input)?;

        let workspace = Workspace::create(&self.config.workspace_root).await?;
        for file in &program.files {
            workspace.write_file(&file.name, &file.contents).await?;
        }
        info!(
            "Executing {} program in workspace {} ({} input lines)",
            request.language,
            workspace.id(),
            input.len()
        );

        if let Some(compile) = &program.compile {
            let output = self
                .invoke(
                    adapter.as_ref(),
                    compile,
                    &workspace,
                    self.config.compile_timeout(),
                )
                .await?;
            if !output.success() {
                debug!("Compilation failed with {:?}", output.exit_code);
                return Ok(normalize::compile_failure(output));
            }
        }

        let output = self
            .invoke(
                adapter.as_ref(),
                &program.run,
                &workspace,
                self.config.run_timeout(),
            )
            .await?;
        Ok(normalize::run_result(output, program.input_guarded))
    }

    async fn invoke(
        &self,
        adapter: &dyn LanguageAdapter,
        spec: &CommandSpec,
        workspace: &Workspace,
        timeout: Duration,
    ) -> Result<ProcessOutput, Error> {
        self.runner
            .run(spec, workspace.path(), timeout)
            .await
            .map_err(|e| match e {
                Error::ToolchainMissing(_) => {
                    Error::ToolchainMissing(adapter.toolchain_name().to_string())
                }
                other => other,
            })
    }
}
