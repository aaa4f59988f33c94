use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};

use crate::{
    config::ExecutionConfig,
    error::Error,
    executor::CodeExecutor,
    languages::adapter_for,
    runner::{CommandRunner, ProcessRunner},
    types::{ExecutionRequest, ExecutionResult, Language},
};

/// Entry point used by the HTTP layer.
///
/// Parses the language, bounds the number of simultaneous executions and
/// runs each request on its own task so that even a panic inside the engine
/// comes back as an `ExecutionResult`.
pub struct CodeExecutionService<R = ProcessRunner> {
    executor: Arc<CodeExecutor<R>>,
    semaphore: Arc<Semaphore>,
}

impl<R> Clone for CodeExecutionService<R> {
    fn clone(&self) -> Self {
        Self {
            executor: self.executor.clone(),
            semaphore: self.semaphore.clone(),
        }
    }
}

impl CodeExecutionService<ProcessRunner> {
    pub fn new(config: ExecutionConfig) -> Result<Self, Error> {
        config.validate()?;
        let permits = config.max_concurrent_executions;
        Ok(Self::from_executor(CodeExecutor::new(config), permits))
    }
}

impl<R: CommandRunner + 'static> CodeExecutionService<R> {
    pub fn with_runner(config: ExecutionConfig, runner: R) -> Result<Self, Error> {
        config.validate()?;
        let permits = config.max_concurrent_executions;
        Ok(Self::from_executor(
            CodeExecutor::with_runner(config, runner),
            permits,
        ))
    }

    fn from_executor(executor: CodeExecutor<R>, permits: usize) -> Self {
        Self {
            executor: Arc::new(executor),
            semaphore: Arc::new(Semaphore::new(permits)),
        }
    }

    pub fn executor(&self) -> &CodeExecutor<R> {
        &self.executor
    }

    /// Execute `code` written in `language` (`python`, `javascript`, `java`
    /// or `c`). Unknown languages are answered without touching the disk.
    pub async fn execute(&self, language: &str, code: &str, input: Option<&str>) -> ExecutionResult {
        let language: Language = match language.parse() {
            Ok(language) => language,
            Err(e) => {
                debug!("Rejected request: {}", e);
                return e.into();
            }
        };

        self.execute_request(ExecutionRequest {
            language,
            code: code.to_string(),
            input: input.map(str::to_string),
        })
        .await
    }

    pub async fn execute_request(&self, request: ExecutionRequest) -> ExecutionResult {
        // Acquire execution permit; it travels with the task so a caller
        // that goes away does not free the slot while the program still runs
        let permit = match self.semaphore.clone().acquire_owned().await {
            Ok(permit) => permit,
            Err(e) => {
                return ExecutionResult::from_error(format!("Execution failed: {}", e));
            }
        };

        debug!("Starting code execution for language: {}", request.language);

        let executor = self.executor.clone();
        let language = request.language;
        let handle = tokio::spawn(async move {
            let _permit = permit;
            executor.execute(&request).await
        });

        match handle.await {
            Ok(result) => {
                if result.is_success() {
                    info!("{} execution completed successfully", language);
                } else {
                    info!("{} execution completed with an error", language);
                }
                result
            }
            Err(e) => {
                error!("{} execution task failed: {}", language, e);
                ExecutionResult::from_error(format!("Execution failed: {}", e))
            }
        }
    }

    pub fn get_available_slots(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Languages that are enabled and whose toolchain is on `PATH`.
    /// Missing toolchains are logged, not fatal.
    pub fn available_languages(&self) -> Vec<Language> {
        let config = self.executor.config();
        Language::ALL
            .into_iter()
            .filter(|language| !config.is_disabled(*language))
            .filter(|language| match adapter_for(*language, &config.toolchain).check_tools() {
                Ok(()) => true,
                Err(e) => {
                    warn!("{}", e);
                    false
                }
            })
            .collect()
    }
}
