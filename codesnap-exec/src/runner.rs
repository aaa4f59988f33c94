use async_trait::async_trait;
use nix::{
    errno::Errno,
    sys::signal::{killpg, Signal},
    unistd::Pid,
};
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    process::Stdio,
    sync::Arc,
};
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWriteExt},
    process::Command,
    sync::Mutex,
    task::JoinHandle,
    time::{self, Duration, Instant},
};
use tracing::{debug, warn};

use crate::{error::Error, types::ProcessOutput};

const TRUNCATION_NOTICE: &str = "\n... output truncated";

/// Time allowed for the pipes to drain when the child exits right at its deadline
const DRAIN_GRACE: Duration = Duration::from_millis(100);

/// A program invocation: no shell is involved, arguments are passed as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program name looked up on `PATH`, an absolute path, or `./name`
    /// relative to the working directory
    pub program: String,
    pub args: Vec<String>,
    /// Bytes written to the child's stdin; stdin is `/dev/null` when absent
    pub stdin: Option<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdin: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }
}

/// Runs one command to completion inside a working directory
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Returns `Error::Timeout` when the budget elapses and
    /// `Error::ToolchainMissing` when the program cannot be found.
    async fn run(
        &self,
        spec: &CommandSpec,
        working_dir: &Path,
        timeout: Duration,
    ) -> Result<ProcessOutput, Error>;
}

/// Child-process runner with a hard wall-clock timeout.
///
/// Each child is started as the leader of its own process group. When the
/// run finishes, successfully or not, the whole group is SIGKILLed and the
/// child reaped, so nothing it forked keeps running after `run` returns.
/// The deadline also bounds reading the output: a descendant that escaped
/// the group with `setsid` and still holds the pipes open cannot stall the
/// run, and whatever was read by then is returned.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    max_output_bytes: usize,
}

impl ProcessRunner {
    pub fn new(max_output_bytes: usize) -> Self {
        Self { max_output_bytes }
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(1024 * 1024)
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(
        &self,
        spec: &CommandSpec,
        working_dir: &Path,
        timeout: Duration,
    ) -> Result<ProcessOutput, Error> {
        let program = resolve_program(&spec.program, working_dir)?;

        debug!("Runner - Command: {}", program.display());
        debug!("Runner - Args: {:?}", spec.args);
        debug!("Runner - Working dir: {}", working_dir.display());

        let mut command = Command::new(&program);
        command
            .args(&spec.args)
            .current_dir(working_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(if spec.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .process_group(0)
            .kill_on_drop(true);

        let start = Instant::now();
        let deadline = start + timeout;
        let mut child = command.spawn().map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::ToolchainMissing(spec.program.clone()),
            _ => Error::Process(format!("Failed to spawn {}: {}", spec.program, e)),
        })?;
        let child_id = child.id();

        if let (Some(input), Some(mut stdin)) = (spec.stdin.clone(), child.stdin.take()) {
            tokio::spawn(async move {
                // Programs that never read their input close the pipe early
                if let Err(e) = stdin.write_all(input.as_bytes()).await {
                    debug!("Runner - stdin closed early: {}", e);
                }
            });
        }

        let limit = self.max_output_bytes;
        let stdout = Capture::shared();
        let stderr = Capture::shared();
        let mut stdout_task =
            tokio::spawn(read_capped(child.stdout.take(), limit, stdout.clone()));
        let mut stderr_task =
            tokio::spawn(read_capped(child.stderr.take(), limit, stderr.clone()));

        let waited = time::timeout_at(deadline, child.wait()).await;
        kill_process_group(child_id);

        match waited {
            Ok(Ok(status)) => {
                let drain_deadline = deadline.max(Instant::now() + DRAIN_GRACE);
                if !drain(&mut stdout_task, &mut stderr_task, drain_deadline).await {
                    warn!(
                        "Runner - output of {} still open at deadline, a detached process holds it",
                        spec.program
                    );
                }
                let stdout = stdout.lock().await.text();
                let stderr = stderr.lock().await.text();
                debug!(
                    "Runner - {} exited with {} after {:?}",
                    spec.program,
                    status,
                    start.elapsed()
                );
                Ok(ProcessOutput {
                    stdout,
                    stderr,
                    exit_code: status.code(),
                })
            }
            Ok(Err(e)) => {
                let _ = child.kill().await;
                stdout_task.abort();
                stderr_task.abort();
                Err(Error::Process(format!("Failed to wait for {}: {}", spec.program, e)))
            }
            Err(_) => {
                warn!(
                    "Runner - {} exceeded {}s budget, killed",
                    spec.program,
                    timeout.as_secs()
                );
                // Already SIGKILLed through its group; this reaps it
                let _ = child.kill().await;
                stdout_task.abort();
                stderr_task.abort();
                Err(Error::Timeout(timeout.as_secs()))
            }
        }
    }
}

fn resolve_program(program: &str, working_dir: &Path) -> Result<PathBuf, Error> {
    if let Some(local) = program.strip_prefix("./") {
        return Ok(working_dir.join(local));
    }
    if program.contains('/') {
        return Ok(PathBuf::from(program));
    }
    which::which(program).map_err(|_| Error::ToolchainMissing(program.to_string()))
}

fn kill_process_group(leader: Option<u32>) {
    let Some(pid) = leader else {
        return;
    };
    match killpg(Pid::from_raw(pid as i32), Signal::SIGKILL) {
        Ok(()) | Err(Errno::ESRCH) => {}
        Err(e) => warn!("Failed to kill process group {}: {}", pid, e),
    }
}

/// Output captured from one stream so far
#[derive(Debug, Default)]
struct Capture {
    bytes: Vec<u8>,
    truncated: bool,
}

type SharedCapture = Arc<Mutex<Capture>>;

impl Capture {
    fn shared() -> SharedCapture {
        Arc::new(Mutex::new(Capture::default()))
    }

    fn text(&self) -> String {
        let mut text = String::from_utf8_lossy(&self.bytes).into_owned();
        if self.truncated {
            text.push_str(TRUNCATION_NOTICE);
        }
        text
    }
}

/// Wait for both readers until `deadline`; on expiry they are aborted and
/// `false` is returned. Captured bytes stay in their buffers either way.
async fn drain(
    stdout_task: &mut JoinHandle<()>,
    stderr_task: &mut JoinHandle<()>,
    deadline: Instant,
) -> bool {
    let both = async {
        let _ = (&mut *stdout_task).await;
        let _ = (&mut *stderr_task).await;
    };
    if time::timeout_at(deadline, both).await.is_ok() {
        return true;
    }
    stdout_task.abort();
    stderr_task.abort();
    false
}

/// Read a stream to the end into `capture`, keeping at most `limit` bytes.
///
/// The remainder is drained so a chatty child never blocks on a full pipe.
async fn read_capped<R: AsyncRead + Unpin>(
    stream: Option<R>,
    limit: usize,
    capture: SharedCapture,
) {
    let Some(mut stream) = stream else {
        return;
    };

    let mut chunk = [0u8; 8192];
    loop {
        let n = match stream.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) => {
                debug!("Runner - output stream read failed: {}", e);
                break;
            }
        };

        let mut captured = capture.lock().await;
        let keep = n.min(limit.saturating_sub(captured.bytes.len()));
        captured.bytes.extend_from_slice(&chunk[..keep]);
        if keep < n {
            captured.truncated = true;
        }
    }
}
