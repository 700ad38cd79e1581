/// Subprocess Runner - Executes the Judge CLI
///
/// **Core Responsibility:**
/// Run one [`CommandInvocation`] and hand back its stdout.
///
/// **Boundary:**
/// - Runner knows HOW to spawn (platform shell, pipes, progress)
/// - Runner does NOT know where the payload came from
/// - Runner does NOT present results
///
/// The command line goes through the platform shell because the encoded
/// arguments carry shell-level double quotes. There is no timeout: the
/// judge CLI owns execution time.

use crate::channel::OutputChannel;
use lctest_common::types::CommandInvocation;
use std::io::{self, IsTerminal, Write};
use std::process::Stdio;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::process::Command;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
const SPINNER_TICK: Duration = Duration::from_millis(80);

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

#[derive(Debug, Error)]
pub enum RunError {
    /// The shell or judge CLI could not be started
    #[error("Failed to execute `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The judge CLI ran and reported failure
    #[error("`{command}` failed with {}", exit_description(.code))]
    NonZeroExit {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run the invocation to completion; Ok carries captured stdout
    async fn run(
        &self,
        invocation: &CommandInvocation,
        channel: &mut OutputChannel,
    ) -> Result<String, RunError>;
}

/// Indeterminate progress indicator on stderr
struct Progress {
    stop: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Progress {
    fn start(caption: &str) -> Self {
        if !io::stderr().is_terminal() {
            eprintln!("⏳ {}", caption);
            return Self {
                stop: None,
                handle: None,
            };
        }

        let (stop, mut stopped) = oneshot::channel::<()>();
        let caption = caption.to_string();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(SPINNER_TICK);
            let mut frame = 0usize;
            loop {
                tokio::select! {
                    _ = &mut stopped => break,
                    _ = ticker.tick() => {
                        eprint!("\r{} {}", SPINNER_FRAMES[frame % SPINNER_FRAMES.len()], caption);
                        let _ = io::stderr().flush();
                        frame += 1;
                    }
                }
            }
            // Clear the spinner line
            eprint!("\r\x1b[2K");
            let _ = io::stderr().flush();
        });

        Self {
            stop: Some(stop),
            handle: Some(handle),
        }
    }

    async fn finish(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

/// Build a platform-shell command for a full command line
fn shell_command(command_line: &str) -> Command {
    #[cfg(windows)]
    {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").raw_arg(command_line);
        cmd
    }
    #[cfg(not(windows))]
    {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command_line);
        cmd
    }
}

/// Production runner: platform shell plus a progress indicator
#[derive(Debug, Clone)]
pub struct ShellRunner {
    caption: String,
}

impl ShellRunner {
    pub fn new(caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
        }
    }
}

impl CommandRunner for ShellRunner {
    async fn run(
        &self,
        invocation: &CommandInvocation,
        channel: &mut OutputChannel,
    ) -> Result<String, RunError> {
        let command_line = invocation.command_line();
        channel.append_line(&format!(
            "invocation {} created {}",
            invocation.id(),
            invocation.created_at().to_rfc3339()
        ));
        channel.append_line(&format!("$ {}", command_line));

        info!(
            invocation_id = %invocation.id(),
            program = %invocation.program(),
            args = ?invocation.args(),
            "Executing judge CLI"
        );

        let progress = Progress::start(&self.caption);
        let start = Instant::now();

        let output = shell_command(&command_line)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await;

        progress.finish().await;

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                channel.append_line(&format!("Failed to execute: {}", e));
                warn!(invocation_id = %invocation.id(), error = %e, "Spawn failed");
                return Err(RunError::Spawn {
                    command: command_line,
                    source: e,
                });
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        channel.append_output("stdout", &stdout);
        channel.append_output("stderr", &stderr);

        debug!(
            invocation_id = %invocation.id(),
            exit_code = ?output.status.code(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            stdout_bytes = stdout.len(),
            stderr_bytes = stderr.len(),
            "Judge CLI exited"
        );

        if !output.status.success() {
            let code = output.status.code();
            channel.append_line(&format!("Command failed with {}", exit_description(&code)));
            return Err(RunError::NonZeroExit {
                command: command_line,
                code,
                stderr,
            });
        }

        Ok(stdout)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use lctest_common::encoder::build_invocation;
    use lctest_common::types::TestPayload;
    use std::path::Path;

    fn channel_in(dir: &tempfile::TempDir) -> OutputChannel {
        OutputChannel::open(&dir.path().join("output.log")).unwrap()
    }

    #[tokio::test]
    async fn test_success_returns_stdout_and_logs() {
        let dir = tempfile::tempdir().unwrap();
        let mut channel = channel_in(&dir);

        // printf leaves backslash escapes in its arguments alone
        let invocation = build_invocation(
            "printf",
            "'%s|'",
            Path::new("/a/b.py"),
            Some(TestPayload::from_file("He said \"hi\"\r\ndone")),
        );
        let output = ShellRunner::new("Submitting to LeetCode...")
            .run(&invocation, &mut channel)
            .await
            .unwrap();

        assert_eq!(output, "test|/a/b.py|-t|He said hi\\ndone|");

        let log = channel.read_all().unwrap();
        assert!(log.contains(&format!("invocation {} created", invocation.id())));
        assert!(log.contains("$ printf '%s|' test \"/a/b.py\" -t \"He said hi\\ndone\""));
        assert!(log.contains("stdout: test|/a/b.py|-t|He said hi\\ndone|"));
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut channel = channel_in(&dir);

        let invocation = build_invocation("sh", "-c 'echo compile error >&2; exit 3'", Path::new("x"), None);
        let err = ShellRunner::new("caption")
            .run(&invocation, &mut channel)
            .await
            .unwrap_err();

        match err {
            RunError::NonZeroExit { code, stderr, .. } => {
                assert_eq!(code, Some(3));
                assert!(stderr.contains("compile error"));
            }
            other => panic!("unexpected error: {other}"),
        }

        let log = channel.read_all().unwrap();
        assert!(log.contains("stderr: compile error"));
        assert!(log.contains("exit code 3"));
    }

    #[tokio::test]
    async fn test_missing_runtime_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut channel = channel_in(&dir);

        let invocation = build_invocation(
            "lctest-definitely-not-a-runtime",
            "cli",
            Path::new("/a/b.py"),
            None,
        );
        let result = ShellRunner::new("caption").run(&invocation, &mut channel).await;

        // sh starts fine and reports 127 for an unknown command
        assert!(matches!(result, Err(RunError::NonZeroExit { code: Some(127), .. })));
    }

    #[test]
    fn test_error_messages() {
        let err = RunError::NonZeroExit {
            command: "node cli test \"a\"".to_string(),
            code: Some(1),
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "`node cli test \"a\"` failed with exit code 1");

        let err = RunError::NonZeroExit {
            command: "x".to_string(),
            code: None,
            stderr: String::new(),
        };
        assert!(err.to_string().contains("terminated by signal"));
    }
}
