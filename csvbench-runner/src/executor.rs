//! Benchmark Execution
//!
//! Runs one external parser executable against one corpus file as an
//! isolated child process, enforcing a timeout, and classifies the
//! outcome. The executable contract: it receives the corpus path as its
//! sole argument, exits 0 on success, and prints a numeric value to
//! stdout.
//!
//! Failures are values, never errors: a crash, hang or garbage output
//! from one executable must not affect concurrent or subsequent
//! executions of others. No retries happen here — iteration policy
//! belongs to the sweep.

use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Interval between child exit polls.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Grace window between SIGTERM and SIGKILL on timeout.
const TERM_GRACE: Duration = Duration::from_millis(500);

/// Captured stderr is truncated to this many bytes in failure records.
const STDERR_PREVIEW_LIMIT: usize = 500;

/// One benchmark invocation outcome. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum RunResult {
    /// The executable exited 0 with parseable numeric stdout.
    Success(RunSuccess),
    /// The invocation failed; the kind says how.
    Failure(RunFailure),
}

impl RunResult {
    /// Whether the invocation succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, RunResult::Success(_))
    }

    /// The success payload, if any.
    pub fn success(&self) -> Option<&RunSuccess> {
        match self {
            RunResult::Success(s) => Some(s),
            RunResult::Failure(_) => None,
        }
    }

    /// The failure payload, if any.
    pub fn failure(&self) -> Option<&RunFailure> {
        match self {
            RunResult::Success(_) => None,
            RunResult::Failure(f) => Some(f),
        }
    }
}

/// Metrics from one successful invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSuccess {
    /// Wall-clock execution time in seconds.
    pub duration_secs: f64,
    /// Corpus size divided by wall time, MB/s. The ranked number.
    pub throughput_mb_s: f64,
    /// The numeric value the executable printed, kept for diagnostics.
    pub reported_value: f64,
    /// Corpus size in MB.
    pub file_size_mb: f64,
}

/// Typed failure of one invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunFailure {
    /// The invocation exceeded its deadline and the child was terminated.
    /// `duration_secs` is at least the timeout.
    Timeout {
        /// Configured timeout in seconds.
        timeout_secs: f64,
        /// Elapsed wall time when the child was reaped.
        duration_secs: f64,
    },
    /// The executable exited with a non-zero status.
    NonZeroExit {
        /// The exit code, or -1 if the child was killed by a signal.
        exit_code: i32,
        /// Truncated stderr capture.
        stderr: String,
    },
    /// The executable exited 0 but printed nothing numeric.
    MalformedOutput {
        /// Truncated stdout capture.
        stdout: String,
    },
    /// The process could not be launched at all.
    Launch {
        /// The spawn error.
        message: String,
    },
}

impl RunFailure {
    /// Short machine-readable kind name.
    pub fn kind(&self) -> &'static str {
        match self {
            RunFailure::Timeout { .. } => "timeout",
            RunFailure::NonZeroExit { .. } => "non_zero_exit",
            RunFailure::MalformedOutput { .. } => "malformed_output",
            RunFailure::Launch { .. } => "launch",
        }
    }
}

/// Executes single benchmark invocations under a timeout.
#[derive(Debug, Clone)]
pub struct BenchmarkExecutor {
    timeout: Duration,
}

impl BenchmarkExecutor {
    /// Create an executor with the given per-invocation timeout.
    pub fn new(timeout: Duration) -> Self {
        BenchmarkExecutor { timeout }
    }

    /// Run `executable` once against the corpus at `corpus_path`.
    ///
    /// `corpus_size_bytes` is the corpus file size, used to compute
    /// throughput from the measured wall time.
    pub fn run_once(
        &self,
        executable: &Path,
        corpus_path: &Path,
        corpus_size_bytes: u64,
    ) -> RunResult {
        let file_size_mb = corpus_size_bytes as f64 / (1024.0 * 1024.0);
        let started = Instant::now();

        let mut child = match Command::new(executable)
            .arg(corpus_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                return RunResult::Failure(RunFailure::Launch {
                    message: e.to_string(),
                });
            }
        };

        // Drain both pipes on reader threads so a chatty child can never
        // deadlock against a full pipe buffer.
        let stdout = drain_pipe(child.stdout.take());
        let stderr = drain_pipe(child.stderr.take());

        let deadline = started + self.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if Instant::now() >= deadline {
                        return self.timeout_result(child, started, stdout, stderr);
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    join_output(stdout);
                    join_output(stderr);
                    return RunResult::Failure(RunFailure::Launch {
                        message: format!("failed to wait for child: {e}"),
                    });
                }
            }
        };

        let duration = started.elapsed();
        let stdout = join_output(stdout);
        let stderr = join_output(stderr);

        if !status.success() {
            return RunResult::Failure(RunFailure::NonZeroExit {
                exit_code: status.code().unwrap_or(-1),
                stderr: truncate(&stderr, STDERR_PREVIEW_LIMIT),
            });
        }

        match parse_reported_value(&stdout) {
            Some(reported_value) => {
                let duration_secs = duration.as_secs_f64();
                let throughput_mb_s = if duration_secs > 0.0 {
                    file_size_mb / duration_secs
                } else {
                    0.0
                };
                RunResult::Success(RunSuccess {
                    duration_secs,
                    throughput_mb_s,
                    reported_value,
                    file_size_mb,
                })
            }
            None => RunResult::Failure(RunFailure::MalformedOutput {
                stdout: truncate(&stdout, STDERR_PREVIEW_LIMIT),
            }),
        }
    }

    /// Terminate a child that blew its deadline: SIGTERM, a short grace
    /// window, then SIGKILL, and reap it synchronously so no zombie
    /// accumulates across a long sweep.
    fn timeout_result(
        &self,
        mut child: Child,
        started: Instant,
        stdout: JoinHandle<String>,
        stderr: JoinHandle<String>,
    ) -> RunResult {
        let _ = send_sigterm(child.id());

        let grace_deadline = Instant::now() + TERM_GRACE;
        loop {
            match child.try_wait() {
                Ok(Some(_)) => break,
                Ok(None) if Instant::now() < grace_deadline => thread::sleep(POLL_INTERVAL),
                _ => {
                    let _ = child.kill();
                    let _ = child.wait();
                    break;
                }
            }
        }

        // The pipes closed when the child died; the drain threads finish.
        join_output(stdout);
        join_output(stderr);

        RunResult::Failure(RunFailure::Timeout {
            timeout_secs: self.timeout.as_secs_f64(),
            duration_secs: started.elapsed().as_secs_f64(),
        })
    }
}

/// Read a pipe to EOF on a dedicated thread.
fn drain_pipe<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn join_output(handle: JoinHandle<String>) -> String {
    handle.join().unwrap_or_default()
}

/// The last line of stdout that parses as a number, ignoring any other
/// output the executable printed on success.
fn parse_reported_value(stdout: &str) -> Option<f64> {
    stdout
        .lines()
        .rev()
        .filter_map(|line| line.trim().parse::<f64>().ok())
        .next()
}

fn truncate(s: &str, limit: usize) -> String {
    if s.len() <= limit {
        s.to_string()
    } else {
        let mut end = limit;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        s[..end].to_string()
    }
}

/// Send SIGTERM to a process. Returns `Err` if the signal could not be
/// delivered.
fn send_sigterm(pid: u32) -> Result<(), std::io::Error> {
    let ret = unsafe { libc::kill(pid as libc::pid_t, libc::SIGTERM) };
    if ret == -1 {
        Err(std::io::Error::last_os_error())
    } else {
        Ok(())
    }
}
