// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Bounded execution of external diagnostic tools.

use std::io::Read;
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use super::error_handling::{DeviceError, DeviceResult};

/// How often a running child is polled for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Captured output of a command that exited successfully.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn from_stdout(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }
}

/// Seam between probes and the operating system.
///
/// Probes only ever see a `CommandOutput` for a zero exit status. Missing
/// binaries, non-zero exits and timeouts all arrive as `DeviceError`.
pub trait CommandRunner: Send + Sync {
    fn run(&self, program: &str, args: &[&str], timeout: Duration) -> DeviceResult<CommandOutput>;
}

/// Runs real processes via [`execute_command_with_timeout`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[&str], timeout: Duration) -> DeviceResult<CommandOutput> {
        execute_command_with_timeout(program, args, timeout)
    }
}

fn display_command(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{program} {}", args.join(" "))
    }
}

fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>) -> Receiver<Vec<u8>> {
    let (tx, rx) = mpsc::channel();
    match pipe {
        Some(mut pipe) => {
            thread::spawn(move || {
                let mut buf = Vec::new();
                // A read error leaves whatever was captured so far.
                let _ = pipe.read_to_end(&mut buf);
                let _ = tx.send(buf);
            });
        }
        None => {
            let _ = tx.send(Vec::new());
        }
    }
    rx
}

/// Collect a pipe's contents, or `None` if it is still open at `deadline`.
///
/// A pipe stays open while any descendant of the tool holds it, even after
/// the tool itself has exited. The reader thread is left behind in that case.
fn drain_reader(rx: &Receiver<Vec<u8>>, deadline: Instant) -> Option<String> {
    rx.recv_timeout(deadline.saturating_duration_since(Instant::now()))
        .ok()
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
}

/// Run `program` with `args`, killing it if it has not exited within `timeout`.
///
/// stdout and stderr are drained on background threads so a chatty tool cannot
/// fill its pipe and stall before the deadline. The deadline covers both the
/// exit and the draining of its output.
pub fn execute_command_with_timeout(
    program: &str,
    args: &[&str],
    timeout: Duration,
) -> DeviceResult<CommandOutput> {
    let command = display_command(program, args);

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DeviceError::CommandNotFound(program.to_string())
            } else {
                DeviceError::Io(e)
            }
        })?;

    let stdout_reader = spawn_reader(child.stdout.take());
    let stderr_reader = spawn_reader(child.stderr.take());

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait()? {
            Some(status) => break status,
            None if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(DeviceError::Timeout { command, timeout });
            }
            None => thread::sleep(POLL_INTERVAL),
        }
    };

    let (Some(stdout), Some(stderr)) = (
        drain_reader(&stdout_reader, deadline),
        drain_reader(&stderr_reader, deadline),
    ) else {
        return Err(DeviceError::Timeout { command, timeout });
    };

    if !status.success() {
        return Err(DeviceError::CommandFailed {
            command,
            status: status.to_string(),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(CommandOutput { stdout, stderr })
}
