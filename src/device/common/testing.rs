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

//! Scripted command runner for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use super::command_executor::{CommandOutput, CommandRunner};
use super::error_handling::{DeviceError, DeviceResult};

#[derive(Clone)]
enum Scripted {
    Stdout(String),
    Fail,
    Timeout,
}

/// Answers by program name; anything unscripted is "not found".
#[derive(Default)]
pub struct StubRunner {
    scripts: HashMap<String, Scripted>,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl StubRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stdout(mut self, program: &str, stdout: &str) -> Self {
        self.scripts
            .insert(program.to_string(), Scripted::Stdout(stdout.to_string()));
        self
    }

    pub fn with_failure(mut self, program: &str) -> Self {
        self.scripts.insert(program.to_string(), Scripted::Fail);
        self
    }

    pub fn with_timeout(mut self, program: &str) -> Self {
        self.scripts.insert(program.to_string(), Scripted::Timeout);
        self
    }

    /// Program names in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|c| c.iter().map(|(program, _)| program.clone()).collect())
            .unwrap_or_default()
    }

    /// Argument lists passed to `program`, one entry per call.
    pub fn args_for(&self, program: &str) -> Vec<Vec<String>> {
        self.calls
            .lock()
            .map(|c| {
                c.iter()
                    .filter(|(p, _)| p == program)
                    .map(|(_, args)| args.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn call_count(&self, program: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == program).count()
    }
}

impl CommandRunner for StubRunner {
    fn run(&self, program: &str, args: &[&str], timeout: Duration) -> DeviceResult<CommandOutput> {
        if let Ok(mut calls) = self.calls.lock() {
            let args = args.iter().map(|a| a.to_string()).collect();
            calls.push((program.to_string(), args));
        }
        match self.scripts.get(program) {
            Some(Scripted::Stdout(out)) => Ok(CommandOutput::from_stdout(out.clone())),
            Some(Scripted::Fail) => Err(DeviceError::CommandFailed {
                command: program.to_string(),
                status: "exit status: 1".to_string(),
                stderr: String::new(),
            }),
            Some(Scripted::Timeout) => Err(DeviceError::Timeout {
                command: program.to_string(),
                timeout,
            }),
            None => Err(DeviceError::CommandNotFound(program.to_string())),
        }
    }
}
