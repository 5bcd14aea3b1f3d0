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

use std::time::Duration;

use thiserror::Error;

/// Errors raised while talking to ROCm tools or reading driver files.
///
/// These never leave a probe: each probe logs them and reports "no data".
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("command '{0}' not found")]
    CommandNotFound(String),

    #[error("command '{command}' exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("command '{command}' timed out after {timeout:?}")]
    Timeout { command: String, timeout: Duration },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DeviceError {
    /// Tool absence is routine on hosts without ROCm and is logged quietly.
    pub fn is_not_found(&self) -> bool {
        match self {
            DeviceError::CommandNotFound(_) => true,
            DeviceError::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

pub type DeviceResult<T> = Result<T, DeviceError>;

/// Log a probe failure at the level the error class deserves.
pub fn log_probe_error(probe: &str, error: &DeviceError) {
    if error.is_not_found() {
        tracing::debug!("{probe}: {error}");
    } else {
        tracing::error!("{probe}: {error}");
    }
}
