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

// Common utilities for device modules: command execution, error handling and ROCm constants.

pub mod command_executor;
pub mod constants;
pub mod error_handling;
#[cfg(test)]
pub mod testing;

/* Re-exports for convenience (keep minimal to avoid unused-imports clippy errors) */
pub use command_executor::{CommandOutput, CommandRunner, SystemCommandRunner};
pub use error_handling::{DeviceError, DeviceResult};
