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

use tracing::{error, info};

use super::{ProbeContext, ProbeStrategy};
use crate::device::common::constants::ROCMINFO_COMMAND;
use crate::device::common::error_handling::log_probe_error;
use crate::device::types::{DetectionField, PartialDetection};
use crate::parsing::extractors::{
    extract_architectures, extract_driver_version, extract_runtime_version,
};

/// Runs `rocminfo` once and pulls every field out of that single output.
///
/// A non-zero exit discards the output entirely, even if some of it parsed.
pub struct RocminfoReader;

impl ProbeStrategy for RocminfoReader {
    fn name(&self) -> &'static str {
        "rocminfo"
    }

    fn fields(&self) -> &'static [DetectionField] {
        &[
            DetectionField::DriverVersion,
            DetectionField::RuntimeVersion,
            DetectionField::Architectures,
        ]
    }

    fn probe(&self, ctx: &ProbeContext<'_>) -> PartialDetection {
        match ctx
            .runner
            .run(ROCMINFO_COMMAND, &[], ctx.config.rocminfo_timeout)
        {
            Ok(output) => {
                let found = parse_rocminfo_output(&output.stdout);
                if found.is_empty() {
                    error!(
                        "{}: no version or GFX architecture in `{ROCMINFO_COMMAND}` output",
                        self.name()
                    );
                }
                found
            }
            Err(e) => {
                log_probe_error(self.name(), &e);
                PartialDetection::default()
            }
        }
    }
}

pub fn parse_rocminfo_output(output: &str) -> PartialDetection {
    let found = PartialDetection {
        driver_version: extract_driver_version(output),
        runtime_version: extract_runtime_version(output),
        architectures: extract_architectures(output),
    };

    if let Some(v) = &found.runtime_version {
        info!("Found rocm{}.{} via `rocminfo`.", v.major, v.minor);
    }
    if let Some(v) = &found.driver_version {
        info!("Found amdgpu driver {v} via `rocminfo`.");
    }
    if !found.architectures.is_empty() {
        let names: Vec<&str> = found.architectures.iter().map(|a| a.as_str()).collect();
        info!("Found GFX architectures {names:?} via `rocminfo`.");
    }

    found
}
