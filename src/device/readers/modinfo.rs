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
use crate::device::common::constants::{AMDGPU_MODULE, MODINFO_COMMAND};
use crate::device::common::error_handling::log_probe_error;
use crate::device::types::{DetectionField, PartialDetection};
use crate::parsing::extractors::extract_driver_version;

/// `modinfo amdgpu`, for hosts where the module version is not exposed in sysfs.
pub struct ModinfoReader;

impl ProbeStrategy for ModinfoReader {
    fn name(&self) -> &'static str {
        "modinfo"
    }

    fn fields(&self) -> &'static [DetectionField] {
        &[DetectionField::DriverVersion]
    }

    fn probe(&self, ctx: &ProbeContext<'_>) -> PartialDetection {
        let output = match ctx.runner.run(
            MODINFO_COMMAND,
            &[AMDGPU_MODULE],
            ctx.config.modinfo_timeout,
        ) {
            Ok(output) => output,
            Err(e) => {
                log_probe_error(self.name(), &e);
                return PartialDetection::default();
            }
        };

        match extract_driver_version(&output.stdout) {
            Some(version) => {
                info!("Found amdgpu driver {version} via `modinfo`.");
                PartialDetection::with_driver_version(version)
            }
            None => {
                error!("{}: no version field in `modinfo {AMDGPU_MODULE}` output", self.name());
                PartialDetection::default()
            }
        }
    }
}
