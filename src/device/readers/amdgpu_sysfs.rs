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

use std::fs;

use tracing::{debug, info};

use super::{ProbeContext, ProbeStrategy};
use crate::device::types::{DetectionField, DriverVersion, PartialDetection};
use crate::parsing::common::parse_version_parts;

/// Reads the driver version straight from `/sys/module/amdgpu/version`.
pub struct AmdgpuSysfsReader;

impl ProbeStrategy for AmdgpuSysfsReader {
    fn name(&self) -> &'static str {
        "amdgpu-sysfs"
    }

    fn fields(&self) -> &'static [DetectionField] {
        &[DetectionField::DriverVersion]
    }

    fn probe(&self, ctx: &ProbeContext<'_>) -> PartialDetection {
        let path = &ctx.config.sysfs_version_path;

        // Missing module or unreadable file: fall through to the next reader.
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                debug!("{}: cannot read {}: {e}", self.name(), path.display());
                return PartialDetection::default();
            }
        };

        match parse_version_parts(&content).map(DriverVersion::from) {
            Some(version) => {
                info!("Found amdgpu driver {version} via {}.", path.display());
                PartialDetection::with_driver_version(version)
            }
            None => {
                debug!(
                    "{}: unrecognized version text {:?} in {}",
                    self.name(),
                    content.trim(),
                    path.display()
                );
                PartialDetection::default()
            }
        }
    }
}
