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
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, error, info};

use super::{ProbeContext, ProbeStrategy};
use crate::device::common::constants::ROCM_VERSION_MARKER;
use crate::device::types::{DetectionField, PartialDetection, RuntimeVersion};
use crate::parsing::common::parse_version_parts;

/// Reads `<root>/.info/version` from the ROCm installation directory.
pub struct RocmInstallReader;

impl ProbeStrategy for RocmInstallReader {
    fn name(&self) -> &'static str {
        "rocm-install"
    }

    fn fields(&self) -> &'static [DetectionField] {
        &[DetectionField::RuntimeVersion]
    }

    // Plain file read, meaningful wherever a ROCm tree can be installed.
    fn requires_rocm_platform(&self) -> bool {
        false
    }

    fn probe(&self, ctx: &ProbeContext<'_>) -> PartialDetection {
        match read_version_marker(&ctx.config.rocm_root) {
            Some(version) => PartialDetection::with_runtime_version(version),
            None => PartialDetection::default(),
        }
    }
}

pub fn read_version_marker(root: &Path) -> Option<RuntimeVersion> {
    let marker = root.join(ROCM_VERSION_MARKER);
    let content = match fs::read_to_string(&marker) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No ROCm version file at {}", marker.display());
            return None;
        }
        Err(e) => {
            error!("Error reading ROCm version file {}: {e}", marker.display());
            return None;
        }
    };

    match parse_version_parts(&content).map(RuntimeVersion::from) {
        Some(version) => {
            info!(
                "Found rocm{}.{} via version file: {}",
                version.major,
                version.minor,
                marker.display()
            );
            Some(version)
        }
        None => {
            error!(
                "Malformed ROCm version file {}: {:?}",
                marker.display(),
                content.trim()
            );
            None
        }
    }
}
