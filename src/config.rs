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

//! Operator configuration.
//!
//! All environment input is read here once. Override values are kept raw so
//! that the reporter can reject malformed ones with a proper error instead of
//! quietly falling back to detection.

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::device::common::constants::{
    AGENT_ENUMERATOR_TIMEOUT, AMDGPU_SYSFS_VERSION_PATH, DEFAULT_GFX_ALLOWLIST, DEFAULT_ROCM_ROOT,
    MODINFO_TIMEOUT, ROCMINFO_TIMEOUT,
};
use crate::device::platform_detection::get_os_type;
use crate::device::types::ArchitectureId;
use crate::parsing::common::split_list;

pub const ENV_FORCE_GFX_ARCH: &str = "AMD_VARIANT_PROVIDER_FORCE_GFX_ARCH";
pub const ENV_FORCE_ROCM_VERSION: &str = "AMD_VARIANT_PROVIDER_FORCE_ROCM_VERSION";
pub const ENV_PREFERRED_GFX_ARCHS: &str = "AMD_PREFERRED_GFX_ARCHS";
pub const ENV_LOG_LEVEL: &str = "AMD_VARIANT_PROVIDER_LOGLEVEL";
pub const ENV_ROCM_PATH: &str = "ROCM_PATH";

pub const DEFAULT_LOG_LEVEL: &str = "INFO";

/// Environment-supplied settings for the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Raw forced gfx list, e.g. `"gfx90a, gfx1100"`.
    pub forced_gfx_archs: Option<String>,
    /// Raw forced ROCm version, must be `major.minor.patch`.
    pub forced_rocm_version: Option<String>,
    /// Raw allow-list override.
    pub preferred_gfx_archs: Option<String>,
    pub log_level: String,
    pub rocm_path: Option<PathBuf>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            forced_gfx_archs: None,
            forced_rocm_version: None,
            preferred_gfx_archs: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            rocm_path: None,
        }
    }
}

impl ProviderConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            forced_gfx_archs: get(ENV_FORCE_GFX_ARCH),
            forced_rocm_version: get(ENV_FORCE_ROCM_VERSION),
            preferred_gfx_archs: get(ENV_PREFERRED_GFX_ARCHS),
            log_level: get(ENV_LOG_LEVEL).unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            rocm_path: get(ENV_ROCM_PATH).map(PathBuf::from),
        }
    }

    /// gfx targets detection may report. The override replaces the built-in list.
    ///
    /// Malformed entries in the override are dropped with a warning. An override
    /// with no usable entry falls back to the built-in list.
    pub fn allowed_architectures(&self) -> Vec<ArchitectureId> {
        if let Some(raw) = &self.preferred_gfx_archs {
            let mut allowed: Vec<ArchitectureId> = Vec::new();
            for token in split_list(raw) {
                match ArchitectureId::parse(&token) {
                    Some(arch) if !allowed.contains(&arch) => allowed.push(arch),
                    Some(_) => {}
                    None => warn!("Ignoring malformed entry '{token}' in {ENV_PREFERRED_GFX_ARCHS}"),
                }
            }
            if !allowed.is_empty() {
                return allowed;
            }
            warn!("{ENV_PREFERRED_GFX_ARCHS} has no usable entries; using the built-in list");
        }
        default_allowed_architectures()
    }

    /// Detector settings derived from this configuration.
    pub fn detector_config(&self) -> DetectorConfig {
        let mut config = DetectorConfig {
            allowed_architectures: self.allowed_architectures(),
            ..DetectorConfig::default()
        };
        if let Some(root) = &self.rocm_path {
            config.rocm_root = root.clone();
        }
        config
    }
}

pub fn default_allowed_architectures() -> Vec<ArchitectureId> {
    DEFAULT_GFX_ALLOWLIST
        .iter()
        .filter_map(|name| ArchitectureId::parse(name))
        .collect()
}

/// Where and how long the probes look.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectorConfig {
    /// Compared against the supported OS before any driver-specific probe runs.
    pub target_os: String,
    pub sysfs_version_path: PathBuf,
    pub rocm_root: PathBuf,
    pub rocminfo_timeout: Duration,
    pub modinfo_timeout: Duration,
    pub agent_enumerator_timeout: Duration,
    pub allowed_architectures: Vec<ArchitectureId>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            target_os: get_os_type().to_string(),
            sysfs_version_path: PathBuf::from(AMDGPU_SYSFS_VERSION_PATH),
            rocm_root: PathBuf::from(DEFAULT_ROCM_ROOT),
            rocminfo_timeout: ROCMINFO_TIMEOUT,
            modinfo_timeout: MODINFO_TIMEOUT,
            agent_enumerator_timeout: AGENT_ENUMERATOR_TIMEOUT,
            allowed_architectures: default_allowed_architectures(),
        }
    }
}

impl DetectorConfig {
    pub fn with_rocm_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.rocm_root = root.into();
        self
    }

    pub fn with_sysfs_version_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.sysfs_version_path = path.into();
        self
    }

    pub fn with_target_os(mut self, os: impl Into<String>) -> Self {
        self.target_os = os.into();
        self
    }

    pub fn with_allowed_architectures(mut self, allowed: Vec<ArchitectureId>) -> Self {
        self.allowed_architectures = allowed;
        self
    }

    pub fn is_allowed(&self, arch: &ArchitectureId) -> bool {
        self.allowed_architectures.contains(arch)
    }
}
