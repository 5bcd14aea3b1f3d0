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

//! The `amd` variant provider: detection results and operator overrides
//! turned into prioritized wheel-variant features.

use tracing::{info, warn};

use super::types::{
    FeatureKey, ProviderError, ProviderResult, VariantFeatureConfig, VariantPropertyType,
};
use crate::config::{ProviderConfig, ENV_FORCE_GFX_ARCH, ENV_FORCE_ROCM_VERSION};
use crate::device::common::constants::KNOWN_ROCM_VERSIONS;
use crate::device::types::{ArchitectureId, DetectionResult, RuntimeVersion};
use crate::device::RocmDetector;
use crate::parsing::common::{is_gfx_token, is_short_version, parse_strict_triplet, split_list};

pub struct AmdVariantPlugin {
    config: ProviderConfig,
    detector: RocmDetector,
}

impl AmdVariantPlugin {
    pub const NAMESPACE: &'static str = "amd";
    pub const IS_BUILD_PLUGIN: bool = false;
    /// Static plugin API: the same host always yields the same features.
    pub const DYNAMIC: bool = false;

    pub fn new(config: ProviderConfig) -> Self {
        let detector = RocmDetector::new(config.detector_config());
        Self { config, detector }
    }

    pub fn from_env() -> Self {
        Self::new(ProviderConfig::from_env())
    }

    pub fn with_detector(config: ProviderConfig, detector: RocmDetector) -> Self {
        Self { config, detector }
    }

    pub fn namespace(&self) -> &'static str {
        Self::NAMESPACE
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Cached host detection, probing on first use.
    pub fn system_info(&self) -> &DetectionResult {
        self.detector.detect()
    }

    /// Features supported on this host, most specific first.
    ///
    /// Overrides are validated before anything is probed, and a malformed one
    /// is an error rather than a silent fallback to detection.
    pub fn get_supported_configs(&self) -> ProviderResult<Vec<VariantFeatureConfig>> {
        info!("[{}-variant-provider] Running system detection.", self.namespace());

        let forced_archs = self
            .config
            .forced_gfx_archs
            .as_deref()
            .map(parse_forced_archs)
            .transpose()?;
        let forced_version = self
            .config
            .forced_rocm_version
            .as_deref()
            .map(parse_forced_rocm_version)
            .transpose()?;

        let mut configs = Vec::new();

        // TODO: order discrete GPUs ahead of APUs once the index defines a preference.
        let gfx_archs = match forced_archs {
            Some(archs) => archs,
            None => self.system_info().architecture_names(),
        };
        if !gfx_archs.is_empty() {
            configs.push(VariantFeatureConfig::new(FeatureKey::GfxArch, gfx_archs));
        }

        let rocm_version = forced_version.or_else(|| self.system_info().runtime_version);
        if let Some(version) = rocm_version {
            configs.push(VariantFeatureConfig::new(
                FeatureKey::RocmVersion,
                vec![version.short()],
            ));
        }

        if configs.is_empty() {
            warn!("[{}-variant-provider] No AMD features detected.", self.namespace());
        } else {
            info!(
                "[{}-variant-provider] Detected features: {configs:?}",
                self.namespace()
            );
        }

        Ok(configs)
    }

    /// Every value this provider could ever report.
    pub fn get_all_configs(&self) -> Vec<VariantFeatureConfig> {
        let archs = self
            .config
            .allowed_architectures()
            .iter()
            .map(|arch| arch.to_string())
            .collect();
        vec![
            VariantFeatureConfig::new(
                FeatureKey::RocmVersion,
                KNOWN_ROCM_VERSIONS.iter().map(|v| v.to_string()).collect(),
            ),
            VariantFeatureConfig::new(FeatureKey::GfxArch, archs),
        ]
    }

    /// Whether a property from a package tool is well-formed for this provider.
    /// Presence on the current host is not checked.
    pub fn validate_property(&self, property: &dyn VariantPropertyType) -> bool {
        if property.namespace() != self.namespace() {
            return false;
        }
        FeatureKey::from_name(property.feature())
            .is_some_and(|key| Self::validate_value(key, property.value()))
    }

    pub fn validate_value(key: FeatureKey, value: &str) -> bool {
        match key {
            FeatureKey::GfxArch => is_gfx_token(value),
            FeatureKey::RocmVersion => is_short_version(value),
        }
    }
}

/// Normalized forced list: lowercase, input order, duplicates removed.
fn parse_forced_archs(raw: &str) -> ProviderResult<Vec<String>> {
    let mut archs: Vec<String> = Vec::new();
    for token in split_list(raw) {
        let arch = ArchitectureId::parse(&token).ok_or_else(|| ProviderError::InvalidOverride {
            variable: ENV_FORCE_GFX_ARCH,
            value: raw.to_string(),
            reason: format!("'{token}' is not a gfx architecture name"),
        })?;
        let name = arch.to_string();
        if !archs.contains(&name) {
            archs.push(name);
        }
    }
    Ok(archs)
}

fn parse_forced_rocm_version(raw: &str) -> ProviderResult<RuntimeVersion> {
    parse_strict_triplet(raw)
        .map(RuntimeVersion::from)
        .ok_or_else(|| ProviderError::InvalidOverride {
            variable: ENV_FORCE_ROCM_VERSION,
            value: raw.to_string(),
            reason: "expected numeric major.minor.patch".to_string(),
        })
}
