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

//! AMD ROCm environment detection for wheel variant selection.
//!
//! The crate probes the host for the `amdgpu` driver version, the ROCm
//! runtime version and the GPU `gfx` targets, and reports them as ordered
//! `amd :: <feature> :: <values>` features a package installer can match
//! against prebuilt wheels.
//!
//! ```no_run
//! use rocm_variant_provider::AmdVariantPlugin;
//!
//! let plugin = AmdVariantPlugin::from_env();
//! for config in plugin.get_supported_configs().unwrap_or_default() {
//!     println!("{} :: {} :: {:?}", plugin.namespace(), config.name, config.values);
//! }
//! ```

#[macro_use]
pub mod parsing;
pub mod config;
pub mod device;
pub mod provider;
pub mod utils;

pub use config::{DetectorConfig, ProviderConfig};
pub use device::{DetectionResult, RocmDetector};
pub use provider::{AmdVariantPlugin, FeatureKey, ProviderError, VariantFeatureConfig};
