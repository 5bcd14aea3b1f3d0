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

//! Probe strategies.
//!
//! Each reader tries one way of learning about the ROCm installation and
//! reports whatever it found as a [`PartialDetection`]. Readers never fail:
//! errors are logged and turned into an empty result.

pub mod agent_enumerator;
pub mod amdgpu_sysfs;
pub mod modinfo;
pub mod rocm_install;
pub mod rocminfo;

pub use agent_enumerator::AgentEnumeratorReader;
pub use amdgpu_sysfs::AmdgpuSysfsReader;
pub use modinfo::ModinfoReader;
pub use rocm_install::RocmInstallReader;
pub use rocminfo::RocminfoReader;

use tracing::debug;

use crate::config::DetectorConfig;
use crate::device::common::CommandRunner;
use crate::device::platform_detection::is_rocm_platform;
use crate::device::types::{DetectionField, PartialDetection};

/// Everything a reader may touch.
pub struct ProbeContext<'a> {
    pub runner: &'a dyn CommandRunner,
    pub config: &'a DetectorConfig,
}

impl ProbeContext<'_> {
    pub fn is_rocm_platform(&self) -> bool {
        is_rocm_platform(&self.config.target_os)
    }
}

pub trait ProbeStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fields this reader is able to fill.
    fn fields(&self) -> &'static [DetectionField];

    /// Whether the reader only makes sense on the Linux amdgpu driver model.
    fn requires_rocm_platform(&self) -> bool {
        true
    }

    fn probe(&self, ctx: &ProbeContext<'_>) -> PartialDetection;

    /// Platform-gated entry point used by the detector.
    fn run(&self, ctx: &ProbeContext<'_>) -> PartialDetection {
        if self.requires_rocm_platform() && !ctx.is_rocm_platform() {
            debug!(
                "{} skipped: not supported on {}",
                self.name(),
                ctx.config.target_os
            );
            return PartialDetection::default();
        }
        self.probe(ctx)
    }
}

/// Readers in precedence order.
///
/// `rocminfo` comes first because one invocation can fill every field. The
/// sysfs read is tried before `modinfo` since it spawns nothing.
pub fn default_strategies() -> Vec<Box<dyn ProbeStrategy>> {
    vec![
        Box::new(RocminfoReader),
        Box::new(AmdgpuSysfsReader),
        Box::new(ModinfoReader),
        Box::new(AgentEnumeratorReader),
        Box::new(RocmInstallReader),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::common::{CommandOutput, DeviceError, DeviceResult};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct CountingRunner {
        calls: AtomicUsize,
    }

    impl CommandRunner for CountingRunner {
        fn run(&self, program: &str, _: &[&str], _: Duration) -> DeviceResult<CommandOutput> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(DeviceError::CommandNotFound(program.to_string()))
        }
    }

    #[test]
    fn test_default_order() {
        let names: Vec<&str> = default_strategies().iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec![
                "rocminfo",
                "amdgpu-sysfs",
                "modinfo",
                "rocm_agent_enumerator",
                "rocm-install"
            ]
        );
    }

    #[test]
    fn test_platform_gate_spawns_nothing() {
        let runner = CountingRunner {
            calls: AtomicUsize::new(0),
        };
        let config = DetectorConfig::default().with_target_os("macos");
        let ctx = ProbeContext {
            runner: &runner,
            config: &config,
        };
        for strategy in default_strategies() {
            if strategy.requires_rocm_platform() {
                assert!(strategy.run(&ctx).is_empty());
            }
        }
        assert_eq!(runner.calls.load(Ordering::SeqCst), 0);
    }
}
