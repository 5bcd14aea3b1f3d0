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

//! Detection orchestrator.
//!
//! Runs the readers in precedence order, keeps the first value found for each
//! field and memoizes the outcome. A detector probes the host at most once;
//! build a new one to probe again.

use std::sync::{Arc, OnceLock};

use tracing::{debug, info, warn};

use crate::config::DetectorConfig;
use crate::device::common::{CommandRunner, SystemCommandRunner};
use crate::device::readers::{default_strategies, ProbeContext, ProbeStrategy};
use crate::device::types::{DetectionField, DetectionResult, PartialDetection};

pub struct RocmDetector {
    config: DetectorConfig,
    runner: Arc<dyn CommandRunner>,
    strategies: Vec<Box<dyn ProbeStrategy>>,
    cache: OnceLock<DetectionResult>,
}

impl RocmDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self::with_runner(config, Arc::new(SystemCommandRunner))
    }

    pub fn with_runner(config: DetectorConfig, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            config,
            runner,
            strategies: default_strategies(),
            cache: OnceLock::new(),
        }
    }

    /// Replace the reader table. Order is precedence order.
    pub fn with_strategies(mut self, strategies: Vec<Box<dyn ProbeStrategy>>) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// The consolidated result, probing the host on the first call only.
    ///
    /// Concurrent first callers block until the single probing pass finishes.
    /// An empty result is cached like any other.
    pub fn detect(&self) -> &DetectionResult {
        self.cache.get_or_init(|| self.run_detection())
    }

    pub fn is_cached(&self) -> bool {
        self.cache.get().is_some()
    }

    fn run_detection(&self) -> DetectionResult {
        let ctx = ProbeContext {
            runner: self.runner.as_ref(),
            config: &self.config,
        };
        let mut result = DetectionResult::default();

        for strategy in &self.strategies {
            let wanted = strategy
                .fields()
                .iter()
                .any(|field| !is_field_set(&result, *field));
            if !wanted {
                debug!("{}: skipped, fields already resolved", strategy.name());
                continue;
            }

            let found = strategy.run(&ctx);
            self.merge(&mut result, found, strategy.name());
        }

        if result.is_empty() {
            warn!("Neither ROCm version nor GFX architecture could be detected.");
        } else {
            info!(
                "ROCm detection complete: driver={}, runtime={}, archs={:?}",
                display_opt(result.driver_version.as_ref()),
                display_opt(result.runtime_version.as_ref()),
                result.architecture_names()
            );
        }

        result
    }

    /// First value wins; architecture sets are allow-listed before they count.
    fn merge(&self, result: &mut DetectionResult, found: PartialDetection, source: &str) {
        if result.driver_version.is_none() {
            result.driver_version = found.driver_version;
        }
        if result.runtime_version.is_none() {
            result.runtime_version = found.runtime_version;
        }
        if result.architectures.is_empty() {
            let (allowed, rejected): (Vec<_>, Vec<_>) = found
                .architectures
                .into_iter()
                .partition(|arch| self.config.is_allowed(arch));
            if !rejected.is_empty() {
                let names: Vec<&str> = rejected.iter().map(|a| a.as_str()).collect();
                info!("{source}: ignoring GFX architectures without published builds: {names:?}");
            }
            result.architectures = allowed.into_iter().collect();
        }
    }
}

fn is_field_set(result: &DetectionResult, field: DetectionField) -> bool {
    match field {
        DetectionField::DriverVersion => result.driver_version.is_some(),
        DetectionField::RuntimeVersion => result.runtime_version.is_some(),
        DetectionField::Architectures => !result.architectures.is_empty(),
    }
}

fn display_opt<T: std::fmt::Display>(value: Option<&T>) -> String {
    value.map_or_else(|| "none".to_string(), ToString::to_string)
}
