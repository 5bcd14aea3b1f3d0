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

use std::collections::BTreeSet;

use tracing::info;

use super::{ProbeContext, ProbeStrategy};
use crate::device::common::constants::{AGENT_ENUMERATOR_COMMAND, AGENT_ENUMERATOR_NAME_FLAG};
use crate::device::common::error_handling::log_probe_error;
use crate::device::types::{ArchitectureId, DetectionField, PartialDetection};
use crate::parsing::extractors::extract_architecture_line;

/// `rocm_agent_enumerator -name`, one gfx name per line.
pub struct AgentEnumeratorReader;

impl ProbeStrategy for AgentEnumeratorReader {
    fn name(&self) -> &'static str {
        "rocm_agent_enumerator"
    }

    fn fields(&self) -> &'static [DetectionField] {
        &[DetectionField::Architectures]
    }

    fn probe(&self, ctx: &ProbeContext<'_>) -> PartialDetection {
        match ctx.runner.run(
            AGENT_ENUMERATOR_COMMAND,
            &[AGENT_ENUMERATOR_NAME_FLAG],
            ctx.config.agent_enumerator_timeout,
        ) {
            Ok(output) => {
                let archs = parse_agent_names(&output.stdout);
                if !archs.is_empty() {
                    let names: Vec<&str> = archs.iter().map(|a| a.as_str()).collect();
                    info!("Found GFX architectures {names:?} via `{AGENT_ENUMERATOR_COMMAND}`.");
                }
                PartialDetection::with_architectures(archs)
            }
            Err(e) => {
                log_probe_error(self.name(), &e);
                PartialDetection::default()
            }
        }
    }
}

pub fn parse_agent_names(output: &str) -> BTreeSet<ArchitectureId> {
    output.lines().filter_map(extract_architecture_line).collect()
}
