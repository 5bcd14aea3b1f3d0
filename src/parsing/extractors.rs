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

//! Extractors for `rocminfo`, `modinfo` and `rocm_agent_enumerator` output.
//!
//! Every function here is total: empty or garbled input yields `None` or an
//! empty set, never an error.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::device::types::{ArchitectureId, DriverVersion, RuntimeVersion};

/// `version:  6.10.5` from modinfo, `ROCk module version 6.10.5 is loaded` from rocminfo.
static DRIVER_VERSION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:rock[ \t]+module[ \t]+)?version:?[ \t]+(\d+)\.(\d+)(?:\.(\d+))?")
        .unwrap()
});

static RUNTIME_VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)ROCm(?:\s+Version)?[:\s]*(\d+)\.(\d+)(?:\.(\d+))?").unwrap());

// Whole tokens only. ISA feature suffixes such as `:sramecc+:xnack-` stop the match.
static GFX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(gfx[0-9a-f]+(?:-[0-9a-f]+)?(?:-generic)?)\b").unwrap());

/// First labeled driver version in `text`.
pub fn extract_driver_version(text: &str) -> Option<DriverVersion> {
    version_from_captures!(DRIVER_VERSION_RE, text, DriverVersion)
}

/// First ROCm runtime version in `text`.
pub fn extract_runtime_version(text: &str) -> Option<RuntimeVersion> {
    version_from_captures!(RUNTIME_VERSION_RE, text, RuntimeVersion)
}

/// Every distinct gfx target in `text`, sorted, without the CPU agent.
pub fn extract_architectures(text: &str) -> BTreeSet<ArchitectureId> {
    let mut found = collect_tokens!(GFX_RE, text, ArchitectureId::parse);
    found.retain(|arch| !arch.is_cpu_agent());
    found
}

/// Architecture from a single `rocm_agent_enumerator -name` line.
pub fn extract_architecture_line(line: &str) -> Option<ArchitectureId> {
    GFX_RE
        .captures(line)
        .and_then(|cap| cap.get(1))
        .and_then(|m| ArchitectureId::parse(m.as_str()))
        .filter(|arch| !arch.is_cpu_agent())
}
