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

// Common constants for ROCm probes

use std::time::Duration;

/// Operating system the amdgpu/ROCm probes understand
pub const SUPPORTED_OS: &str = "linux";

/// Kernel driver
pub const AMDGPU_MODULE: &str = "amdgpu";
pub const AMDGPU_SYSFS_VERSION_PATH: &str = "/sys/module/amdgpu/version";

/// Diagnostic tools
pub const ROCMINFO_COMMAND: &str = "rocminfo";
pub const MODINFO_COMMAND: &str = "modinfo";
pub const AGENT_ENUMERATOR_COMMAND: &str = "rocm_agent_enumerator";
pub const AGENT_ENUMERATOR_NAME_FLAG: &str = "-name";

/// Per-tool time limits
pub const ROCMINFO_TIMEOUT: Duration = Duration::from_secs(7);
pub const MODINFO_TIMEOUT: Duration = Duration::from_secs(10);
pub const AGENT_ENUMERATOR_TIMEOUT: Duration = Duration::from_secs(5);

/// Installation layout
pub const DEFAULT_ROCM_ROOT: &str = "/opt/rocm";
pub const ROCM_VERSION_MARKER: &str = ".info/version";

/// gfx targets for which prebuilt wheels are published
pub const DEFAULT_GFX_ALLOWLIST: &[&str] = &[
    "gfx900", "gfx906", "gfx908", "gfx90a", "gfx942", "gfx1030", "gfx1100", "gfx1101", "gfx1102",
    "gfx1200", "gfx1201",
];

/// ROCm releases advertised by the provider, newest first
pub const KNOWN_ROCM_VERSIONS: &[&str] = &["6.4", "6.3"];
