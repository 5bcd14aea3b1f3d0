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
use std::fmt;

use serde::Serialize;

use crate::parsing::common::is_gfx_token;

/// Declares a `major.minor.patch` version newtype.
///
/// Driver and runtime versions share a shape but are kept as separate types so
/// one can never be passed where the other is expected.
macro_rules! version_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        pub struct $name {
            pub major: u32,
            pub minor: u32,
            pub patch: u32,
        }

        impl $name {
            pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
                Self { major, minor, patch }
            }

            /// `major.minor`, the granularity package indexes publish variants at.
            pub fn short(&self) -> String {
                format!("{}.{}", self.major, self.minor)
            }
        }

        impl From<(u32, u32, u32)> for $name {
            fn from((major, minor, patch): (u32, u32, u32)) -> Self {
                Self::new(major, minor, patch)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
            }
        }
    };
}

version_type!(
    /// Version of the `amdgpu` kernel-mode driver.
    DriverVersion
);

version_type!(
    /// Version of the user-mode ROCm stack.
    RuntimeVersion
);

/// A normalized GPU target such as `gfx90a` or `gfx10-3-generic`.
///
/// Always lowercase. Construction goes through [`ArchitectureId::parse`], which
/// rejects anything that is not a well-formed `gfx` token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ArchitectureId(String);

impl ArchitectureId {
    /// The CPU agent `rocminfo` lists next to real GPUs.
    pub const CPU_AGENT: &'static str = "gfx000";

    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim().to_ascii_lowercase();
        if is_gfx_token(&token) {
            Some(Self(token))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_cpu_agent(&self) -> bool {
        self.0 == Self::CPU_AGENT
    }
}

impl fmt::Display for ArchitectureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ArchitectureId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Consolidated view of the local ROCm installation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetectionResult {
    pub driver_version: Option<DriverVersion>,
    pub runtime_version: Option<RuntimeVersion>,
    /// Sorted and deduplicated by construction.
    pub architectures: BTreeSet<ArchitectureId>,
}

impl DetectionResult {
    pub fn is_empty(&self) -> bool {
        self.driver_version.is_none()
            && self.runtime_version.is_none()
            && self.architectures.is_empty()
    }

    /// Architecture names in lexicographic order.
    pub fn architecture_names(&self) -> Vec<String> {
        self.architectures
            .iter()
            .map(|arch| arch.as_str().to_string())
            .collect()
    }
}

/// The fields of [`DetectionResult`] a probe can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectionField {
    DriverVersion,
    RuntimeVersion,
    Architectures,
}

/// What a single probe managed to find. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialDetection {
    pub driver_version: Option<DriverVersion>,
    pub runtime_version: Option<RuntimeVersion>,
    pub architectures: BTreeSet<ArchitectureId>,
}

impl PartialDetection {
    pub fn is_empty(&self) -> bool {
        self.driver_version.is_none()
            && self.runtime_version.is_none()
            && self.architectures.is_empty()
    }

    pub fn with_driver_version(version: DriverVersion) -> Self {
        Self {
            driver_version: Some(version),
            ..Self::default()
        }
    }

    pub fn with_runtime_version(version: RuntimeVersion) -> Self {
        Self {
            runtime_version: Some(version),
            ..Self::default()
        }
    }

    pub fn with_architectures(architectures: BTreeSet<ArchitectureId>) -> Self {
        Self {
            architectures,
            ..Self::default()
        }
    }
}
