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

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Feature names published under the `amd` namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKey {
    GfxArch,
    RocmVersion,
}

impl FeatureKey {
    pub const ALL: [FeatureKey; 2] = [FeatureKey::GfxArch, FeatureKey::RocmVersion];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKey::GfxArch => "gfx_arch",
            FeatureKey::RocmVersion => "rocm_version",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }

    pub fn is_multi_value(&self) -> bool {
        matches!(self, FeatureKey::GfxArch)
    }
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One feature and its acceptable values, most specific first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantFeatureConfig {
    pub name: FeatureKey,
    pub values: Vec<String>,
    pub multi_value: bool,
}

impl VariantFeatureConfig {
    pub fn new(name: FeatureKey, values: Vec<String>) -> Self {
        Self {
            multi_value: name.is_multi_value(),
            name,
            values,
        }
    }
}

/// Shape of a `namespace :: feature :: value` triple handed in by a package tool.
pub trait VariantPropertyType {
    fn namespace(&self) -> &str;
    fn feature(&self) -> &str;
    fn value(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantProperty {
    pub namespace: String,
    pub feature: String,
    pub value: String,
}

impl VariantProperty {
    pub fn new(
        namespace: impl Into<String>,
        feature: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            feature: feature.into(),
            value: value.into(),
        }
    }
}

impl VariantPropertyType for VariantProperty {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn feature(&self) -> &str {
        &self.feature
    }

    fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for VariantProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} :: {} :: {}", self.namespace, self.feature, self.value)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("invalid {variable}={value:?}: {reason}")]
    InvalidOverride {
        variable: &'static str,
        value: String,
        reason: String,
    },
}

pub type ProviderResult<T> = Result<T, ProviderError>;
