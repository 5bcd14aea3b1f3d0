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

use tracing_subscriber::EnvFilter;

/// Translate a verbosity setting into a `tracing` filter directive.
///
/// Accepts the level names operators already use for this provider
/// (`DEBUG`, `INFO`, `WARNING`, `ERROR`, `CRITICAL`) in any case. Anything
/// else is passed through as a filter directive.
pub fn level_directive(level: &str) -> String {
    match level.trim().to_ascii_uppercase().as_str() {
        "" => "info".to_string(),
        "TRACE" => "trace".to_string(),
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARN" | "WARNING" => "warn".to_string(),
        "ERROR" | "CRITICAL" | "FATAL" => "error".to_string(),
        _ => level.trim().to_string(),
    }
}

/// Install a stderr subscriber. Calling it again is a no-op.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level_directive(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_directive() {
        assert_eq!(level_directive("DEBUG"), "debug");
        assert_eq!(level_directive("warning"), "warn");
        assert_eq!(level_directive("CRITICAL"), "error");
        assert_eq!(level_directive(""), "info");
        assert_eq!(
            level_directive("rocm_variant_provider=debug"),
            "rocm_variant_provider=debug"
        );
    }

    #[test]
    fn test_init_twice() {
        init_logging("INFO");
        init_logging("DEBUG");
    }
}
