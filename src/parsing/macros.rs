//! Parsing macros for repeated text parsing patterns.

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

/// Build a version type from the first regex match in `$text`.
///
/// The regex must capture major, minor and an optional patch as groups 1-3.
/// - Returns `None` when nothing matches or a component overflows.
/// - A missing patch group becomes 0.
///
/// Example usage:
/// ```ignore
/// let v = version_from_captures!(re, output, RuntimeVersion);
/// ```
#[macro_export]
macro_rules! version_from_captures {
    ($re:expr, $text:expr, $ty:ty) => {{
        $re.captures($text).and_then(|cap| {
            let major = cap
                .get(1)
                .and_then(|m| $crate::parsing::common::parse_number::<u32>(m.as_str()))?;
            let minor = cap
                .get(2)
                .and_then(|m| $crate::parsing::common::parse_number::<u32>(m.as_str()))?;
            let patch = match cap.get(3) {
                Some(m) => $crate::parsing::common::parse_number::<u32>(m.as_str())?,
                None => 0,
            };
            Some(<$ty>::new(major, minor, patch))
        })
    }};
}

/// Collect every match of `$re` in `$text` into a sorted set, using capture
/// group 1 and running each through `$normalize`.
///
/// Example usage:
/// ```ignore
/// let archs = collect_tokens!(re, output, ArchitectureId::parse);
/// ```
#[macro_export]
macro_rules! collect_tokens {
    ($re:expr, $text:expr, $normalize:expr) => {{
        $re.captures_iter($text)
            .filter_map(|cap| cap.get(1))
            .filter_map(|m| $normalize(m.as_str()))
            .collect::<::std::collections::BTreeSet<_>>()
    }};
}
