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

//! Small text helpers shared by the extractors, the probes and the config layer.

use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;

static LIST_SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,\s;]+").unwrap());

static GFX_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^gfx[0-9a-f]+(?:-[0-9a-f]+)?(?:-generic)?$").unwrap());

static SHORT_VERSION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\d+$").unwrap());

/// Parse a trimmed token into any numeric type.
pub fn parse_number<T: FromStr>(s: &str) -> Option<T> {
    s.trim().parse::<T>().ok()
}

/// Split an operator-supplied list on commas, whitespace and semicolons.
/// Empty items are dropped.
pub fn split_list(value: &str) -> Vec<String> {
    LIST_SEPARATOR_RE
        .split(value.trim())
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse loosely formatted version text such as `6.4.1`, `6.4` or `6.4.1-120`.
///
/// Parts are delimited by '.' or '-'. The first two must be numeric, the third
/// defaults to 0 when missing or non-numeric, anything after it is ignored.
pub fn parse_version_parts(text: &str) -> Option<(u32, u32, u32)> {
    let mut parts = text.trim().split(['.', '-']);
    let major = parse_number::<u32>(parts.next()?)?;
    let minor = parse_number::<u32>(parts.next()?)?;
    let patch = parts.next().and_then(parse_number::<u32>).unwrap_or(0);
    Some((major, minor, patch))
}

/// Parse a strict `major.minor.patch` triplet. Any other arity fails.
pub fn parse_strict_triplet(text: &str) -> Option<(u32, u32, u32)> {
    let parts: Vec<&str> = text.trim().split('.').collect();
    if parts.len() != 3 {
        return None;
    }
    if parts
        .iter()
        .any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }
    Some((
        parse_number(parts[0])?,
        parse_number(parts[1])?,
        parse_number(parts[2])?,
    ))
}

/// Whether `token` is a complete, lowercase gfx target name.
pub fn is_gfx_token(token: &str) -> bool {
    GFX_TOKEN_RE.is_match(token)
}

/// Whether `value` looks like the `major.minor` form used in feature values.
pub fn is_short_version(value: &str) -> bool {
    SHORT_VERSION_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list(" gfx90a, gfx1100;gfx942  gfx1030 "),
            vec!["gfx90a", "gfx1100", "gfx942", "gfx1030"]
        );
        assert!(split_list("").is_empty());
        assert!(split_list(" ,; ").is_empty());
    }

    #[test]
    fn test_parse_version_parts() {
        assert_eq!(parse_version_parts("6.4.1"), Some((6, 4, 1)));
        assert_eq!(parse_version_parts("6.4.1-120\n"), Some((6, 4, 1)));
        assert_eq!(parse_version_parts("6.4"), Some((6, 4, 0)));
        assert_eq!(parse_version_parts("6-4-1"), Some((6, 4, 1)));
        assert_eq!(parse_version_parts("6"), None);
        assert_eq!(parse_version_parts("six.four"), None);
        assert_eq!(parse_version_parts(""), None);
    }

    #[test]
    fn test_parse_strict_triplet() {
        assert_eq!(parse_strict_triplet("7.0.0"), Some((7, 0, 0)));
        assert_eq!(parse_strict_triplet(" 6.4.1 "), Some((6, 4, 1)));
        assert_eq!(parse_strict_triplet("7.0"), None);
        assert_eq!(parse_strict_triplet("7.0.0.1"), None);
        assert_eq!(parse_strict_triplet("7.x.0"), None);
        assert_eq!(parse_strict_triplet("7..0"), None);
        assert_eq!(parse_strict_triplet("+7.0.0"), None);
    }

    #[test]
    fn test_gfx_token() {
        assert!(is_gfx_token("gfx90a"));
        assert!(is_gfx_token("gfx1100"));
        assert!(is_gfx_token("gfx9-generic"));
        assert!(is_gfx_token("gfx10-3-generic"));
        assert!(!is_gfx_token("GFX90A"));
        assert!(!is_gfx_token("gfx90a:xnack-"));
        assert!(!is_gfx_token("gfx"));
        assert!(!is_gfx_token("sm_90"));
    }

    #[test]
    fn test_is_short_version() {
        assert!(is_short_version("6.4"));
        assert!(!is_short_version("6.4.1"));
        assert!(!is_short_version("6"));
    }
}
