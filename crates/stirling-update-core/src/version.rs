use semver::Version;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A dot-separated release version compared segment by segment.
///
/// Parsing never fails: each segment contributes its leading run of digits,
/// and a segment without one counts as `0`. Missing trailing segments are
/// zero, so `"1.2"` and `"1.2.0"` are equal. The original text is kept for
/// display and serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ReleaseVersion {
    raw: String,
    segments: Vec<u64>,
}

impl ReleaseVersion {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let mut segments: Vec<u64> = raw.split('.').map(parse_segment).collect();
        while segments.last() == Some(&0) {
            segments.pop();
        }
        Self { raw, segments }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Numeric segments with trailing zeros removed.
    #[must_use]
    pub fn segments(&self) -> &[u64] {
        &self.segments
    }

    #[must_use]
    pub fn is_newer_than(&self, other: &Self) -> bool {
        self > other
    }

    #[must_use]
    pub fn is_stable(&self) -> bool {
        is_stable_release(&self.raw)
    }
}

impl PartialEq for ReleaseVersion {
    fn eq(&self, other: &Self) -> bool {
        self.segments == other.segments
    }
}

impl Eq for ReleaseVersion {}

impl Hash for ReleaseVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.segments.hash(state);
    }
}

// Trailing zeros are trimmed, so a plain lexicographic comparison matches the
// zero-padded positional comparison.
impl Ord for ReleaseVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.segments.cmp(&other.segments)
    }
}

impl PartialOrd for ReleaseVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for ReleaseVersion {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for ReleaseVersion {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ReleaseVersion {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<ReleaseVersion> for String {
    fn from(value: ReleaseVersion) -> Self {
        value.raw
    }
}

fn parse_segment(segment: &str) -> u64 {
    segment
        .trim_start()
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(u64::from(digit - b'0'))
        })
}

/// Compare two version strings position by position.
///
/// Missing and non-numeric segments count as `0`; the comparison is total and
/// never fails on malformed input.
#[must_use]
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');

    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (l, r) => {
                let l = l.map_or(0, parse_segment);
                let r = r.map_or(0, parse_segment);
                match l.cmp(&r) {
                    Ordering::Equal => {}
                    ordering => return ordering,
                }
            }
        }
    }
}

#[must_use]
pub fn is_newer_version(candidate: &str, current: &str) -> bool {
    compare_versions(candidate, current) == Ordering::Greater
}

/// Whether a version string names a stable release rather than a pre-release.
///
/// Strings that do not normalize to `X.Y.Z[-pre][+build]` are stable unless
/// they contain a `-`.
#[must_use]
pub fn is_stable_release(version: &str) -> bool {
    let version = version.trim();
    let version = version.strip_prefix('v').unwrap_or(version);
    parse_semver(version).map_or_else(|| !version.contains('-'), |parsed| parsed.pre.is_empty())
}

fn parse_semver(version: &str) -> Option<Version> {
    if let Ok(parsed) = Version::parse(version) {
        return Some(parsed);
    }

    let (core, suffix) = split_semver_core_and_suffix(version);
    let mut parts = core.split('.');
    let major = parts.next()?.parse::<u64>().ok()?;
    let minor = parts.next().and_then(|part| part.parse::<u64>().ok());
    let patch = parts.next().and_then(|part| part.parse::<u64>().ok());

    if parts.next().is_some() {
        return None;
    }

    let normalized = match (minor, patch) {
        (None, None) => format!("{major}.0.0{suffix}"),
        (Some(minor), None) => format!("{major}.{minor}.0{suffix}"),
        (Some(minor), Some(patch)) => format!("{major}.{minor}.{patch}{suffix}"),
        (None, Some(_)) => return None,
    };

    Version::parse(&normalized).ok()
}

fn split_semver_core_and_suffix(version: &str) -> (&str, &str) {
    let suffix_idx = version.find(['-', '+']).unwrap_or(version.len());
    (&version[..suffix_idx], &version[suffix_idx..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_treats_missing_segments_as_zero() {
        assert_eq!(compare_versions("1.2.0", "1.2"), Ordering::Equal);
        assert_eq!(compare_versions("1.2", "1.2.0"), Ordering::Equal);
        assert_eq!(compare_versions("1.0", "1.0.1"), Ordering::Less);
        assert_eq!(compare_versions("1.0.1", "1.0"), Ordering::Greater);
    }

    #[test]
    fn compare_orders_by_first_differing_segment() {
        assert_eq!(compare_versions("2.0", "1.9.9"), Ordering::Greater);
        assert_eq!(compare_versions("2.0.0", "1.9.9"), Ordering::Greater);
        assert_eq!(compare_versions("1.10.0", "1.9.0"), Ordering::Greater);
        assert_eq!(compare_versions("1.0.0", "1.0.0"), Ordering::Equal);
    }

    #[test]
    fn compare_is_lenient_with_malformed_segments() {
        assert_eq!(compare_versions("1.x.3", "1.0.3"), Ordering::Equal);
        assert_eq!(compare_versions("1.2.3-beta", "1.2.3"), Ordering::Equal);
        assert_eq!(compare_versions("", "0"), Ordering::Equal);
        assert_eq!(compare_versions("v2", "0.0.1"), Ordering::Less);
        assert_eq!(compare_versions("..", "0.0.0"), Ordering::Equal);
        assert_eq!(compare_versions(" 3.1", "3.1"), Ordering::Equal);
    }

    #[test]
    fn compare_saturates_oversized_segments() {
        assert_eq!(
            compare_versions("99999999999999999999999.0", "18446744073709551615"),
            Ordering::Equal
        );
    }

    #[test]
    fn release_version_ordering_matches_string_comparison() {
        let samples = [
            "0", "0.1", "1", "1.0", "1.0.0", "1.0.1", "1.2", "1.2.0.0", "1.10", "2.0.0-rc1",
            "2.0.0", "x.y", "10.0.0",
        ];

        for a in samples {
            for b in samples {
                assert_eq!(
                    ReleaseVersion::new(a).cmp(&ReleaseVersion::new(b)),
                    compare_versions(a, b),
                    "ordering mismatch for {a} vs {b}"
                );
            }
        }
    }

    #[test]
    fn compare_is_antisymmetric_and_transitive() {
        let samples = ["0.9", "1", "1.0.0", "1.0.1", "1.1", "1.1.0.1", "2.0", "bad"];

        for a in samples {
            assert_eq!(compare_versions(a, a), Ordering::Equal);
            for b in samples {
                assert_eq!(compare_versions(a, b), compare_versions(b, a).reverse());
                for c in samples {
                    if compare_versions(a, b) != Ordering::Greater
                        && compare_versions(b, c) != Ordering::Greater
                    {
                        assert_ne!(
                            compare_versions(a, c),
                            Ordering::Greater,
                            "transitivity broken for {a} <= {b} <= {c}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn release_version_equality_ignores_trailing_zeros() {
        let short = ReleaseVersion::new("1.2");
        let long = ReleaseVersion::new("1.2.0");

        assert_eq!(short, long);
        assert_eq!(short.as_str(), "1.2");
        assert_eq!(long.to_string(), "1.2.0");
        assert_eq!(short.segments(), &[1, 2]);
    }

    #[test]
    fn release_version_serializes_as_raw_string() {
        let version: ReleaseVersion =
            serde_json::from_str("\"2.1.0\"").expect("version should deserialize");
        assert_eq!(version.segments(), &[2, 1]);
        assert_eq!(
            serde_json::to_string(&version).expect("version should serialize"),
            "\"2.1.0\""
        );
    }

    #[test]
    fn is_newer_version_requires_strictly_greater() {
        assert!(is_newer_version("1.0.1", "1.0.0"));
        assert!(is_newer_version("1.2", "1.1.9"));
        assert!(!is_newer_version("1.2", "1.2.0"));
        assert!(!is_newer_version("0.9.0", "1.0.0"));
    }

    #[test]
    fn stable_release_detection() {
        assert!(is_stable_release("1.2.3"));
        assert!(is_stable_release("1.2"));
        assert!(is_stable_release("v2"));
        assert!(is_stable_release("1.0.0+build.5"));
        assert!(!is_stable_release("1.0.0-beta.2"));
        assert!(!is_stable_release("2.1-rc1"));
        assert!(!is_stable_release("1.2.3.4-alpha"));
        assert!(is_stable_release("1.2.3.4"));
    }
}
