use super::build::Build;
use crate::shared::Result;
use crate::version_diff::services::VersionComparator;
use regex::Regex;
use std::borrow::Cow;
use std::cmp::Ordering;

/// Longest accepted distribution marker, e.g. `eln`, `fc`, `el`
const MAX_MARKER_LENGTH: usize = 16;

/// Default distribution markers stripped before comparison
pub const DEFAULT_DIST_MARKERS: &[&str] = &["fc", "eln"];

/// Matches the distribution suffix embedded in a release string.
///
/// A suffix is a dot, one of the configured alphabetic markers, and any
/// trailing digits: `.fc40`, `.eln136`, `.branchA`. Every occurrence is
/// removed, so `3.fc40.1` becomes `3.1`.
#[derive(Debug, Clone)]
pub struct DistTagPattern {
    markers: Vec<String>,
    regex: Regex,
}

impl DistTagPattern {
    pub fn new<S: AsRef<str>>(markers: &[S]) -> Result<Self> {
        if markers.is_empty() {
            anyhow::bail!("At least one distribution marker is required");
        }

        let mut markers: Vec<String> = markers.iter().map(|m| m.as_ref().to_string()).collect();
        for marker in &markers {
            if marker.is_empty()
                || marker.len() > MAX_MARKER_LENGTH
                || !marker.chars().all(|c| c.is_ascii_alphabetic())
            {
                anyhow::bail!(
                    "Invalid distribution marker '{}': expected 1-{} ASCII letters",
                    marker,
                    MAX_MARKER_LENGTH
                );
            }
        }

        // Longest first so `eln` wins over `el` in the alternation
        markers.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        markers.dedup();

        let alternation = markers
            .iter()
            .map(|m| regex::escape(m))
            .collect::<Vec<_>>()
            .join("|");
        let regex = Regex::new(&format!(r"\.(?:{})[0-9]*", alternation))?;

        Ok(Self { markers, regex })
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Removes every distribution suffix from a release string
    pub fn strip<'a>(&self, release: &'a str) -> Cow<'a, str> {
        self.regex.replace_all(release, "")
    }
}

impl Default for DistTagPattern {
    fn default() -> Self {
        Self::new(DEFAULT_DIST_MARKERS).expect("default distribution markers are valid")
    }
}

/// How builds are projected onto comparable keys.
///
/// Epochs are ignored by default: epoch drift between branches is common
/// and says nothing about whether a rebuild is needed.
#[derive(Debug, Clone)]
pub struct KeyPolicy {
    pub dist_tag: DistTagPattern,
    pub ignore_epoch: bool,
}

impl KeyPolicy {
    pub fn new(dist_tag: DistTagPattern, ignore_epoch: bool) -> Self {
        Self {
            dist_tag,
            ignore_epoch,
        }
    }
}

impl Default for KeyPolicy {
    fn default() -> Self {
        Self::new(DistTagPattern::default(), true)
    }
}

/// Comparable epoch/version/release projection of a build.
///
/// Equality and ordering follow RPM label comparison, so `1.0` and `1_0`
/// are equal keys even though the strings differ.
#[derive(Debug, Clone)]
pub struct VersionKey {
    epoch: i64,
    version: String,
    release: String,
}

impl VersionKey {
    pub fn new(epoch: i64, version: impl Into<String>, release: impl Into<String>) -> Self {
        Self {
            epoch,
            version: version.into(),
            release: release.into(),
        }
    }

    pub fn from_build(build: &Build, policy: &KeyPolicy) -> Self {
        let epoch = if policy.ignore_epoch {
            0
        } else {
            build.epoch().unwrap_or(0)
        };
        let release = policy.dist_tag.strip(build.release());
        Self::new(epoch, build.version(), release.into_owned())
    }

    pub fn epoch(&self) -> i64 {
        self.epoch
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn release(&self) -> &str {
        &self.release
    }
}

impl std::fmt::Display for VersionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}-{}", self.epoch, self.version, self.release)
    }
}

impl Ord for VersionKey {
    fn cmp(&self, other: &Self) -> Ordering {
        VersionComparator::compare(self, other)
    }
}

impl PartialOrd for VersionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for VersionKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VersionKey {}
