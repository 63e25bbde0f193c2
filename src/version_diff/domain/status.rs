use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Classification of a package after comparing both sources.
///
/// Source 1 is the authoritative baseline. Its absence is `Error`, while
/// absence from source 2 is the ordinary `None` case; the asymmetry is
/// intentional and must not be folded into a single "missing" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ComparisonStatus {
    /// Source 1 has no build for the package
    Error,
    /// Source 2 carries a newer build than source 1
    New,
    /// Both builds compare equal
    Same,
    /// Source 2 is behind source 1
    Old,
    /// Source 1 has a build, source 2 has none
    None,
}

impl ComparisonStatus {
    pub const ALL: [ComparisonStatus; 5] = [
        ComparisonStatus::Error,
        ComparisonStatus::New,
        ComparisonStatus::Same,
        ComparisonStatus::Old,
        ComparisonStatus::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonStatus::Error => "ERROR",
            ComparisonStatus::New => "NEW",
            ComparisonStatus::Same => "SAME",
            ComparisonStatus::Old => "OLD",
            ComparisonStatus::None => "NONE",
        }
    }

    /// Whether source 2 needs a rebuild of source 1's build
    pub fn needs_rebuild(&self) -> bool {
        matches!(self, ComparisonStatus::Old | ComparisonStatus::None)
    }
}

impl std::fmt::Display for ComparisonStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of comparing one package across the two sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonResult {
    pub status: ComparisonStatus,
    pub nvr1: Option<String>,
    pub nvr2: Option<String>,
}

impl ComparisonResult {
    pub fn new(status: ComparisonStatus, nvr1: Option<String>, nvr2: Option<String>) -> Self {
        Self { status, nvr1, nvr2 }
    }
}

/// Tally of stored results per status, plus the overall total.
///
/// Serializes as a flat map, e.g. `{"SAME": 3, "OLD": 2, "total": 5}`;
/// statuses that never occurred are left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusCounts {
    counts: BTreeMap<ComparisonStatus, usize>,
}

impl StatusCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, status: ComparisonStatus) {
        *self.counts.entry(status).or_insert(0) += 1;
    }

    pub fn get(&self, status: ComparisonStatus) -> usize {
        self.counts.get(&status).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Share of `status` in the total, e.g. `"66.67%"`, or `"?%"` without data
    pub fn percentage(&self, status: ComparisonStatus) -> String {
        match self.total() {
            0 => "?%".to_string(),
            total => format!("{:.2}%", self.get(status) as f64 * 100.0 / total as f64),
        }
    }

    /// Iterates over statuses that occurred at least once
    pub fn iter(&self) -> impl Iterator<Item = (ComparisonStatus, usize)> + '_ {
        self.counts.iter().map(|(status, count)| (*status, *count))
    }
}

impl FromIterator<ComparisonStatus> for StatusCounts {
    fn from_iter<I: IntoIterator<Item = ComparisonStatus>>(iter: I) -> Self {
        let mut counts = StatusCounts::new();
        for status in iter {
            counts.record(status);
        }
        counts
    }
}

impl std::fmt::Display for StatusCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (status, count) in self.iter() {
            write!(f, "{}={} ", status, count)?;
        }
        write!(f, "total={}", self.total())
    }
}

impl Serialize for StatusCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len() + 1))?;
        for (status, count) in self.iter() {
            map.serialize_entry(status.as_str(), &count)?;
        }
        map.serialize_entry("total", &self.total())?;
        map.end()
    }
}
