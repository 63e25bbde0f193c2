//! Report read model for rendering operations
//!
//! This module provides the immutable struct every output format renders
//! from.

use crate::version_diff::domain::{ComparisonStatus, StatusCounts};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Read model of one finished comparison run
///
/// Built once from the final results and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ReportModel {
    pub metadata: ReportMetadataView,
    /// Baseline source
    pub source1: SourceView,
    /// Audited source
    pub source2: SourceView,
    /// One row per classified package, sorted by name
    pub packages: Vec<PackageStatusView>,
    pub summary: SummaryView,
    /// Packages whose classification failed with a query error
    pub failures: Vec<FailureView>,
}

impl ReportModel {
    /// Rows with the given status
    pub fn packages_with(&self, status: ComparisonStatus) -> impl Iterator<Item = &PackageStatusView> {
        self.packages.iter().filter(move |p| p.status == status)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadataView {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub tool_name: String,
    pub tool_version: String,
}

/// Identity of a build source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceView {
    pub name: String,
    pub tag: String,
}

impl SourceView {
    pub fn new(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageStatusView {
    pub name: String,
    pub status: ComparisonStatus,
    pub nvr1: Option<String>,
    pub nvr2: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryView {
    /// Per-status counts plus `total`
    pub counts: StatusCounts,
    /// Share of each status that occurred, keyed by status name
    pub percentages: Vec<StatusShareView>,
    /// Share of SAME in the total, `"?%"` without data
    pub success_rate: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusShareView {
    pub status: ComparisonStatus,
    pub count: usize,
    pub percentage: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureView {
    pub package: String,
    pub message: String,
}
