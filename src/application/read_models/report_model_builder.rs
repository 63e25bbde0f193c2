//! Builder for constructing ReportModel from engine results

use super::report_model::{
    FailureView, PackageStatusView, ReportMetadataView, ReportModel, SourceView, StatusShareView,
    SummaryView,
};
use crate::shared::error::SourceQueryError;
use crate::version_diff::domain::{ComparisonResult, ComparisonStatus, StatusCounts};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Builder for constructing ReportModel
///
/// Run identifier and timestamp default to a fresh UUID v4 and the current
/// time; both can be pinned for reproducible output.
pub struct ReportModelBuilder {
    source1: SourceView,
    source2: SourceView,
    run_id: Option<Uuid>,
    generated_at: Option<DateTime<Utc>>,
}

impl ReportModelBuilder {
    pub fn new(source1: SourceView, source2: SourceView) -> Self {
        Self {
            source1,
            source2,
            run_id: None,
            generated_at: None,
        }
    }

    pub fn run_id(mut self, run_id: Uuid) -> Self {
        self.run_id = Some(run_id);
        self
    }

    pub fn generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = Some(generated_at);
        self
    }

    /// Builds the model
    ///
    /// # Arguments
    /// * `results` - Final classification per package
    /// * `failures` - Query errors of packages that could not be classified
    pub fn build(
        self,
        results: &BTreeMap<String, ComparisonResult>,
        failures: &BTreeMap<String, SourceQueryError>,
    ) -> ReportModel {
        let packages = results
            .iter()
            .map(|(name, result)| PackageStatusView {
                name: name.clone(),
                status: result.status,
                nvr1: result.nvr1.clone(),
                nvr2: result.nvr2.clone(),
            })
            .collect();

        let counts: StatusCounts = results.values().map(|r| r.status).collect();

        ReportModel {
            metadata: ReportMetadataView {
                run_id: self.run_id.unwrap_or_else(Uuid::new_v4),
                generated_at: self.generated_at.unwrap_or_else(Utc::now),
                tool_name: env!("CARGO_PKG_NAME").to_string(),
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
            },
            source1: self.source1,
            source2: self.source2,
            packages,
            summary: Self::build_summary(counts),
            failures: failures
                .iter()
                .map(|(package, error)| FailureView {
                    package: package.clone(),
                    message: error.to_string(),
                })
                .collect(),
        }
    }

    fn build_summary(counts: StatusCounts) -> SummaryView {
        let percentages = counts
            .iter()
            .map(|(status, count)| StatusShareView {
                status,
                count,
                percentage: counts.percentage(status),
            })
            .collect();

        SummaryView {
            success_rate: counts.percentage(ComparisonStatus::Same),
            percentages,
            counts,
        }
    }
}
