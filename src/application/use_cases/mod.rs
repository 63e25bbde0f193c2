/// Use cases module containing application business logic orchestration
mod compare_sources;
mod plan_rebuilds;
mod render_reports;

pub use compare_sources::{CompareSourcesUseCase, ComparisonOutcome};
pub use plan_rebuilds::{PlanRebuildsUseCase, RebuildPlan};
pub use render_reports::{RenderReportsUseCase, RenderSummary};
