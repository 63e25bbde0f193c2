use super::ComparisonOutcome;
use crate::ports::outbound::BuildTracker;
use crate::shared::error::DiffError;
use crate::shared::Result;
use crate::version_diff::domain::{BuildId, ComparisonStatus};
use crate::version_diff::policies::PolicyFilter;
use crate::version_diff::services::BuildSource;
use anyhow::Context;

/// What automation should do after a comparison
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RebuildPlan {
    /// Source 1 builds to rebuild into source 2, in package-name order
    pub rebuild: Vec<BuildId>,
    /// Packages tagged in source 2 but outside the declared universe;
    /// `None` when source 2 could not be listed
    pub untag: Option<Vec<String>>,
    /// Universe members that are neither excluded nor held
    pub buildable: Vec<String>,
    /// Share of SAME results, `"?%"` without data
    pub success_rate: String,
    /// Number of differences found for held packages
    pub held_differences: usize,
}

/// PlanRebuildsUseCase - turns comparison results into rebuild actions
///
/// Classification is never changed here; the policy only decides which
/// differences are acted upon.
pub struct PlanRebuildsUseCase<'a> {
    policy: &'a PolicyFilter,
}

impl<'a> PlanRebuildsUseCase<'a> {
    pub fn new(policy: &'a PolicyFilter) -> Self {
        Self { policy }
    }

    /// Builds the plan
    ///
    /// # Arguments
    /// * `outcome` - Results of the comparison run
    /// * `source1` - Baseline source, queried (from cache) for build ids
    /// * `source2` - Audited source, bulk-listed for the untag list; a
    ///   failed listing only leaves [`RebuildPlan::untag`] unset
    pub fn execute<A: BuildTracker, B: BuildTracker>(
        &self,
        outcome: &ComparisonOutcome,
        source1: &BuildSource<A>,
        source2: &BuildSource<B>,
    ) -> Result<RebuildPlan> {
        let mut plan = RebuildPlan {
            success_rate: outcome.counts.percentage(ComparisonStatus::Same),
            ..Default::default()
        };

        for (package, result) in &outcome.results {
            if self.policy.is_excluded(package) {
                tracing::warn!("Skipping {} because it is excluded", package);
                continue;
            }
            if !result.status.needs_rebuild() {
                continue;
            }

            let nvr1 = result.nvr1.as_deref().unwrap_or("NONE");
            let nvr2 = result.nvr2.as_deref().unwrap_or("NONE");
            if self.policy.is_on_hold(package) {
                tracing::info!("Held package difference found: {} {}", nvr1, nvr2);
                plan.held_differences += 1;
                continue;
            }

            tracing::warn!("Difference found: {} {}", nvr1, nvr2);
            let build = source1
                .get_build(package)
                .map_err(DiffError::from)
                .with_context(|| format!("Failed to look up the {} build of {}", source1.name(), package))?;
            match build {
                Some(build) => plan.rebuild.push(build.build_id()),
                None => tracing::warn!("{} has no build of {} to rebuild", source1, package),
            }
        }

        plan.untag = match source2.tagged_packages() {
            Ok(tagged) => Some(
                tagged
                    .into_iter()
                    .filter(|name| !outcome.universe.contains(name))
                    .inspect(|name| tracing::warn!("Adding {} to the untag list", name))
                    .collect(),
            ),
            Err(e) => {
                tracing::error!("Untag list unavailable: {}", e);
                None
            }
        };

        plan.buildable = outcome
            .universe
            .iter()
            .filter(|name| self.policy.is_buildable(name))
            .map(str::to_string)
            .collect();
        plan.buildable.sort();

        tracing::info!(
            rebuild = plan.rebuild.len(),
            held = plan.held_differences,
            untag = plan.untag.as_ref().map_or(0, Vec::len),
            "Total differences {}",
            plan.rebuild.len()
        );
        Ok(plan)
    }
}
