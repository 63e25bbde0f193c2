use crate::application::dto::CompareRequest;
use crate::ports::outbound::{BuildTracker, PackageListSource, ProgressReporter};
use crate::shared::error::SourceQueryError;
use crate::shared::Result;
use crate::version_diff::domain::{
    validate_package_name, ComparisonResult, KeyPolicy, PackageUniverse, StatusCounts,
};
use crate::version_diff::services::{BuildSource, ComparisonEngine, UniverseCollector};
use std::collections::BTreeMap;

/// Everything a finished comparison produced
#[derive(Debug, Clone)]
pub struct ComparisonOutcome {
    pub universe: PackageUniverse,
    pub results: BTreeMap<String, ComparisonResult>,
    pub failures: BTreeMap<String, SourceQueryError>,
    pub counts: StatusCounts,
}

impl ComparisonOutcome {
    /// Whether some packages could not be classified
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// CompareSourcesUseCase - classifies a package universe across two sources
///
/// # Type Parameters
/// * `A` - BuildTracker behind source 1 (baseline)
/// * `B` - BuildTracker behind source 2 (audited)
/// * `L` - PackageListSource used when no explicit package list is given
/// * `PR` - ProgressReporter implementation
pub struct CompareSourcesUseCase<A: BuildTracker, B: BuildTracker, L: PackageListSource, PR> {
    source1: BuildSource<A>,
    source2: BuildSource<B>,
    collector: UniverseCollector<L>,
    progress_reporter: PR,
    policy: KeyPolicy,
}

impl<A, B, L, PR> CompareSourcesUseCase<A, B, L, PR>
where
    A: BuildTracker,
    B: BuildTracker,
    L: PackageListSource,
    PR: ProgressReporter,
{
    pub fn new(
        source1: BuildSource<A>,
        source2: BuildSource<B>,
        collector: UniverseCollector<L>,
        progress_reporter: PR,
        policy: KeyPolicy,
    ) -> Self {
        Self {
            source1,
            source2,
            collector,
            progress_reporter,
            policy,
        }
    }

    pub fn source1(&self) -> &BuildSource<A> {
        &self.source1
    }

    pub fn source2(&self) -> &BuildSource<B> {
        &self.source2
    }

    /// Executes the comparison
    ///
    /// Query failures for individual packages end up in
    /// [`ComparisonOutcome::failures`]; only an unusable package universe
    /// aborts the run.
    pub fn execute(&self, request: &CompareRequest) -> Result<ComparisonOutcome> {
        // Step 1: Determine the package universe
        let universe = self.resolve_universe(request)?;

        // Step 2: Optionally bulk-load both sources
        if request.eager_cache {
            self.warm_caches();
        }

        // Step 3: Classify every package
        self.progress_reporter.report_phase(&format!(
            "🔍 Comparing {} package(s): {} vs {}",
            universe.len(),
            self.source1,
            self.source2
        ));
        let mut engine = ComparisonEngine::new(&universe, &self.source1, &self.source2, self.policy.clone());
        engine.compare_all_with(|current, total, package| {
            self.progress_reporter.report_progress(current, total, package)
        });
        let counts = engine.count();
        let (results, failures) = engine.into_parts();

        self.progress_reporter
            .report_completion(&format!("✅ Compared {} package(s): {}", counts.total(), counts));

        Ok(ComparisonOutcome {
            universe,
            results,
            failures,
            counts,
        })
    }

    fn resolve_universe(&self, request: &CompareRequest) -> Result<PackageUniverse> {
        if !request.packages.is_empty() {
            for name in &request.packages {
                validate_package_name(name)?;
            }
            let universe: PackageUniverse = request.packages.iter().map(String::as_str).collect();
            tracing::info!(packages = universe.len(), "Using explicit package list");
            return Ok(universe);
        }

        self.progress_reporter
            .report_phase("📖 Collecting package lists...");
        self.collector.collect()
    }

    /// Bulk-loads both sources; a failed bulk load only costs speed
    fn warm_caches(&self) {
        self.progress_reporter.report_phase("📦 Making caches...");
        for result in [self.source1.make_cache(), self.source2.make_cache()] {
            match result {
                Ok(count) => tracing::debug!(builds = count, "Bulk listing loaded"),
                Err(e) => tracing::warn!("Bulk listing failed, falling back to per-package queries: {}", e),
            }
        }
    }
}
