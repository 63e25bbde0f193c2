use super::{BuildSource, VersionComparator};
use crate::ports::outbound::BuildTracker;
use crate::shared::error::SourceQueryError;
use crate::version_diff::domain::{
    ComparisonResult, ComparisonStatus, KeyPolicy, PackageUniverse, StatusCounts,
};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// ComparisonEngine - classifies packages by comparing two build sources
///
/// Source 1 is the baseline, source 2 the branch being audited. Results
/// are memoized per package for the lifetime of the engine: once stored,
/// a classification is never recomputed, even if the source caches have
/// grown in the meantime.
pub struct ComparisonEngine<'a, A: BuildTracker, B: BuildTracker> {
    universe: &'a PackageUniverse,
    source1: &'a BuildSource<A>,
    source2: &'a BuildSource<B>,
    policy: KeyPolicy,
    results: BTreeMap<String, ComparisonResult>,
    failures: BTreeMap<String, SourceQueryError>,
}

impl<'a, A: BuildTracker, B: BuildTracker> ComparisonEngine<'a, A, B> {
    pub fn new(
        universe: &'a PackageUniverse,
        source1: &'a BuildSource<A>,
        source2: &'a BuildSource<B>,
        policy: KeyPolicy,
    ) -> Self {
        Self {
            universe,
            source1,
            source2,
            policy,
            results: BTreeMap::new(),
            failures: BTreeMap::new(),
        }
    }

    pub fn universe(&self) -> &'a PackageUniverse {
        self.universe
    }

    pub fn source1(&self) -> &'a BuildSource<A> {
        self.source1
    }

    pub fn source2(&self) -> &'a BuildSource<B> {
        self.source2
    }

    /// Classifies a single package
    ///
    /// Packages outside the declared universe are compared anyway, with a
    /// warning.
    ///
    /// # Errors
    /// Returns the `SourceQueryError` of whichever source failed. Nothing is
    /// stored for the package in that case.
    pub fn compare_one(&mut self, package: &str) -> Result<ComparisonResult, SourceQueryError> {
        if !self.universe.contains(package) {
            tracing::warn!("Package {} is not in the content set", package);
        }

        if let Some(result) = self.results.get(package) {
            return Ok(result.clone());
        }

        let build1 = self.source1.get_build(package)?;
        let build2 = self.source2.get_build(package)?;

        let result = match (build1, build2) {
            (None, _) => {
                tracing::warn!("Package {} not found in {}", package, self.source1);
                ComparisonResult::new(ComparisonStatus::Error, None, None)
            }
            (Some(build1), None) => {
                tracing::info!("Package {} not found in {}", package, self.source2);
                ComparisonResult::new(
                    ComparisonStatus::None,
                    Some(build1.nvr().to_string()),
                    None,
                )
            }
            (Some(build1), Some(build2)) => {
                let status = match VersionComparator::compare_builds(&build1, &build2, &self.policy)
                {
                    Ordering::Greater => ComparisonStatus::Old,
                    Ordering::Equal => ComparisonStatus::Same,
                    Ordering::Less => ComparisonStatus::New,
                };
                ComparisonResult::new(
                    status,
                    Some(build1.nvr().to_string()),
                    Some(build2.nvr().to_string()),
                )
            }
        };

        self.failures.remove(package);
        self.results.insert(package.to_string(), result.clone());
        Ok(result)
    }

    /// Classifies every package of the universe, in universe order
    pub fn compare_all(&mut self) -> &BTreeMap<String, ComparisonResult> {
        self.compare_all_with(|_, _, _| {})
    }

    /// Like [`compare_all`](Self::compare_all), calling `on_progress` with
    /// `(processed, total, package)` after each package
    ///
    /// A query failure for one package is recorded in
    /// [`failures`](Self::failures) and does not stop the loop.
    pub fn compare_all_with<F>(&mut self, mut on_progress: F) -> &BTreeMap<String, ComparisonResult>
    where
        F: FnMut(usize, usize, &str),
    {
        let universe = self.universe;
        let total = universe.len();

        for (idx, package) in universe.iter().enumerate() {
            tracing::debug!("Processing package {}", package);
            if let Err(e) = self.compare_one(package) {
                tracing::error!("Could not classify {}: {}", package, e);
                self.failures.insert(package.to_string(), e);
            }
            on_progress(idx + 1, total, package);
        }

        &self.results
    }

    /// Status tally over the results stored so far
    pub fn count(&self) -> StatusCounts {
        self.results.values().map(|result| result.status).collect()
    }

    pub fn results(&self) -> &BTreeMap<String, ComparisonResult> {
        &self.results
    }

    /// Packages whose last classification attempt failed
    pub fn failures(&self) -> &BTreeMap<String, SourceQueryError> {
        &self.failures
    }

    /// Consumes the engine, returning results and failures
    pub fn into_parts(
        self,
    ) -> (
        BTreeMap<String, ComparisonResult>,
        BTreeMap<String, SourceQueryError>,
    ) {
        (self.results, self.failures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::Result;
    use crate::version_diff::domain::{Build, BuildId, DistTagPattern};
    use std::cell::Cell;

    struct StaticTracker {
        builds: Vec<Build>,
        failing_package: Option<&'static str>,
        calls: Cell<usize>,
    }

    impl StaticTracker {
        fn new(builds: &[(&str, &str, &str)]) -> Self {
            Self {
                builds: builds
                    .iter()
                    .enumerate()
                    .map(|(i, (n, v, r))| {
                        Build::new(n.to_string(), v.to_string(), r.to_string(), BuildId::new(i as i64))
                            .unwrap()
                    })
                    .collect(),
                failing_package: None,
                calls: Cell::new(0),
            }
        }

        fn failing_for(mut self, package: &'static str) -> Self {
            self.failing_package = Some(package);
            self
        }
    }

    impl BuildTracker for StaticTracker {
        fn list_latest_tagged(&self, _tag: &str, package: Option<&str>) -> Result<Vec<Build>> {
            self.calls.set(self.calls.get() + 1);
            if package.is_some() && package == self.failing_package {
                anyhow::bail!("service unavailable");
            }
            Ok(self
                .builds
                .iter()
                .filter(|b| package.map_or(true, |p| b.name() == p))
                .cloned()
                .collect())
        }
    }

    fn branch_policy() -> KeyPolicy {
        KeyPolicy::new(DistTagPattern::new(&["branchA", "branchB"]).unwrap(), true)
    }

    #[test]
    fn test_missing_in_source2_is_none() {
        let universe: PackageUniverse = ["foo"].into_iter().collect();
        let s1 = BuildSource::new("a", "branchA", StaticTracker::new(&[("foo", "1.2", "3.branchA")]));
        let s2 = BuildSource::new("b", "branchB", StaticTracker::new(&[]));
        let mut engine = ComparisonEngine::new(&universe, &s1, &s2, branch_policy());

        let result = engine.compare_one("foo").unwrap();
        assert_eq!(result.status, ComparisonStatus::None);
        assert_eq!(result.nvr1.as_deref(), Some("foo-1.2-3.branchA"));
        assert_eq!(result.nvr2, None);
    }

    #[test]
    fn test_missing_in_source1_is_error() {
        let universe: PackageUniverse = ["bar"].into_iter().collect();
        let s1 = BuildSource::new("a", "branchA", StaticTracker::new(&[]));
        let s2 = BuildSource::new("b", "branchB", StaticTracker::new(&[("bar", "0.9", "1.branchB")]));
        let mut engine = ComparisonEngine::new(&universe, &s1, &s2, branch_policy());

        let result = engine.compare_one("bar").unwrap();
        assert_eq!(result.status, ComparisonStatus::Error);
        assert_eq!(result.nvr1, None);
        assert_eq!(result.nvr2, None);
    }

    #[test]
    fn test_same_old_new() {
        let universe: PackageUniverse = ["same", "old", "new"].into_iter().collect();
        let s1 = BuildSource::new(
            "a",
            "branchA",
            StaticTracker::new(&[
                ("same", "1.0", "1.branchA"),
                ("old", "1.0rc1", "1.branchA"),
                ("new", "1.0", "2.branchA"),
            ]),
        );
        let s2 = BuildSource::new(
            "b",
            "branchB",
            StaticTracker::new(&[
                ("same", "1.0", "1.branchB"),
                ("old", "1.0", "1.branchB"),
                ("new", "1.0", "10.branchB"),
            ]),
        );
        let mut engine = ComparisonEngine::new(&universe, &s1, &s2, branch_policy());
        let results = engine.compare_all().clone();

        assert_eq!(results["same"].status, ComparisonStatus::Same);
        assert_eq!(results["old"].status, ComparisonStatus::Old);
        assert_eq!(results["new"].status, ComparisonStatus::New);
        assert_eq!(results["old"].nvr2.as_deref(), Some("old-1.0-1.branchB"));
    }

    #[test]
    fn test_compare_one_is_memoized() {
        let universe: PackageUniverse = ["foo"].into_iter().collect();
        let s1 = BuildSource::new("a", "branchA", StaticTracker::new(&[("foo", "1", "1.branchA")]))
            .with_negative_caching(false);
        let s2 = BuildSource::new("b", "branchB", StaticTracker::new(&[]))
            .with_negative_caching(false);
        let mut engine = ComparisonEngine::new(&universe, &s1, &s2, branch_policy());

        engine.compare_one("foo").unwrap();
        engine.compare_one("foo").unwrap();
        assert_eq!(s2.tracker().calls.get(), 1);
    }

    #[test]
    fn test_compare_all_is_idempotent() {
        let universe: PackageUniverse = ["a", "b"].into_iter().collect();
        let s1 = BuildSource::new(
            "x",
            "branchA",
            StaticTracker::new(&[("a", "1", "1.branchA"), ("b", "2", "1.branchA")]),
        );
        let s2 = BuildSource::new("y", "branchB", StaticTracker::new(&[("a", "1", "1.branchB")]));
        let mut engine = ComparisonEngine::new(&universe, &s1, &s2, branch_policy());

        let first = engine.compare_all().clone();
        let second = engine.compare_all().clone();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_failure_does_not_block_other_packages() {
        let universe: PackageUniverse = ["broken", "fine"].into_iter().collect();
        let s1 = BuildSource::new(
            "x",
            "branchA",
            StaticTracker::new(&[("broken", "1", "1.branchA"), ("fine", "1", "1.branchA")]),
        );
        let s2 = BuildSource::new(
            "y",
            "branchB",
            StaticTracker::new(&[("fine", "1", "1.branchB")]).failing_for("broken"),
        );
        let mut engine = ComparisonEngine::new(&universe, &s1, &s2, branch_policy());

        let results = engine.compare_all().clone();
        assert_eq!(results.len(), 1);
        assert_eq!(results["fine"].status, ComparisonStatus::Same);
        assert!(engine.failures().contains_key("broken"));
        assert_eq!(engine.count().total(), 1);
    }

    #[test]
    fn test_package_outside_universe_still_compared() {
        let universe = PackageUniverse::new();
        let s1 = BuildSource::new("x", "branchA", StaticTracker::new(&[("adhoc", "1", "1.branchA")]));
        let s2 = BuildSource::new("y", "branchB", StaticTracker::new(&[("adhoc", "1", "1.branchB")]));
        let mut engine = ComparisonEngine::new(&universe, &s1, &s2, branch_policy());

        let result = engine.compare_one("adhoc").unwrap();
        assert_eq!(result.status, ComparisonStatus::Same);
        assert_eq!(engine.results().len(), 1);
    }

    #[test]
    fn test_count_reflects_partial_results() {
        let universe: PackageUniverse = ["a", "b", "c"].into_iter().collect();
        let s1 = BuildSource::new(
            "x",
            "branchA",
            StaticTracker::new(&[("a", "1", "1.branchA"), ("b", "1", "1.branchA")]),
        );
        let s2 = BuildSource::new("y", "branchB", StaticTracker::new(&[("a", "1", "1.branchB")]));
        let mut engine = ComparisonEngine::new(&universe, &s1, &s2, branch_policy());

        assert_eq!(engine.count().total(), 0);
        engine.compare_one("a").unwrap();
        engine.compare_one("b").unwrap();
        let counts = engine.count();
        assert_eq!(counts.get(ComparisonStatus::Same), 1);
        assert_eq!(counts.get(ComparisonStatus::None), 1);
        assert_eq!(counts.total(), 2);
    }

    #[test]
    fn test_progress_callback() {
        let universe: PackageUniverse = ["a", "b"].into_iter().collect();
        let s1 = BuildSource::new("x", "branchA", StaticTracker::new(&[]));
        let s2 = BuildSource::new("y", "branchB", StaticTracker::new(&[]));
        let mut engine = ComparisonEngine::new(&universe, &s1, &s2, branch_policy());

        let mut seen = Vec::new();
        engine.compare_all_with(|current, total, package| {
            seen.push((current, total, package.to_string()))
        });
        assert_eq!(seen, vec![(1, 2, "a".to_string()), (2, 2, "b".to_string())]);
    }
}
