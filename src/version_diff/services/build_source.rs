use crate::ports::outbound::BuildTracker;
use crate::shared::error::SourceQueryError;
use crate::version_diff::domain::Build;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// BuildSource - a tag in a backing build system plus a per-run cache
///
/// Answers "what is the latest build of package P tagged here?". Each
/// answer is cached for the lifetime of the value: entries are written
/// once and never invalidated, so at most one backing query is issued per
/// package. Negative answers are cached as well unless disabled with
/// [`BuildSource::with_negative_caching`].
///
/// The cache uses interior mutability; the type is meant for the
/// single-threaded run loop and is deliberately not `Sync`.
pub struct BuildSource<T: BuildTracker> {
    name: String,
    tag: String,
    tracker: T,
    cache: RefCell<HashMap<String, Option<Build>>>,
    bulk_loaded: Cell<bool>,
    cache_negative: bool,
}

impl<T: BuildTracker> BuildSource<T> {
    /// Creates a build source
    ///
    /// # Arguments
    /// * `name` - Identity of the source in reports (e.g., "rawhide")
    /// * `tag` - Tag queried in the backing build system (e.g., "f42")
    /// * `tracker` - Query interface of the backing build system
    pub fn new(name: impl Into<String>, tag: impl Into<String>, tracker: T) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
            tracker,
            cache: RefCell::new(HashMap::new()),
            bulk_loaded: Cell::new(false),
            cache_negative: true,
        }
    }

    pub fn with_negative_caching(mut self, enabled: bool) -> Self {
        self.cache_negative = enabled;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    /// Whether `make_cache` has populated the cache with the whole tag
    pub fn is_bulk_loaded(&self) -> bool {
        self.bulk_loaded.get()
    }

    /// Returns the latest build of `package` tagged here
    ///
    /// # Returns
    /// `Ok(None)` when the tag has no build of the package
    ///
    /// # Errors
    /// Returns `SourceQueryError` when the backing system could not be
    /// queried. Failures are not cached.
    pub fn get_build(&self, package: &str) -> Result<Option<Build>, SourceQueryError> {
        if let Some(cached) = self.cache.borrow().get(package) {
            tracing::debug!(package, source = %self, "Read cached build");
            return Ok(cached.clone());
        }

        // A bulk listing covers every package in the tag
        if self.bulk_loaded.get() && self.cache_negative {
            tracing::debug!(package, source = %self, "Not present in bulk listing");
            return Ok(None);
        }

        let builds = self
            .tracker
            .list_latest_tagged(&self.tag, Some(package))
            .map_err(|e| SourceQueryError {
                tag: self.tag.clone(),
                package: Some(package.to_string()),
                details: format!("{:#}", e),
            })?;

        let build = builds.into_iter().next();
        if build.is_some() || self.cache_negative {
            self.cache
                .borrow_mut()
                .insert(package.to_string(), build.clone());
        }

        Ok(build)
    }

    /// Fetches every latest-tagged build of the tag in a single query
    ///
    /// Existing cache entries are kept as they are.
    ///
    /// # Returns
    /// Number of builds returned by the backing system
    pub fn make_cache(&self) -> Result<usize, SourceQueryError> {
        tracing::debug!(source = %self, "Making cache");

        let builds = self
            .tracker
            .list_latest_tagged(&self.tag, None)
            .map_err(|e| SourceQueryError {
                tag: self.tag.clone(),
                package: None,
                details: format!("{:#}", e),
            })?;

        let count = builds.len();
        let mut cache = self.cache.borrow_mut();
        for build in builds {
            cache
                .entry(build.name().to_string())
                .or_insert(Some(build));
        }
        self.bulk_loaded.set(true);

        tracing::debug!(source = %self, builds = count, "Done making cache");
        Ok(count)
    }

    /// Names of all packages with a build in this tag, sorted
    ///
    /// Bulk-loads the tag first if that has not happened yet.
    pub fn tagged_packages(&self) -> Result<Vec<String>, SourceQueryError> {
        if !self.bulk_loaded.get() {
            self.make_cache()?;
        }

        let mut names: Vec<String> = self
            .cache
            .borrow()
            .iter()
            .filter(|(_, build)| build.is_some())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        Ok(names)
    }
}

impl<T: BuildTracker> std::fmt::Display for BuildSource<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::Result;
    use crate::version_diff::domain::BuildId;

    /// Tracker double that counts queries and can be told to fail
    struct CountingTracker {
        builds: Vec<Build>,
        fail: bool,
        calls: Cell<usize>,
    }

    impl CountingTracker {
        fn new(builds: Vec<Build>) -> Self {
            Self {
                builds,
                fail: false,
                calls: Cell::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                builds: vec![],
                fail: true,
                calls: Cell::new(0),
            }
        }
    }

    impl BuildTracker for CountingTracker {
        fn list_latest_tagged(&self, _tag: &str, package: Option<&str>) -> Result<Vec<Build>> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                anyhow::bail!("hub unreachable");
            }
            Ok(self
                .builds
                .iter()
                .filter(|b| package.map_or(true, |p| b.name() == p))
                .cloned()
                .collect())
        }
    }

    fn build(name: &str, version: &str, release: &str) -> Build {
        Build::new(
            name.to_string(),
            version.to_string(),
            release.to_string(),
            BuildId::new(1),
        )
        .unwrap()
    }

    #[test]
    fn test_get_build_caches_positive_result() {
        let source = BuildSource::new(
            "eln",
            "eln",
            CountingTracker::new(vec![build("bash", "5.2", "1.eln136")]),
        );

        let first = source.get_build("bash").unwrap();
        let second = source.get_build("bash").unwrap();

        assert_eq!(first.unwrap().nvr(), "bash-5.2-1.eln136");
        assert_eq!(second.unwrap().nvr(), "bash-5.2-1.eln136");
        assert_eq!(source.tracker().calls.get(), 1);
    }

    #[test]
    fn test_get_build_caches_negative_result() {
        let source = BuildSource::new("eln", "eln", CountingTracker::new(vec![]));

        assert!(source.get_build("missing").unwrap().is_none());
        assert!(source.get_build("missing").unwrap().is_none());
        assert_eq!(source.tracker().calls.get(), 1);
    }

    #[test]
    fn test_negative_caching_can_be_disabled() {
        let source = BuildSource::new("eln", "eln", CountingTracker::new(vec![]))
            .with_negative_caching(false);

        assert!(source.get_build("missing").unwrap().is_none());
        assert!(source.get_build("missing").unwrap().is_none());
        assert_eq!(source.tracker().calls.get(), 2);
    }

    #[test]
    fn test_query_failure_is_an_error_not_none() {
        let source = BuildSource::new("eln", "eln", CountingTracker::failing());

        let err = source.get_build("bash").unwrap_err();
        assert_eq!(err.tag, "eln");
        assert_eq!(err.package.as_deref(), Some("bash"));
        assert!(err.details.contains("hub unreachable"));

        // Failures are not cached
        assert!(source.get_build("bash").is_err());
        assert_eq!(source.tracker().calls.get(), 2);
    }

    #[test]
    fn test_make_cache_avoids_further_queries() {
        let source = BuildSource::new(
            "rawhide",
            "f42",
            CountingTracker::new(vec![build("bash", "5.2", "1.fc42"), build("zsh", "5.9", "3.fc42")]),
        );

        assert_eq!(source.make_cache().unwrap(), 2);
        assert!(source.is_bulk_loaded());
        assert!(source.get_build("bash").unwrap().is_some());
        assert!(source.get_build("zsh").unwrap().is_some());
        assert!(source.get_build("absent").unwrap().is_none());
        assert_eq!(source.tracker().calls.get(), 1);
    }

    #[test]
    fn test_make_cache_failure() {
        let source = BuildSource::new("rawhide", "f42", CountingTracker::failing());
        let err = source.make_cache().unwrap_err();
        assert!(err.package.is_none());
        assert!(!source.is_bulk_loaded());
    }

    #[test]
    fn test_tagged_packages_bulk_loads_once() {
        let source = BuildSource::new(
            "eln",
            "eln",
            CountingTracker::new(vec![build("zsh", "5.9", "1.eln1"), build("acl", "2.3", "1.eln1")]),
        );

        assert_eq!(source.tagged_packages().unwrap(), vec!["acl", "zsh"]);
        assert_eq!(source.tagged_packages().unwrap(), vec!["acl", "zsh"]);
        assert_eq!(source.tracker().calls.get(), 1);
    }

    #[test]
    fn test_display_is_tag() {
        let source = BuildSource::new("rawhide", "f42", CountingTracker::new(vec![]));
        assert_eq!(source.to_string(), "f42");
        assert_eq!(source.name(), "rawhide");
    }
}
