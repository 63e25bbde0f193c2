use distro_diff::prelude::*;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Mock BuildTracker serving a fixed set of builds and recording queries
#[derive(Default, Clone)]
pub struct MockBuildTracker {
    pub builds: Vec<Build>,
    pub failing_packages: HashSet<String>,
    pub fail_bulk: bool,
    /// Package argument of every query, `None` for bulk listings
    pub queries: Arc<Mutex<Vec<Option<String>>>>,
}

impl MockBuildTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_build(mut self, name: &str, version: &str, release: &str) -> Self {
        let id = self.builds.len() as i64 + 1;
        self.builds.push(
            Build::new(
                name.to_string(),
                version.to_string(),
                release.to_string(),
                BuildId::new(id),
            )
            .unwrap(),
        );
        self
    }

    pub fn with_epoch_build(mut self, name: &str, epoch: i64, version: &str, release: &str) -> Self {
        self = self.with_build(name, version, release);
        if let Some(last) = self.builds.pop() {
            self.builds.push(last.with_epoch(Some(epoch)));
        }
        self
    }

    pub fn with_failure(mut self, package: &str) -> Self {
        self.failing_packages.insert(package.to_string());
        self
    }

    pub fn with_bulk_failure(mut self) -> Self {
        self.fail_bulk = true;
        self
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    pub fn queries_for(&self, package: &str) -> usize {
        self.queries
            .lock()
            .unwrap()
            .iter()
            .filter(|q| q.as_deref() == Some(package))
            .count()
    }
}

impl BuildTracker for MockBuildTracker {
    fn list_latest_tagged(&self, _tag: &str, package: Option<&str>) -> Result<Vec<Build>> {
        self.queries
            .lock()
            .unwrap()
            .push(package.map(str::to_string));

        match package {
            Some(name) if self.failing_packages.contains(name) => {
                anyhow::bail!("Mock build tracker failure for {}", name)
            }
            None if self.fail_bulk => anyhow::bail!("Mock bulk listing failure"),
            _ => Ok(self
                .builds
                .iter()
                .filter(|b| package.map_or(true, |p| b.name() == p))
                .cloned()
                .collect()),
        }
    }
}
