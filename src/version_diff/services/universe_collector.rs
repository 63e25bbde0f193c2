use crate::ports::outbound::PackageListSource;
use crate::shared::error::DiffError;
use crate::shared::Result;
use crate::version_diff::domain::{PackageOrigin, PackageUniverse};
use std::collections::BTreeSet;

/// UniverseCollector - merges per-architecture package lists into one universe
///
/// Every (architecture, origin) list is fetched independently; a failed
/// fetch is logged and skipped so the remaining lists still contribute.
pub struct UniverseCollector<S: PackageListSource> {
    source: S,
    view: String,
    arches: Vec<String>,
    origins: Vec<PackageOrigin>,
}

impl<S: PackageListSource> UniverseCollector<S> {
    pub fn new(
        source: S,
        view: impl Into<String>,
        arches: Vec<String>,
        origins: Vec<PackageOrigin>,
    ) -> Self {
        Self {
            source,
            view: view.into(),
            arches,
            origins,
        }
    }

    /// Fetches and merges all lists into a sorted, deduplicated universe
    ///
    /// # Errors
    /// Returns `DiffError::EmptyUniverse` only if every single fetch failed.
    /// Lists that were fetched but happen to be empty are not failures.
    pub fn collect(&self) -> Result<PackageUniverse> {
        let mut names = BTreeSet::new();
        let mut fetched = 0usize;

        for arch in &self.arches {
            for origin in &self.origins {
                match self.source.fetch_package_list(&self.view, arch, *origin) {
                    Ok(list) => {
                        tracing::debug!(
                            arch = arch.as_str(),
                            origin = origin.as_str(),
                            packages = list.len(),
                            "Fetched package list"
                        );
                        fetched += 1;
                        names.extend(list);
                    }
                    Err(e) => {
                        tracing::warn!(
                            "Could not fetch {} package list for {}: {:#}",
                            origin,
                            arch,
                            e
                        );
                    }
                }
            }
        }

        if fetched == 0 {
            return Err(DiffError::EmptyUniverse {
                base_url: self.source.location(),
            }
            .into());
        }

        tracing::info!(packages = names.len(), "Collected package universe");
        Ok(names.into_iter().collect())
    }
}
