use distro_diff::prelude::*;
use std::collections::HashMap;

/// Mock PackageListSource keyed by architecture
#[derive(Default)]
pub struct MockPackageListSource {
    pub lists: HashMap<String, Vec<String>>,
}

impl MockPackageListSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list(mut self, arch: &str, packages: &[&str]) -> Self {
        self.lists.insert(
            arch.to_string(),
            packages.iter().map(|p| p.to_string()).collect(),
        );
        self
    }
}

impl PackageListSource for MockPackageListSource {
    fn fetch_package_list(&self, view: &str, arch: &str, _origin: PackageOrigin) -> Result<Vec<String>> {
        self.lists
            .get(arch)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("No list for {}/{}", view, arch))
    }

    fn location(&self) -> String {
        "mock://content".to_string()
    }
}
