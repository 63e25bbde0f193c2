use crate::shared::Result;
use serde::Serialize;

/// Maximum length for package names (security limit)
const MAX_PACKAGE_NAME_LENGTH: usize = 255;

/// Opaque identifier of a build in the backing build system.
///
/// Only ever echoed back to whoever triggers rebuilds, never interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BuildId(i64);

impl BuildId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for BuildId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validates a package name coming from a build system or a package list
pub fn validate_package_name(name: &str) -> Result<()> {
    if name.is_empty() {
        anyhow::bail!("Package name cannot be empty");
    }

    if name.len() > MAX_PACKAGE_NAME_LENGTH {
        anyhow::bail!(
            "Package name is too long ({} bytes). Maximum allowed: {} bytes",
            name.len(),
            MAX_PACKAGE_NAME_LENGTH
        );
    }

    // RPM package names: alphanumerics plus a handful of punctuation ('+' as in gtk+, libstdc++)
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '+'))
    {
        anyhow::bail!(
            "Package name '{}' contains invalid characters. Only alphanumeric, hyphens, underscores, dots, and plus signs are allowed.",
            name
        );
    }

    Ok(())
}

/// One package build as known to a build source.
///
/// Immutable once constructed; sources hand out clones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Build {
    name: String,
    epoch: Option<i64>,
    version: String,
    release: String,
    nvr: String,
    build_id: BuildId,
}

impl Build {
    /// Creates a build, deriving the NVR as `name-version-release`
    pub fn new(name: String, version: String, release: String, build_id: BuildId) -> Result<Self> {
        validate_package_name(&name)?;
        if version.is_empty() {
            anyhow::bail!("Build of '{}' has an empty version", name);
        }
        if release.is_empty() {
            anyhow::bail!("Build of '{}' has an empty release", name);
        }

        let nvr = format!("{}-{}-{}", name, version, release);
        Ok(Self {
            name,
            epoch: None,
            version,
            release,
            nvr,
            build_id,
        })
    }

    pub fn with_epoch(mut self, epoch: Option<i64>) -> Self {
        self.epoch = epoch;
        self
    }

    /// Overrides the derived NVR with the one reported by the build system
    pub fn with_nvr(mut self, nvr: String) -> Self {
        if !nvr.is_empty() {
            self.nvr = nvr;
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn epoch(&self) -> Option<i64> {
        self.epoch
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn release(&self) -> &str {
        &self.release
    }

    pub fn nvr(&self) -> &str {
        &self.nvr
    }

    pub fn build_id(&self) -> BuildId {
        self.build_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_new_derives_nvr() {
        let build = Build::new(
            "bash".to_string(),
            "5.2.26".to_string(),
            "3.fc40".to_string(),
            BuildId::new(2401234),
        )
        .unwrap();
        assert_eq!(build.name(), "bash");
        assert_eq!(build.nvr(), "bash-5.2.26-3.fc40");
        assert_eq!(build.build_id().value(), 2401234);
        assert_eq!(build.epoch(), None);
    }

    #[test]
    fn test_build_with_epoch_and_nvr() {
        let build = Build::new(
            "perl-Foo".to_string(),
            "1.0".to_string(),
            "1.eln136".to_string(),
            BuildId::new(7),
        )
        .unwrap()
        .with_epoch(Some(4))
        .with_nvr("perl-Foo-1.0-1.eln136".to_string());
        assert_eq!(build.epoch(), Some(4));
        assert_eq!(build.nvr(), "perl-Foo-1.0-1.eln136");
    }

    #[test]
    fn test_build_empty_nvr_keeps_derived() {
        let build = Build::new(
            "foo".to_string(),
            "1".to_string(),
            "1".to_string(),
            BuildId::new(1),
        )
        .unwrap()
        .with_nvr(String::new());
        assert_eq!(build.nvr(), "foo-1-1");
    }

    #[test]
    fn test_build_rejects_empty_name() {
        let result = Build::new(String::new(), "1".to_string(), "1".to_string(), BuildId::new(1));
        assert!(result.is_err());
    }

    #[test]
    fn test_build_rejects_empty_version() {
        let result = Build::new("foo".to_string(), String::new(), "1".to_string(), BuildId::new(1));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_package_name_accepts_plus() {
        assert!(validate_package_name("libstdc++").is_ok());
        assert!(validate_package_name("gtk+").is_ok());
    }

    #[test]
    fn test_validate_package_name_rejects_slash() {
        let result = validate_package_name("../etc/passwd");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("invalid characters"));
    }

    #[test]
    fn test_build_id_display() {
        assert_eq!(BuildId::new(42).to_string(), "42");
    }
}
