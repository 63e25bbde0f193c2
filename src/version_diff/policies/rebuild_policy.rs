use crate::shared::Result;
use crate::version_diff::domain::validate_package_name;

/// Maximum number of entries (names plus prefixes) in one rule
const MAX_RULE_ENTRIES: usize = 1024;

/// A package-name rule: exact names plus name prefixes, scanned linearly
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameRule {
    names: Vec<String>,
    prefixes: Vec<String>,
}

impl NameRule {
    /// Creates a rule
    ///
    /// # Errors
    /// Returns an error if the rule has too many entries or an entry is
    /// not a valid package name.
    pub fn new(names: Vec<String>, prefixes: Vec<String>) -> Result<Self> {
        if names.len() + prefixes.len() > MAX_RULE_ENTRIES {
            anyhow::bail!(
                "Too many policy entries: {} (maximum: {})",
                names.len() + prefixes.len(),
                MAX_RULE_ENTRIES
            );
        }
        for entry in names.iter().chain(prefixes.iter()) {
            validate_package_name(entry)?;
        }
        Ok(Self { names, prefixes })
    }

    pub fn matches(&self, package: &str) -> bool {
        self.names.iter().any(|name| name == package)
            || self
                .prefixes
                .iter()
                .any(|prefix| package.starts_with(prefix.as_str()))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}

/// PolicyFilter - decides which packages automated rebuilds may touch
///
/// Two independent predicates:
/// - excluded: never rebuilt automatically, still reported
/// - on hold: still compared and reported, but not queued; differences
///   are logged at a lower severity
///
/// Neither predicate affects classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyFilter {
    exclude: NameRule,
    hold: NameRule,
}

impl PolicyFilter {
    pub fn new(exclude: NameRule, hold: NameRule) -> Self {
        Self { exclude, hold }
    }

    /// Built-in tables used when no configuration overrides them
    pub fn standard() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            exclude: NameRule {
                // kernel builds are too expensive to try automatically,
                // ipa is freeipa renamed, shim has its own build procedure
                names: owned(&["kernel", "kernel-headers", "kernel-tools", "ipa", "shim"]),
                prefixes: owned(&["shim-"]),
            },
            hold: NameRule {
                names: owned(&["freeipa"]),
                prefixes: Vec::new(),
            },
        }
    }

    pub fn is_excluded(&self, package: &str) -> bool {
        self.exclude.matches(package)
    }

    pub fn is_on_hold(&self, package: &str) -> bool {
        self.hold.matches(package)
    }

    /// Neither excluded nor on hold
    pub fn is_buildable(&self, package: &str) -> bool {
        !self.is_excluded(package) && !self.is_on_hold(package)
    }

    pub fn exclude_rule(&self) -> &NameRule {
        &self.exclude
    }

    pub fn hold_rule(&self) -> &NameRule {
        &self.hold
    }
}
