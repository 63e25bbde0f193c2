//! Configuration file support for distro-diff.
//!
//! Provides YAML-based configuration through `distro-diff.config.yml`
//! files, and resolves it over the built-in defaults into [`Settings`].

use anyhow::Context;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::time::Duration;

use crate::shared::error::DiffError;
use crate::shared::security::{validate_regular_file, validate_size, MAX_CONFIG_FILE_SIZE};
use crate::shared::Result;
use crate::version_diff::domain::{DistTagPattern, KeyPolicy, PackageOrigin, DEFAULT_DIST_MARKERS};
use crate::version_diff::policies::{NameRule, PolicyFilter};

pub const CONFIG_FILENAME: &str = "distro-diff.config.yml";

const FEDORA_KOJI_HUB: &str = "https://koji.fedoraproject.org/kojihub";
const BREW_HUB: &str = "https://brewhub.engineering.redhat.com/brewhub";
const DEFAULT_CONTENT_URL: &str = "https://tiny.distro.builders";
const DEFAULT_VIEW: &str = "eln";
const DEFAULT_ARCHES: &[&str] = &["aarch64", "armv7hl", "ppc64le", "s390x", "x86_64"];
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_RETRIES: u32 = 3;
const MAX_TIMEOUT_SECS: u64 = 3600;
const MAX_RETRIES_LIMIT: u32 = 10;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub sources: Option<BTreeMap<String, SourceEntry>>,
    pub content: Option<ContentSection>,
    pub comparison: Option<ComparisonSection>,
    pub policy: Option<PolicySection>,
    pub network: Option<NetworkSection>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// A named build source: a hub and a tag in it.
#[derive(Debug, Deserialize, Default)]
pub struct SourceEntry {
    pub hub_url: Option<String>,
    pub tag: Option<String>,
    pub resolve_inheritance: Option<bool>,
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ContentSection {
    pub base_url: Option<String>,
    pub view: Option<String>,
    pub arches: Option<Vec<String>>,
    pub origins: Option<Vec<String>>,
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ComparisonSection {
    pub ignore_epoch: Option<bool>,
    pub dist_tags: Option<Vec<String>>,
    pub cache_negative_lookups: Option<bool>,
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

#[derive(Debug, Deserialize, Default)]
pub struct PolicySection {
    pub exclude: Option<Vec<String>>,
    pub exclude_prefixes: Option<Vec<String>>,
    pub hold: Option<Vec<String>>,
    pub hold_prefixes: Option<Vec<String>>,
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

#[derive(Debug, Deserialize, Default)]
pub struct NetworkSection {
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    validate_regular_file(path, "config file").with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;
    let size = std::fs::metadata(path)?.len();
    validate_size(size, "Config file", MAX_CONFIG_FILE_SIZE)?;

    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    warn_unknown_fields(&config);
    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let warn = |section: &str, fields: &HashMap<String, serde_yaml_ng::Value>| {
        for key in fields.keys() {
            tracing::warn!("Unknown config field '{}{}' will be ignored", section, key);
        }
    };

    warn("", &config.unknown_fields);
    for (name, source) in config.sources.iter().flatten() {
        warn(&format!("sources.{}.", name), &source.unknown_fields);
    }
    if let Some(content) = &config.content {
        warn("content.", &content.unknown_fields);
    }
    if let Some(comparison) = &config.comparison {
        warn("comparison.", &comparison.unknown_fields);
    }
    if let Some(policy) = &config.policy {
        warn("policy.", &policy.unknown_fields);
    }
    if let Some(network) = &config.network {
        warn("network.", &network.unknown_fields);
    }
}

fn invalid(message: impl Into<String>) -> anyhow::Error {
    DiffError::InvalidConfig {
        message: message.into(),
    }
    .into()
}

fn validate_url(field: &str, url: &str) -> Result<()> {
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(invalid(format!(
            "{} must be an http(s) URL, got '{}'",
            field, url
        )));
    }
    Ok(())
}

/// A resolved build source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSettings {
    pub hub_url: String,
    pub tag: String,
    /// Query the tag's first inheritance parent instead of the tag itself
    pub resolve_inheritance: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSettings {
    pub base_url: String,
    pub view: String,
    pub arches: Vec<String>,
    pub origins: Vec<PackageOrigin>,
}

#[derive(Debug, Clone)]
pub struct ComparisonSettings {
    pub key_policy: KeyPolicy,
    pub cache_negative_lookups: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkSettings {
    pub timeout: Duration,
    pub max_retries: u32,
}

/// Effective settings: the configuration file resolved over the defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub sources: BTreeMap<String, SourceSettings>,
    pub content: ContentSettings,
    pub comparison: ComparisonSettings,
    pub policy: PolicyFilter,
    pub network: NetworkSettings,
}

impl Settings {
    /// Resolves an optional configuration file into settings
    ///
    /// # Errors
    /// Returns `DiffError::InvalidConfig` for values that are present but
    /// unusable (bad URLs, empty lists, malformed markers or names).
    pub fn resolve(config: Option<ConfigFile>) -> Result<Self> {
        let config = config.unwrap_or_default();

        Ok(Self {
            sources: Self::resolve_sources(config.sources)?,
            content: Self::resolve_content(config.content.unwrap_or_default())?,
            comparison: Self::resolve_comparison(config.comparison.unwrap_or_default())?,
            policy: Self::resolve_policy(config.policy)?,
            network: Self::resolve_network(config.network.unwrap_or_default())?,
        })
    }

    /// Looks up a source by name
    ///
    /// # Errors
    /// Returns `DiffError::UnknownSource` listing the configured names.
    pub fn source(&self, name: &str) -> Result<&SourceSettings> {
        self.sources.get(name).ok_or_else(|| {
            DiffError::UnknownSource {
                name: name.to_string(),
                known: self.source_names().join(", "),
            }
            .into()
        })
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.keys().map(String::as_str).collect()
    }

    fn default_sources() -> BTreeMap<String, SourceSettings> {
        let mut sources = BTreeMap::new();
        sources.insert(
            "rawhide".to_string(),
            SourceSettings {
                hub_url: FEDORA_KOJI_HUB.to_string(),
                tag: "rawhide".to_string(),
                resolve_inheritance: true,
            },
        );
        sources.insert(
            "eln".to_string(),
            SourceSettings {
                hub_url: FEDORA_KOJI_HUB.to_string(),
                tag: "eln".to_string(),
                resolve_inheritance: false,
            },
        );
        sources.insert(
            "rhel".to_string(),
            SourceSettings {
                hub_url: BREW_HUB.to_string(),
                tag: "rhel-9.0.0-alpha".to_string(),
                resolve_inheritance: false,
            },
        );
        sources
    }

    fn resolve_sources(
        entries: Option<BTreeMap<String, SourceEntry>>,
    ) -> Result<BTreeMap<String, SourceSettings>> {
        let mut sources = Self::default_sources();

        for (name, entry) in entries.into_iter().flatten() {
            if name.trim().is_empty() {
                return Err(invalid("source names must not be empty"));
            }
            let base = sources.remove(&name);
            let hub_url = entry
                .hub_url
                .or_else(|| base.as_ref().map(|b| b.hub_url.clone()))
                .unwrap_or_else(|| FEDORA_KOJI_HUB.to_string());
            validate_url(&format!("sources.{}.hub_url", name), &hub_url)?;

            let tag = entry
                .tag
                .or_else(|| base.as_ref().map(|b| b.tag.clone()))
                .unwrap_or_else(|| name.clone());
            if tag.trim().is_empty() {
                return Err(invalid(format!("sources.{}.tag must not be empty", name)));
            }

            let resolve_inheritance = entry
                .resolve_inheritance
                .or_else(|| base.as_ref().map(|b| b.resolve_inheritance))
                .unwrap_or(false);

            sources.insert(
                name,
                SourceSettings {
                    hub_url,
                    tag,
                    resolve_inheritance,
                },
            );
        }

        Ok(sources)
    }

    fn resolve_content(section: ContentSection) -> Result<ContentSettings> {
        let base_url = section
            .base_url
            .unwrap_or_else(|| DEFAULT_CONTENT_URL.to_string());
        validate_url("content.base_url", &base_url)?;

        let view = section.view.unwrap_or_else(|| DEFAULT_VIEW.to_string());
        if view.trim().is_empty() {
            return Err(invalid("content.view must not be empty"));
        }

        let arches = section
            .arches
            .unwrap_or_else(|| DEFAULT_ARCHES.iter().map(|a| a.to_string()).collect());
        if arches.is_empty() {
            return Err(invalid("content.arches must list at least one architecture"));
        }

        let origins = match section.origins {
            Some(origins) => origins
                .iter()
                .map(|o| o.parse::<PackageOrigin>().map_err(invalid))
                .collect::<Result<Vec<_>>>()?,
            None => vec![PackageOrigin::Source, PackageOrigin::BuildrootSource],
        };
        if origins.is_empty() {
            return Err(invalid("content.origins must list at least one origin"));
        }

        Ok(ContentSettings {
            base_url,
            view,
            arches,
            origins,
        })
    }

    fn resolve_comparison(section: ComparisonSection) -> Result<ComparisonSettings> {
        let dist_tag = match section.dist_tags {
            Some(markers) => DistTagPattern::new(&markers)
                .map_err(|e| invalid(format!("comparison.dist_tags: {}", e)))?,
            None => DistTagPattern::new(DEFAULT_DIST_MARKERS)?,
        };

        Ok(ComparisonSettings {
            key_policy: KeyPolicy::new(dist_tag, section.ignore_epoch.unwrap_or(true)),
            cache_negative_lookups: section.cache_negative_lookups.unwrap_or(true),
        })
    }

    fn resolve_policy(section: Option<PolicySection>) -> Result<PolicyFilter> {
        let Some(section) = section else {
            return Ok(PolicyFilter::standard());
        };

        let standard = PolicyFilter::standard();
        let rule = |names: Option<Vec<String>>,
                    prefixes: Option<Vec<String>>,
                    fallback: &NameRule,
                    field: &str|
         -> Result<NameRule> {
            NameRule::new(
                names.unwrap_or_else(|| fallback.names().to_vec()),
                prefixes.unwrap_or_else(|| fallback.prefixes().to_vec()),
            )
            .map_err(|e| invalid(format!("policy.{}: {}", field, e)))
        };

        Ok(PolicyFilter::new(
            rule(
                section.exclude,
                section.exclude_prefixes,
                standard.exclude_rule(),
                "exclude",
            )?,
            rule(section.hold, section.hold_prefixes, standard.hold_rule(), "hold")?,
        ))
    }

    fn resolve_network(section: NetworkSection) -> Result<NetworkSettings> {
        let timeout_secs = section.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 || timeout_secs > MAX_TIMEOUT_SECS {
            return Err(invalid(format!(
                "network.timeout_secs must be between 1 and {}",
                MAX_TIMEOUT_SECS
            )));
        }

        let max_retries = section.max_retries.unwrap_or(DEFAULT_MAX_RETRIES);
        if max_retries == 0 || max_retries > MAX_RETRIES_LIMIT {
            return Err(invalid(format!(
                "network.max_retries must be between 1 and {}",
                MAX_RETRIES_LIMIT
            )));
        }

        Ok(NetworkSettings {
            timeout: Duration::from_secs(timeout_secs),
            max_retries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn load(yaml: &str) -> Result<ConfigFile> {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, yaml).unwrap();
        load_config_from_path(&config_path)
    }

    #[test]
    fn test_defaults_without_config() {
        let settings = Settings::resolve(None).unwrap();

        assert_eq!(settings.source_names(), vec!["eln", "rawhide", "rhel"]);
        let rawhide = settings.source("rawhide").unwrap();
        assert!(rawhide.resolve_inheritance);
        assert_eq!(rawhide.hub_url, FEDORA_KOJI_HUB);
        assert_eq!(settings.source("rhel").unwrap().tag, "rhel-9.0.0-alpha");
        assert_eq!(settings.content.base_url, "https://tiny.distro.builders");
        assert_eq!(settings.content.arches.len(), 5);
        assert_eq!(settings.content.origins.len(), 2);
        assert!(settings.comparison.key_policy.ignore_epoch);
        assert!(settings.comparison.cache_negative_lookups);
        assert!(settings.policy.is_excluded("kernel"));
        assert!(settings.policy.is_on_hold("freeipa"));
        assert_eq!(settings.network.timeout, Duration::from_secs(60));
        assert_eq!(settings.network.max_retries, 3);
    }

    #[test]
    fn test_load_valid_config() {
        let config = load(
            r#"
sources:
  eln:
    tag: eln-build
  c10s:
    hub_url: https://kojihub.stream.centos.org/kojihub
    tag: c10s-build
content:
  arches: [x86_64]
  origins: [source]
comparison:
  ignore_epoch: false
  dist_tags: [fc, eln, el]
policy:
  exclude: [glibc]
  hold_prefixes: [rust-]
network:
  timeout_secs: 5
  max_retries: 1
"#,
        )
        .unwrap();
        let settings = Settings::resolve(Some(config)).unwrap();

        assert_eq!(settings.source("eln").unwrap().tag, "eln-build");
        assert_eq!(settings.source("eln").unwrap().hub_url, FEDORA_KOJI_HUB);
        let c10s = settings.source("c10s").unwrap();
        assert_eq!(c10s.tag, "c10s-build");
        assert!(!c10s.resolve_inheritance);
        assert!(settings.source("rawhide").is_ok());

        assert_eq!(settings.content.arches, vec!["x86_64"]);
        assert_eq!(settings.content.origins, vec![PackageOrigin::Source]);
        assert!(!settings.comparison.key_policy.ignore_epoch);
        assert_eq!(
            settings.comparison.key_policy.dist_tag.markers(),
            &["eln", "el", "fc"]
        );

        assert!(settings.policy.is_excluded("glibc"));
        assert!(!settings.policy.is_excluded("kernel"));
        // Prefix list kept from the defaults
        assert!(settings.policy.is_excluded("shim-x64"));
        assert!(settings.policy.is_on_hold("rust-serde"));
        assert!(settings.policy.is_on_hold("freeipa"));

        assert_eq!(settings.network.timeout, Duration::from_secs(5));
        assert_eq!(settings.network.max_retries, 1);
    }

    #[test]
    fn test_unknown_source() {
        let settings = Settings::resolve(None).unwrap();
        let err = settings.source("fedora").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Unknown build source: fedora"));
        assert!(msg.contains("eln, rawhide, rhel"));
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            "network:\n  max_retries: 2\n",
        )
        .unwrap();

        let config = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.network.unwrap().max_retries, Some(2));
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(discover_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config_from_path(Path::new("/nonexistent/config.yml")).unwrap_err();
        assert!(format!("{}", err).contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let err = load("invalid: yaml: [[[broken").unwrap_err();
        assert!(format!("{}", err).contains("Failed to parse config file"));
    }

    #[test]
    fn test_unknown_fields_are_collected() {
        let config = load("colour: true\nnetwork:\n  proxy: http://x\n").unwrap();
        assert!(config.unknown_fields.contains_key("colour"));
        assert!(config
            .network
            .as_ref()
            .unwrap()
            .unknown_fields
            .contains_key("proxy"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let cases = [
            "content:\n  base_url: ftp://mirror\n",
            "content:\n  arches: []\n",
            "content:\n  origins: [binary]\n",
            "comparison:\n  dist_tags: [\"fc1\"]\n",
            "policy:\n  exclude: [\"bad name\"]\n",
            "network:\n  timeout_secs: 0\n",
            "network:\n  max_retries: 50\n",
            "sources:\n  eln:\n    tag: \"\"\n",
        ];
        for yaml in cases {
            let config = load(yaml).unwrap();
            let err = Settings::resolve(Some(config)).unwrap_err();
            assert!(
                matches!(err.downcast_ref::<DiffError>(), Some(DiffError::InvalidConfig { .. })),
                "expected InvalidConfig for {:?}, got {}",
                yaml,
                err
            );
        }
    }
}
