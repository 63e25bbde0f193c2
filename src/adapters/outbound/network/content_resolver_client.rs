use crate::ports::outbound::PackageListSource;
use crate::shared::security::{validate_size, MAX_RESPONSE_SIZE};
use crate::shared::Result;
use crate::version_diff::domain::PackageOrigin;
use std::time::Duration;

/// ContentResolverClient adapter for published package-name lists
///
/// Each list is a plain-text file with one package name per line, at
/// `{base_url}/view-{origin}-package-name-list--view-{view}--{arch}.txt`.
pub struct ContentResolverClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl ContentResolverClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(format!("distro-diff/{}", version))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Validates a URL path component
    fn validate_url_component(component: &str, component_type: &str) -> Result<()> {
        if component.is_empty() {
            anyhow::bail!("{} must not be empty", component_type);
        }
        if component.contains('/') || component.contains('\\') || component.contains("..") {
            anyhow::bail!(
                "Security: {} contains path characters which are not allowed",
                component_type
            );
        }
        Ok(())
    }

    pub fn list_url(&self, view: &str, arch: &str, origin: PackageOrigin) -> Result<String> {
        Self::validate_url_component(view, "View")?;
        Self::validate_url_component(arch, "Architecture")?;

        Ok(format!(
            "{}/view-{}-package-name-list--view-{}--{}.txt",
            self.base_url,
            origin.as_str(),
            urlencoding::encode(view),
            urlencoding::encode(arch)
        ))
    }
}

impl PackageListSource for ContentResolverClient {
    fn fetch_package_list(
        &self,
        view: &str,
        arch: &str,
        origin: PackageOrigin,
    ) -> Result<Vec<String>> {
        let url = self.list_url(view, arch, origin)?;
        tracing::debug!("Downloading {}", url);

        let response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            anyhow::bail!("{} returned status code {}", url, response.status());
        }
        if let Some(length) = response.content_length() {
            validate_size(length, "Package list", MAX_RESPONSE_SIZE)?;
        }

        let body = response.text()?;
        Ok(body
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn location(&self) -> String {
        self.base_url.clone()
    }
}
