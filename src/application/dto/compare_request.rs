use super::OutputFormat;

/// CompareRequest - Internal request DTO for a comparison run
///
/// Carries everything the use cases need from the command line, already
/// resolved against the configuration.
#[derive(Debug, Clone)]
pub struct CompareRequest {
    /// Explicit package list; empty means "collect the universe"
    pub packages: Vec<String>,
    /// Bulk-load both sources before comparing
    pub eager_cache: bool,
    /// Formats to render
    pub formats: Vec<OutputFormat>,
    /// Whether to write the rebuild-planning artifacts
    pub plan_rebuilds: bool,
}

impl CompareRequest {
    pub fn new(packages: Vec<String>, eager_cache: bool, formats: Vec<OutputFormat>) -> Self {
        Self {
            packages,
            eager_cache,
            formats,
            plan_rebuilds: true,
        }
    }

    pub fn without_plan(mut self) -> Self {
        self.plan_rebuilds = false;
        self
    }
}
