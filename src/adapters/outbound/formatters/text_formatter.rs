use crate::application::read_models::ReportModel;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use std::collections::BTreeSet;

/// Placeholder written for an absent NVR
const MISSING_NVR: &str = "NONE";

/// TextStatusFormatter adapter for the plain-text status list
///
/// One line per package: `name status nvr1 nvr2`, whitespace-separated,
/// with `NONE` standing in for an absent NVR. Lines are sorted and
/// deduplicated.
pub struct TextStatusFormatter;

impl TextStatusFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextStatusFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for TextStatusFormatter {
    fn format(&self, model: &ReportModel) -> Result<String> {
        let lines: BTreeSet<String> = model
            .packages
            .iter()
            .map(|row| {
                format!(
                    "{} {} {} {}",
                    row.name,
                    row.status,
                    row.nvr1.as_deref().unwrap_or(MISSING_NVR),
                    row.nvr2.as_deref().unwrap_or(MISSING_NVR)
                )
            })
            .collect();

        let mut output = String::new();
        for line in lines {
            output.push_str(&line);
            output.push('\n');
        }
        Ok(output)
    }
}
