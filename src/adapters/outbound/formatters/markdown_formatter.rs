use super::escape::escape_markdown_table_cell;
use crate::application::read_models::{PackageStatusView, ReportModel};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use crate::version_diff::domain::ComparisonStatus;

/// Markdown table header for the per-status summary
const SUMMARY_TABLE_HEADER: &str = "| Status | Count | Share |\n";

/// Markdown table separator line for the summary table
const SUMMARY_TABLE_SEPARATOR: &str = "|--------|-------|-------|\n";

/// Markdown table separator line for package tables
const PACKAGE_TABLE_SEPARATOR: &str = "|---------|------------|------------|\n";

/// MarkdownFormatter adapter for the human-readable report
///
/// Lists the summary first, then one section per status that needs
/// attention (OLD, NONE, ERROR, NEW). SAME packages are only counted.
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    fn section_title(status: ComparisonStatus) -> &'static str {
        match status {
            ComparisonStatus::Old => "Behind (OLD)",
            ComparisonStatus::None => "Missing (NONE)",
            ComparisonStatus::Error => "Missing From Baseline (ERROR)",
            ComparisonStatus::New => "Ahead (NEW)",
            ComparisonStatus::Same => "Up To Date (SAME)",
        }
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    fn render_header(&self, output: &mut String, model: &ReportModel) {
        output.push_str(&format!(
            "# Build Comparison: {} vs {}\n\n",
            escape_markdown_table_cell(&model.source1.name),
            escape_markdown_table_cell(&model.source2.name)
        ));
        output.push_str(&format!(
            "- Baseline: `{}` (tag `{}`)\n",
            model.source1.name, model.source1.tag
        ));
        output.push_str(&format!(
            "- Compared: `{}` (tag `{}`)\n",
            model.source2.name, model.source2.tag
        ));
        output.push_str(&format!(
            "- Generated: {}\n- Run: {}\n\n",
            model.metadata.generated_at.format("%Y-%m-%d %H:%M UTC"),
            model.metadata.run_id
        ));
    }

    fn render_summary(&self, output: &mut String, model: &ReportModel) {
        output.push_str("## Summary\n\n");
        output.push_str(SUMMARY_TABLE_HEADER);
        output.push_str(SUMMARY_TABLE_SEPARATOR);
        for share in &model.summary.percentages {
            output.push_str(&format!(
                "| {} | {} | {} |\n",
                share.status, share.count, share.percentage
            ));
        }
        output.push_str(&format!(
            "| **Total** | **{}** | |\n\n",
            model.summary.counts.total()
        ));
        output.push_str(&format!(
            "Success rate: **{}**\n\n",
            model.summary.success_rate
        ));
    }

    fn render_status_section(
        &self,
        output: &mut String,
        model: &ReportModel,
        status: ComparisonStatus,
    ) {
        let rows: Vec<&PackageStatusView> = model.packages_with(status).collect();
        if rows.is_empty() {
            return;
        }

        output.push_str(&format!("## {}\n\n", Self::section_title(status)));
        output.push_str(&format!(
            "| Package | {} | {} |\n",
            escape_markdown_table_cell(&model.source1.name),
            escape_markdown_table_cell(&model.source2.name)
        ));
        output.push_str(PACKAGE_TABLE_SEPARATOR);
        for row in rows {
            output.push_str(&format!(
                "| {} | {} | {} |\n",
                escape_markdown_table_cell(&row.name),
                escape_markdown_table_cell(row.nvr1.as_deref().unwrap_or("-")),
                escape_markdown_table_cell(row.nvr2.as_deref().unwrap_or("-"))
            ));
        }
        output.push('\n');
    }

    fn render_failures(&self, output: &mut String, model: &ReportModel) {
        if model.failures.is_empty() {
            return;
        }
        output.push_str("## Query Failures\n\n");
        output.push_str("These packages could not be classified and are not counted above.\n\n");
        for failure in &model.failures {
            output.push_str(&format!(
                "- `{}`: {}\n",
                failure.package,
                failure.message.replace('\n', " ")
            ));
        }
        output.push('\n');
    }
}

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, model: &ReportModel) -> Result<String> {
        let mut output = String::new();

        self.render_header(&mut output, model);
        self.render_summary(&mut output, model);
        for status in [
            ComparisonStatus::Old,
            ComparisonStatus::None,
            ComparisonStatus::Error,
            ComparisonStatus::New,
        ] {
            self.render_status_section(&mut output, model, status);
        }
        self.render_failures(&mut output, model);

        Ok(output)
    }
}
