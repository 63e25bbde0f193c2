use super::escape::escape_html;
use crate::application::read_models::{PackageStatusView, ReportModel};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use crate::version_diff::domain::ComparisonStatus;
use std::fmt::Write;

/// HtmlFormatter adapter for the colour-coded status page
///
/// Renders a summary table (count and share per status) followed by one
/// row per package, each row coloured by its status.
pub struct HtmlFormatter;

impl HtmlFormatter {
    pub fn new() -> Self {
        Self
    }

    fn status_color(status: ComparisonStatus) -> &'static str {
        match status {
            ComparisonStatus::Same => "#00FF00",
            ComparisonStatus::Old => "#FFFFCC",
            ComparisonStatus::New => "#CCE5FF",
            ComparisonStatus::None | ComparisonStatus::Error => "#FF0000",
        }
    }

    fn write_head(&self, out: &mut String, model: &ReportModel) -> std::fmt::Result {
        writeln!(out, "<!DOCTYPE html>")?;
        writeln!(out, "<html lang=\"en\">")?;
        writeln!(out, "<head>")?;
        writeln!(out, "<meta charset=\"utf-8\">")?;
        writeln!(
            out,
            "<title>{} vs {} build status</title>",
            escape_html(&model.source1.name),
            escape_html(&model.source2.name)
        )?;
        writeln!(
            out,
            "<style>table {{ border-collapse: collapse; }} td, th {{ border: 1px solid #999; padding: 2px 8px; }}</style>"
        )?;
        writeln!(out, "</head>")
    }

    fn write_summary(&self, out: &mut String, model: &ReportModel) -> std::fmt::Result {
        let counts = &model.summary.counts;
        writeln!(out, "<h2>Summary</h2>")?;
        writeln!(out, "<table>")?;
        writeln!(out, "<tr><th>Status</th><th>Count</th><th>Share</th></tr>")?;
        for status in ComparisonStatus::ALL {
            let count = counts.get(status);
            if count == 0 {
                continue;
            }
            writeln!(
                out,
                "<tr style=\"background-color: {}\"><td>{}</td><td>{}</td><td>{}</td></tr>",
                Self::status_color(status),
                status,
                count,
                counts.percentage(status)
            )?;
        }
        writeln!(out, "<tr><td>Total</td><td>{}</td><td></td></tr>", counts.total())?;
        writeln!(out, "</table>")
    }

    fn write_row(out: &mut String, row: &PackageStatusView) -> std::fmt::Result {
        writeln!(
            out,
            "<tr style=\"background-color: {}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            Self::status_color(row.status),
            escape_html(&row.name),
            row.status,
            escape_html(row.nvr1.as_deref().unwrap_or("NONE")),
            escape_html(row.nvr2.as_deref().unwrap_or("NONE"))
        )
    }

    fn render(&self, model: &ReportModel) -> std::result::Result<String, std::fmt::Error> {
        let mut out = String::new();
        self.write_head(&mut out, model)?;
        writeln!(out, "<body>")?;
        writeln!(
            out,
            "<h1>{} ({}) vs {} ({})</h1>",
            escape_html(&model.source1.name),
            escape_html(&model.source1.tag),
            escape_html(&model.source2.name),
            escape_html(&model.source2.tag)
        )?;
        writeln!(
            out,
            "<p>Generated {} (run {})</p>",
            model.metadata.generated_at.format("%Y-%m-%d %H:%M"),
            model.metadata.run_id
        )?;
        self.write_summary(&mut out, model)?;

        writeln!(out, "<h2>Packages</h2>")?;
        writeln!(out, "<table>")?;
        writeln!(
            out,
            "<tr><th>Package</th><th>Status</th><th>{}</th><th>{}</th></tr>",
            escape_html(&model.source1.name),
            escape_html(&model.source2.name)
        )?;
        for row in &model.packages {
            Self::write_row(&mut out, row)?;
        }
        writeln!(out, "</table>")?;

        if !model.failures.is_empty() {
            writeln!(out, "<h2>Query failures</h2>")?;
            writeln!(out, "<ul>")?;
            for failure in &model.failures {
                writeln!(
                    out,
                    "<li><b>{}</b>: {}</li>",
                    escape_html(&failure.package),
                    escape_html(&failure.message)
                )?;
            }
            writeln!(out, "</ul>")?;
        }

        writeln!(out, "</body>")?;
        writeln!(out, "</html>")?;
        Ok(out)
    }
}

impl Default for HtmlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for HtmlFormatter {
    fn format(&self, model: &ReportModel) -> Result<String> {
        self.render(model)
            .map_err(|e| anyhow::anyhow!("Failed to render HTML report: {}", e))
    }
}
