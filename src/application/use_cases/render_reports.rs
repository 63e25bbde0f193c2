use super::RebuildPlan;
use crate::application::dto::OutputFormat;
use crate::application::factories::FormatterFactory;
use crate::application::read_models::ReportModel;
use crate::ports::outbound::{ArtifactSink, ProgressReporter};
use crate::shared::error::DiffError;
use std::path::PathBuf;

/// Artifacts written and artifacts that failed during one render pass
#[derive(Debug, Default)]
pub struct RenderSummary {
    pub written: Vec<PathBuf>,
    /// `(artifact name, error message)`
    pub failed: Vec<(String, String)>,
}

impl RenderSummary {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// RenderReportsUseCase - renders the report model into artifacts
///
/// Every format is rendered and written independently: a failure is
/// recorded in the summary and the remaining artifacts are still produced.
pub struct RenderReportsUseCase<S, PR> {
    sink: S,
    progress_reporter: PR,
}

impl<S: ArtifactSink, PR: ProgressReporter> RenderReportsUseCase<S, PR> {
    pub fn new(sink: S, progress_reporter: PR) -> Self {
        Self {
            sink,
            progress_reporter,
        }
    }

    /// Renders the selected formats, the success rate and, when given,
    /// the rebuild plan lists
    pub fn execute(
        &self,
        model: &ReportModel,
        formats: &[OutputFormat],
        plan: Option<&RebuildPlan>,
    ) -> RenderSummary {
        let mut summary = RenderSummary::default();

        for format in formats {
            self.progress_reporter
                .report_phase(FormatterFactory::progress_message(*format));
            let name = format.artifact_name();
            let rendered = FormatterFactory::create(*format)
                .format(model)
                .map_err(|e| DiffError::Render {
                    format: format.to_string(),
                    details: format!("{:#}", e),
                });
            match rendered {
                Ok(content) => self.write(&mut summary, name, &content),
                Err(e) => {
                    tracing::error!("{}", e);
                    summary.failed.push((name.to_string(), e.to_string()));
                }
            }
        }

        self.write(
            &mut summary,
            "successrate.txt",
            &format!("{}\n", model.summary.success_rate),
        );

        if let Some(plan) = plan {
            let rebuild: Vec<String> = plan.rebuild.iter().map(ToString::to_string).collect();
            self.write(&mut summary, "rebuild.txt", &Self::lines(&rebuild));
            match &plan.untag {
                Some(untag) => self.write(&mut summary, "untag.txt", &Self::lines(untag)),
                None => {
                    tracing::error!("Not writing untag.txt: the audited tag could not be listed");
                    summary
                        .failed
                        .push(("untag.txt".to_string(), "untag list unavailable".to_string()));
                }
            }
            self.write(&mut summary, "buildable.txt", &Self::lines(&plan.buildable));
        }

        summary
    }

    fn lines(items: &[String]) -> String {
        items.iter().map(|item| format!("{}\n", item)).collect()
    }

    fn write(&self, summary: &mut RenderSummary, name: &str, content: &str) {
        match self.sink.write_artifact(name, content) {
            Ok(path) => {
                tracing::info!("Wrote {}", path.display());
                summary.written.push(path);
            }
            Err(e) => {
                tracing::error!("Could not write {}: {:#}", name, e);
                summary.failed.push((name.to_string(), format!("{:#}", e)));
            }
        }
    }
}
