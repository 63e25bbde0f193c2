mod cli;

use cli::Args;
use distro_diff::adapters::outbound::console::StderrProgressReporter;
use distro_diff::adapters::outbound::filesystem::FileSystemArtifactWriter;
use distro_diff::adapters::outbound::network::{ContentResolverClient, KojiClient};
use distro_diff::application::dto::CompareRequest;
use distro_diff::application::read_models::{ReportModelBuilder, SourceView};
use distro_diff::application::use_cases::{
    CompareSourcesUseCase, PlanRebuildsUseCase, RenderReportsUseCase,
};
use distro_diff::config::{self, Settings, SourceSettings};
use distro_diff::shared::error::{DiffError, ExitCode};
use distro_diff::shared::Result;
use distro_diff::version_diff::services::{BuildSource, UniverseCollector};
use std::path::Path;
use std::process;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    let args = match Args::try_parse_args() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            process::exit(code.as_i32());
        }
    };

    init_logging(args.verbose);

    let code = match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }
            eprintln!();

            match e.downcast_ref::<DiffError>() {
                Some(DiffError::UnknownSource { .. }) => ExitCode::InvalidArguments,
                _ => ExitCode::ApplicationError,
            }
        }
    };

    process::exit(code.as_i32());
}

fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let config = match path {
        Some(path) => Some(config::load_config_from_path(path)?),
        None => config::discover_config(Path::new("."))?,
    };
    Settings::resolve(config)
}

fn open_source(
    name: &str,
    source: &SourceSettings,
    settings: &Settings,
) -> Result<BuildSource<KojiClient>> {
    let client = KojiClient::new(
        &source.hub_url,
        settings.network.timeout,
        settings.network.max_retries,
    )?;
    let tag = if source.resolve_inheritance {
        client.resolve_inherited_tag(&source.tag)?
    } else {
        source.tag.clone()
    };
    tracing::debug!(hub = %source.hub_url, "Source {} uses tag {}", name, tag);

    Ok(BuildSource::new(name, tag, client)
        .with_negative_caching(settings.comparison.cache_negative_lookups))
}

fn run(args: Args) -> Result<ExitCode> {
    let settings = load_settings(args.config.as_deref())?;

    // Resolve both names before touching the network
    let source1_settings = settings.source(&args.source1)?;
    let source2_settings = settings.source(&args.source2)?;

    // Create adapters (Dependency Injection)
    let source1 = open_source(&args.source1, source1_settings, &settings)?;
    let source2 = open_source(&args.source2, source2_settings, &settings)?;
    let content = ContentResolverClient::new(&settings.content.base_url, settings.network.timeout)?;
    let collector = UniverseCollector::new(
        content,
        settings.content.view.clone(),
        settings.content.arches.clone(),
        settings.content.origins.clone(),
    );

    let source1_view = SourceView::new(source1.name(), source1.tag());
    let source2_view = SourceView::new(source2.name(), source2.tag());

    let use_case = CompareSourcesUseCase::new(
        source1,
        source2,
        collector,
        StderrProgressReporter::new(),
        settings.comparison.key_policy.clone(),
    );

    let mut request = CompareRequest::new(args.packages, args.cache, args.format);
    if args.no_plan {
        request = request.without_plan();
    }

    let outcome = use_case.execute(&request)?;
    let mut partial = outcome.is_partial();
    for (package, error) in &outcome.failures {
        tracing::error!("Could not classify {}: {}", package, error);
    }

    let plan = if request.plan_rebuilds {
        match PlanRebuildsUseCase::new(&settings.policy).execute(
            &outcome,
            use_case.source1(),
            use_case.source2(),
        ) {
            Ok(plan) => Some(plan),
            Err(e) => {
                tracing::error!("Rebuild planning failed: {:#}", e);
                partial = true;
                None
            }
        }
    } else {
        None
    };

    let model = ReportModelBuilder::new(source1_view, source2_view)
        .build(&outcome.results, &outcome.failures);

    let renderer = RenderReportsUseCase::new(
        FileSystemArtifactWriter::new(&args.output),
        StderrProgressReporter::new(),
    );
    let summary = renderer.execute(&model, &request.formats, plan.as_ref());
    if !summary.is_complete() {
        partial = true;
    }

    tracing::info!(
        written = summary.written.len(),
        failed = summary.failed.len(),
        "{} | success rate {}",
        outcome.counts,
        model.summary.success_rate
    );

    Ok(if partial {
        ExitCode::PartialFailure
    } else {
        ExitCode::Success
    })
}
