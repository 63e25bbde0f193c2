//! distro-diff - build comparison tool for distribution branches
//!
//! This library compares the latest tagged builds of two build sources
//! (for example Fedora Rawhide and ELN), classifies every package of a
//! declared universe and renders the results into reports, following
//! hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`version_diff`): Build identities, rpm version ordering and classification
//! - **Application Layer** (`application`): Use cases, request DTOs and report read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Koji, content resolver, filesystem and console implementations
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use distro_diff::prelude::*;
//! use std::time::Duration;
//!
//! # fn main() -> Result<()> {
//! // Create adapters
//! let hub = "https://koji.fedoraproject.org/kojihub";
//! let rawhide = BuildSource::new("rawhide", "f42", KojiClient::new(hub, Duration::from_secs(60), 3)?);
//! let eln = BuildSource::new("eln", "eln", KojiClient::new(hub, Duration::from_secs(60), 3)?);
//! let collector = UniverseCollector::new(
//!     ContentResolverClient::new("https://tiny.distro.builders", Duration::from_secs(60))?,
//!     "eln",
//!     vec!["x86_64".to_string()],
//!     vec![PackageOrigin::Source],
//! );
//!
//! // Create use case
//! let use_case = CompareSourcesUseCase::new(
//!     rawhide,
//!     eln,
//!     collector,
//!     StderrProgressReporter::new(),
//!     KeyPolicy::default(),
//! );
//!
//! // Execute
//! let request = CompareRequest::new(vec!["bash".to_string()], false, vec![OutputFormat::Txt]);
//! let outcome = use_case.execute(&request)?;
//! println!("{}", outcome.counts);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod shared;
pub mod version_diff;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::FileSystemArtifactWriter;
    pub use crate::adapters::outbound::formatters::{
        HtmlFormatter, JsonFormatter, MarkdownFormatter, TextStatusFormatter,
    };
    pub use crate::adapters::outbound::network::{ContentResolverClient, KojiClient};
    pub use crate::application::dto::{CompareRequest, OutputFormat};
    pub use crate::application::read_models::{ReportModel, ReportModelBuilder, SourceView};
    pub use crate::application::use_cases::{
        CompareSourcesUseCase, ComparisonOutcome, PlanRebuildsUseCase, RebuildPlan,
        RenderReportsUseCase, RenderSummary,
    };
    pub use crate::ports::outbound::{
        ArtifactSink, BuildTracker, PackageListSource, ProgressReporter, ReportFormatter,
    };
    pub use crate::shared::error::{DiffError, ExitCode, SourceQueryError};
    pub use crate::shared::Result;
    pub use crate::version_diff::domain::{
        Build, BuildId, ComparisonResult, ComparisonStatus, DistTagPattern, KeyPolicy,
        PackageOrigin, PackageUniverse, StatusCounts, VersionKey,
    };
    pub use crate::version_diff::policies::{NameRule, PolicyFilter};
    pub use crate::version_diff::services::{
        BuildSource, ComparisonEngine, UniverseCollector, VersionComparator,
    };
}
