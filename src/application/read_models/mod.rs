//! Read models for report rendering
//!
//! This module contains view-optimized structs that provide a
//! denormalized representation of a finished comparison run.

pub mod report_model;
pub mod report_model_builder;

pub use report_model::{
    FailureView, PackageStatusView, ReportMetadataView, ReportModel, SourceView, StatusShareView,
    SummaryView,
};
pub use report_model_builder::ReportModelBuilder;
