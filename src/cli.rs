use clap::Parser;
use std::path::PathBuf;

use distro_diff::application::dto::OutputFormat;

fn parse_formats(value: &str) -> Result<Vec<OutputFormat>, String> {
    OutputFormat::parse_selection(value)
}

/// Compare the latest tagged builds of two distribution branches
#[derive(Parser, Debug)]
#[command(name = "distro-diff")]
#[command(version)]
#[command(
    about = "Compare the latest tagged builds of two distribution branches",
    long_about = "Compare the latest tagged builds of two distribution branches.\n\n\
                  Every package is classified as SAME, OLD, NEW, NONE or ERROR, and the \
                  results are written as JSON, HTML, plain-text and Markdown reports \
                  together with rebuild-planning lists."
)]
pub struct Args {
    /// Baseline source name (e.g. rawhide)
    pub source1: String,

    /// Audited source name (e.g. eln)
    pub source2: String,

    /// Packages to compare (defaults to the full package universe)
    pub packages: Vec<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Bulk-load both sources before comparing
    #[arg(short, long)]
    pub cache: bool,

    /// Output formats: all, or a comma-separated list of json, html, txt, markdown
    #[arg(short, long, default_value = "all", value_parser = parse_formats)]
    pub format: ::std::vec::Vec<OutputFormat>,

    /// Directory the reports are written to
    #[arg(short, long, default_value = "output")]
    pub output: PathBuf,

    /// Path to a configuration file (defaults to ./distro-diff.config.yml if present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Skip writing rebuild.txt, untag.txt and buildable.txt
    #[arg(long)]
    pub no_plan: bool,
}

impl Args {
    /// Parses the process arguments, leaving the exit decision to the caller
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}
