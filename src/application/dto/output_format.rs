/// Output format enumeration for comparison reports
///
/// Each format renders the whole report model into one artifact. It
/// belongs in the application layer because the CLI and the formatters
/// both need to understand it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutputFormat {
    /// Machine-readable JSON report
    Json,
    /// Colour-coded HTML status page
    Html,
    /// Plain-text status lines (`name status nvr1 nvr2`)
    Txt,
    /// Human-readable Markdown report
    Markdown,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Json,
        OutputFormat::Html,
        OutputFormat::Txt,
        OutputFormat::Markdown,
    ];

    /// File name of the artifact produced by this format
    pub fn artifact_name(&self) -> &'static str {
        match self {
            OutputFormat::Json => "report.json",
            OutputFormat::Html => "report.html",
            OutputFormat::Txt => "status.txt",
            OutputFormat::Markdown => "report.md",
        }
    }

    /// Parses a `--format` value: `all` or a comma-separated list
    ///
    /// Duplicates collapse; the result follows the order of [`OutputFormat::ALL`].
    pub fn parse_selection(value: &str) -> Result<Vec<OutputFormat>, String> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::ALL.to_vec());
        }

        let mut formats = value
            .split(',')
            .map(|part| part.trim().parse::<OutputFormat>())
            .collect::<Result<Vec<_>, _>>()?;
        formats.sort();
        formats.dedup();
        Ok(formats)
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "html" => Ok(OutputFormat::Html),
            "txt" | "text" => Ok(OutputFormat::Txt),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'json', 'html', 'txt', 'markdown' or 'all'",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Html => write!(f, "html"),
            OutputFormat::Txt => write!(f, "txt"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}
