/// ProgressReporter port for interactive feedback during a comparison run
///
/// Comparing a full distribution issues one query per package and takes
/// minutes; this port lets the CLI show where the run is without mixing
/// progress output into the log stream.
pub trait ProgressReporter {
    /// Announces a new phase of the run (fetching lists, comparing, rendering)
    fn report_phase(&self, message: &str);

    /// Reports that `current` of `total` packages have been classified
    ///
    /// # Arguments
    /// * `current` - Packages processed so far
    /// * `total` - Size of the package universe
    /// * `package` - Package just processed
    fn report_progress(&self, current: usize, total: usize, package: &str);

    /// Reports completion of the run
    fn report_completion(&self, message: &str);
}
