use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::cell::RefCell;

const BAR_TEMPLATE: &str = "   {spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) - {msg}";

/// StderrProgressReporter adapter for reporting comparison progress
///
/// Draws an indicatif progress bar on stderr while packages are classified.
/// The bar is created lazily on the first progress report and cleared on
/// completion or when a new phase starts.
pub struct StderrProgressReporter {
    progress_bar: RefCell<Option<ProgressBar>>,
    hidden: bool,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            progress_bar: RefCell::new(None),
            hidden: false,
        }
    }

    /// A reporter that tracks progress without drawing anything
    pub fn hidden() -> Self {
        Self {
            progress_bar: RefCell::new(None),
            hidden: true,
        }
    }

    fn get_or_create_progress_bar(&self, total: usize) -> ProgressBar {
        let mut slot = self.progress_bar.borrow_mut();
        if let Some(pb) = slot.as_ref() {
            return pb.clone();
        }

        let pb = if self.hidden {
            ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::hidden())
        } else {
            ProgressBar::new(total as u64)
        };
        // The template is a constant; fall back to the default style if it is ever rejected
        let style = ProgressStyle::default_bar()
            .template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-");
        pb.set_style(style);
        *slot = Some(pb.clone());
        pb
    }

    fn clear_bar(&self) {
        if let Some(pb) = self.progress_bar.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }

    /// Position of the current bar, if one is active
    pub fn position(&self) -> Option<u64> {
        self.progress_bar.borrow().as_ref().map(ProgressBar::position)
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report_phase(&self, message: &str) {
        self.clear_bar();
        if !self.hidden {
            eprintln!("{}", message);
        }
    }

    fn report_progress(&self, current: usize, total: usize, package: &str) {
        let pb = self.get_or_create_progress_bar(total);
        pb.set_length(total as u64);
        pb.set_position(current as u64);
        pb.set_message(package.to_string());
    }

    fn report_completion(&self, message: &str) {
        self.clear_bar();
        if !self.hidden {
            eprintln!("{}", message);
        }
    }
}
