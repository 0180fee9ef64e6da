use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use parking_lot::Mutex;

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// This adapter implements the ProgressReporter port, writing progress
/// information to stderr so it doesn't interfere with stdout output.
/// Uses indicatif for rich progress bar display while package paths are
/// resolved.
pub struct StderrProgressReporter {
    progress_bar: Mutex<Option<ProgressBar>>,
    quiet: bool,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            progress_bar: Mutex::new(None),
            quiet: false,
        }
    }

    /// A reporter that only prints errors
    pub fn quiet() -> Self {
        Self {
            progress_bar: Mutex::new(None),
            quiet: true,
        }
    }

    fn get_or_create_progress_bar(&self, total: usize) -> ProgressBar {
        let mut pb_option = self.progress_bar.lock();
        if let Some(pb) = pb_option.as_ref() {
            pb.clone()
        } else {
            let pb = ProgressBar::new(total as u64);
            if let Ok(style) = ProgressStyle::default_bar().template(
                "   {spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) - {msg}",
            ) {
                pb.set_style(style.progress_chars("=>-"));
            }
            *pb_option = Some(pb.clone());
            pb
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        if !self.quiet {
            eprintln!("{}", message);
        }
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        if self.quiet {
            return;
        }
        let pb = self.get_or_create_progress_bar(total);
        pb.set_position(current as u64);
        if let Some(msg) = message {
            pb.set_message(msg.to_string());
        }
    }

    fn report_error(&self, message: &str) {
        // Finish progress bar if it exists
        if let Some(pb) = self.progress_bar.lock().take() {
            pb.finish_and_clear();
        }
        eprintln!("{}", message);
    }

    fn report_completion(&self, message: &str) {
        // Finish progress bar if it exists
        if let Some(pb) = self.progress_bar.lock().take() {
            pb.finish_and_clear();
        }
        if !self.quiet {
            eprintln!();
            eprintln!("{}", message);
        }
    }
}
