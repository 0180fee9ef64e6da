use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::OutputPresenter;
use std::path::{Path, PathBuf};

/// File name used when an assets report is written into a directory
const REPORT_FILE_STEM: &str = "assets-report";

/// Where an assets report is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportDestination {
    Stdout,
    File(PathBuf),
}

impl ReportDestination {
    /// Resolves the `--output` argument of `inspect`.
    ///
    /// No path means stdout. An existing directory receives
    /// `assets-report.json` or `assets-report.md` depending on `format`;
    /// any other path is written as given.
    pub fn from_output(output: Option<&Path>, format: OutputFormat) -> Self {
        match output {
            None => ReportDestination::Stdout,
            Some(path) if path.is_dir() => ReportDestination::File(
                path.join(format!("{}.{}", REPORT_FILE_STEM, format.file_extension())),
            ),
            Some(path) => ReportDestination::File(path.to_path_buf()),
        }
    }
}

/// Creates the presenter for a report destination
pub struct PresenterFactory;

impl PresenterFactory {
    /// # Examples
    /// ```
    /// use project_system::application::dto::OutputFormat;
    /// use project_system::application::factories::{PresenterFactory, ReportDestination};
    ///
    /// let destination = ReportDestination::from_output(None, OutputFormat::Json);
    /// let presenter = PresenterFactory::create(destination);
    /// ```
    pub fn create(destination: ReportDestination) -> Box<dyn OutputPresenter> {
        match destination {
            ReportDestination::Stdout => Box::new(StdoutPresenter::new()),
            ReportDestination::File(path) => Box::new(FileSystemWriter::new(path)),
        }
    }
}
