use clap::{Args as ClapArgs, Parser, Subcommand};
use project_system::application::dto::OutputFormat;
use std::path::PathBuf;

/// Inspect NuGet restore output and project state the way a managed project system sees it
#[derive(Parser, Debug)]
#[command(name = "project-system")]
#[command(version)]
#[command(about = "Inspect NuGet restore output and cross-target project state", long_about = None)]
pub struct Args {
    /// Configuration file (defaults to project-system.config.yml next to the
    /// assets file or in the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level: off, error, warn, info, debug or trace (RUST_LOG takes precedence)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Suppress progress output on stderr
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse project.assets.json and render its targets, libraries and diagnostics
    Inspect(InspectArgs),
    /// Print the folder a restored package was extracted to
    Resolve(ResolveArgs),
    /// Show the cross-target context derived from the assets file's targets
    Context(ContextArgs),
    /// Map a runtime package version to its setup component id
    RuntimeComponent(RuntimeComponentArgs),
}

#[derive(ClapArgs, Debug)]
pub struct InspectArgs {
    /// Assets file, its obj folder or the project folder
    #[arg(default_value = ".")]
    pub assets_file: PathBuf,

    /// Only report this target framework (short name, alias or target key)
    #[arg(short, long)]
    pub target: Option<String>,

    /// Output format: json or markdown
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path, or a directory to write assets-report.<ext> into (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Look up every package library in the package folders
    #[arg(long)]
    pub resolve_paths: bool,

    /// Extra package folder searched after those in the assets file.
    /// Can be specified multiple times.
    #[arg(long = "fallback-folder", value_name = "DIR")]
    pub fallback_folders: Vec<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct ResolveArgs {
    /// Assets file, its obj folder or the project folder
    pub assets_file: PathBuf,

    /// Package id
    pub package: String,

    /// Package version
    pub version: String,

    /// Extra package folder searched after those in the assets file
    #[arg(long = "fallback-folder", value_name = "DIR")]
    pub fallback_folders: Vec<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct ContextArgs {
    /// Assets file, its obj folder or the project folder
    #[arg(default_value = ".")]
    pub assets_file: PathBuf,

    /// Active target framework (defaults to the first target)
    #[arg(short, long)]
    pub active: Option<String>,
}

#[derive(ClapArgs, Debug)]
pub struct RuntimeComponentArgs {
    /// Runtime package name, e.g. Microsoft.NETCore.App
    pub package: String,

    /// Runtime version, e.g. v8.0 or 8.0.4
    pub version: String,

    /// Report whether the runtime is installed under this dotnet root
    #[arg(long, value_name = "DIR")]
    pub dotnet_root: Option<PathBuf>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
