mod cli;
mod config;

use cli::{Args, Command, ContextArgs, InspectArgs, ResolveArgs, RuntimeComponentArgs};
use config::ConfigFile;
use owo_colors::OwoColorize;
use project_system::adapters::outbound::console::StderrProgressReporter;
use project_system::adapters::outbound::filesystem::{DotnetRootRuntimeRegistry, FileSystemReader};
use project_system::adapters::outbound::in_memory::StaticActiveConfiguredProjects;
use project_system::application::dto::{InspectRequest, InspectResponse, OutputFormat};
use project_system::application::factories::{FormatterFactory, PresenterFactory, ReportDestination};
use project_system::application::services::CrossTargetContextProvider;
use project_system::application::use_cases::InspectAssetsUseCase;
use project_system::ports::inbound::AssetsInspectionPort;
use project_system::ports::outbound::InstalledRuntimeRegistry;
use project_system::project_model::policies::RuntimeComponentMap;
use project_system::shared::error::{ExitCode, ProjectSystemError};
use project_system::shared::Result;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse_args();

    match run(args) {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n{}\n", "❌ An error occurred:".red().bold());
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\n{} {}", "Caused by:".yellow(), err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let config = load_config(&args)?;
    init_tracing(args.log_level.as_deref().or(config.log_level.as_deref()));

    match args.command {
        Command::Inspect(inspect) => run_inspect(inspect, &config, args.quiet),
        Command::Resolve(resolve) => run_resolve(resolve, &config),
        Command::Context(context) => run_context(context),
        Command::RuntimeComponent(runtime) => run_runtime_component(runtime),
    }
}

/// `RUST_LOG` wins over `--log-level`, which wins over the config file
fn init_tracing(level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("project_system={}", level.unwrap_or("warn")))
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(args: &Args) -> Result<ConfigFile> {
    if let Some(path) = &args.config {
        return config::load_config_from_path(path);
    }

    let mut dirs: Vec<PathBuf> = Vec::new();
    let assets_path = match &args.command {
        Command::Inspect(inspect) => Some(&inspect.assets_file),
        Command::Resolve(resolve) => Some(&resolve.assets_file),
        Command::Context(context) => Some(&context.assets_file),
        Command::RuntimeComponent(_) => None,
    };
    if let Some(path) = assets_path {
        if path.is_dir() {
            dirs.push(path.clone());
        } else if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            dirs.push(parent.to_path_buf());
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }

    Ok(config::discover_config(dirs.iter().map(PathBuf::as_path))?.unwrap_or_default())
}

fn inspect_assets(request: InspectRequest, quiet: bool) -> Result<InspectResponse> {
    let reporter = if quiet {
        StderrProgressReporter::quiet()
    } else {
        StderrProgressReporter::new()
    };
    let use_case = InspectAssetsUseCase::new(FileSystemReader::new(), reporter);
    use_case.inspect(request)
}

fn fallback_folders(cli: Vec<PathBuf>, config: &ConfigFile) -> Vec<PathBuf> {
    let mut folders = cli;
    folders.extend(config.fallback_package_folders.iter().flatten().cloned());
    folders
}

fn run_inspect(args: InspectArgs, config: &ConfigFile, quiet: bool) -> Result<ExitCode> {
    let format = args
        .format
        .or_else(|| config.output_format())
        .unwrap_or_default();

    let request = InspectRequest::new(args.assets_file)
        .with_target(args.target.or_else(|| config.target.clone()))
        .with_resolve_paths(args.resolve_paths || config.resolve_paths.unwrap_or(false))
        .with_fallback_package_folders(fallback_folders(args.fallback_folders, config));

    let response = inspect_assets(request, quiet)?;

    if !quiet {
        eprintln!("{}", FormatterFactory::progress_message(format));
    }
    let formatter = FormatterFactory::create(format);
    let output = formatter.format(&response.read_model)?;

    let presenter =
        PresenterFactory::create(ReportDestination::from_output(args.output.as_deref(), format));
    presenter.present(&output)?;

    if response.has_errors() {
        Ok(ExitCode::DiagnosticsFound)
    } else {
        Ok(ExitCode::Success)
    }
}

fn run_resolve(args: ResolveArgs, config: &ConfigFile) -> Result<ExitCode> {
    let request = InspectRequest::new(args.assets_file)
        .with_fallback_package_folders(fallback_folders(args.fallback_folders, config));
    let response = inspect_assets(request, true)?;

    match response
        .snapshot
        .try_resolve_package_path(&args.package, &args.version)
    {
        Some(path) => {
            println!("{}", path.display());
            Ok(ExitCode::Success)
        }
        None => Err(ProjectSystemError::Validation {
            message: format!(
                "Package {} {} was not found in any package folder ({})",
                args.package,
                args.version,
                describe_folders(response.snapshot.package_folders())
            ),
        }
        .into()),
    }
}

fn describe_folders(folders: &[PathBuf]) -> String {
    if folders.is_empty() {
        return "none recorded".to_string();
    }
    folders
        .iter()
        .map(|folder| folder.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn run_context(args: ContextArgs) -> Result<ExitCode> {
    let response = inspect_assets(InspectRequest::new(args.assets_file), true)?;
    let projects =
        StaticActiveConfiguredProjects::from_assets_snapshot(&response.snapshot, args.active.as_deref())?;
    let provider = CrossTargetContextProvider::new(Arc::new(projects));

    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    let context = runtime.block_on(provider.create_project_context(&CancellationToken::new()))?;

    println!("Cross-targeting: {}", context.is_cross_targeting());
    println!("Active: {}", context.active_target_framework());
    for framework in context.target_frameworks() {
        let marker = if framework == context.active_target_framework() { "*" } else { " " };
        println!("{} {} ({})", marker, framework.short_name(), framework.full_name());
    }
    Ok(ExitCode::Success)
}

fn run_runtime_component(args: RuntimeComponentArgs) -> Result<ExitCode> {
    let component_id = RuntimeComponentMap::map_package_name_to_component_id(&args.package, &args.version);
    println!("{}", component_id);

    if let Some(root) = args.dotnet_root {
        let installed = is_runtime_installed(&root, &args.version)?;
        println!("Installed: {}", if installed { "yes" } else { "no" });
    }
    Ok(ExitCode::Success)
}

fn is_runtime_installed(root: &Path, version: &str) -> Result<bool> {
    let Some(wanted) = RuntimeComponentMap::major_minor(version) else {
        return Ok(false);
    };
    let registry = DotnetRootRuntimeRegistry::new(root);
    let installed = registry.installed_runtime_versions()?;
    debug!(root = %root.display(), ?installed, "installed runtimes");
    Ok(installed
        .iter()
        .filter_map(|v| RuntimeComponentMap::major_minor(v))
        .any(|v| v == wanted))
}
