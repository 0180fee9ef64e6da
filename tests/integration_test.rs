/// Integration tests for the application layer
mod test_utilities;

use project_system::adapters::outbound::in_memory::InMemoryProjectProperties;
use project_system::application::services::{DataSourceContext, RegisteredDataSource};
use project_system::dataflow::{ProjectValueSource, SourceLink};
use project_system::prelude::*;
use project_system::project_model::domain::{
    ProjectCapabilitiesSnapshot, ProjectConfiguration, RuleSnapshot, CONFIGURATION_GENERAL_RULE,
};
use project_system::project_model::policies::{RuntimeComponentMap, NETCORE_APP_PACKAGE};
use project_system::project_model::services::AssetsFileSnapshotBuilder;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use test_utilities::mocks::*;
use test_utilities::*;
use tokio_util::sync::CancellationToken;

const FIXTURE: &str = "tests/fixtures/multi-target/obj/project.assets.json";

async fn next<T: Send + Sync + 'static>(link: &mut SourceLink<T>) -> VersionedValue<T> {
    tokio::time::timeout(Duration::from_secs(5), link.recv())
        .await
        .expect("timed out waiting for a value")
        .expect("source completed")
}

fn snapshot_of(contents: &[u8]) -> Arc<AssetsFileDependenciesSnapshot> {
    AssetsFileDependenciesSnapshot::empty().update_from_contents(contents, Path::new(FIXTURE))
}

fn runtime_update(identifier: &str, version: &str) -> ProjectSubscriptionUpdate {
    ProjectSubscriptionUpdate::new().with_rule(
        CONFIGURATION_GENERAL_RULE,
        RuleSnapshot::new()
            .with_property("TargetFrameworkIdentifier", identifier)
            .with_property("TargetFrameworkVersion", version),
    )
}

#[test]
fn test_inspect_multi_target_fixture() {
    let reader = MockAssetsFileReader::new(multi_target_assets());
    let progress_reporter = MockProgressReporter::new();
    let use_case = InspectAssetsUseCase::new(reader.clone(), progress_reporter.clone());

    let response = use_case
        .execute(InspectRequest::new(multi_target_assets_file()))
        .unwrap();

    assert!(!response.has_errors());
    assert_eq!(response.read_model.targets.len(), 2);
    assert_eq!(reader.requested_paths(), [multi_target_assets_file()]);

    let net8 = response
        .read_model
        .targets
        .iter()
        .find(|target| target.short_name == "net8.0")
        .unwrap();
    assert_eq!(net8.alias.as_deref(), Some("net8.0"));
    assert_eq!(net8.libraries.len(), 3);
    assert_eq!(net8.diagnostics.len(), 1);
    assert_eq!(net8.diagnostics[0].code, "NU1603");

    let net48 = response
        .read_model
        .targets
        .iter()
        .find(|target| target.short_name == "net48")
        .unwrap();
    assert!(net48.diagnostics.is_empty());
    assert_eq!(net48.top_level_dependencies, ["Newtonsoft.Json"]);

    let messages = progress_reporter.get_messages();
    assert!(messages.iter().any(|m| m.contains("Detected 2 target(s)")));
}

#[test]
fn test_inspect_read_failure_propagates() {
    let use_case =
        InspectAssetsUseCase::new(MockAssetsFileReader::with_failure(), MockProgressReporter::new());
    assert!(use_case
        .execute(InspectRequest::new(PathBuf::from("obj/project.assets.json")))
        .is_err());
}

/// Reparsing identical bytes returns the same snapshot; a changed file that
/// keeps its log messages reuses the message objects.
#[test]
fn test_idempotent_parse_reuse() {
    let contents = multi_target_assets();
    let first = snapshot_of(&contents);
    let again = first.update_from_contents(&contents, Path::new(FIXTURE));
    assert!(Arc::ptr_eq(&first, &again));

    let changed = String::from_utf8(contents)
        .unwrap()
        .replace("\"version\": \"1.0.0\"", "\"version\": \"1.0.1\"");
    let second = first.update_from_contents(changed.as_bytes(), Path::new(FIXTURE));
    assert!(!Arc::ptr_eq(&first, &second));

    let before = first.try_get_log_messages(Some("net8.0")).unwrap();
    let after = second.try_get_log_messages(Some("net8.0")).unwrap();
    assert_eq!(before.len(), 1);
    assert!(Arc::ptr_eq(&before[0], &after[0]));
}

#[test]
fn test_graceful_degradation_keeps_previous_snapshot() {
    let first = snapshot_of(&multi_target_assets());

    let missing = first.update_from_assets_file(Path::new("tests/fixtures/missing/project.assets.json"));
    assert!(Arc::ptr_eq(&first, &missing));

    let invalid = first.update_from_contents(b"{ \"targets\": ", Path::new(FIXTURE));
    assert!(Arc::ptr_eq(&first, &invalid));
}

#[test]
fn test_dependency_closure_within_target() {
    let snapshot = snapshot_of(&multi_target_assets());

    let dependencies = snapshot
        .try_get_dependencies("Serilog", Some("3.1.1"), Some("net8.0"))
        .unwrap();
    assert_eq!(dependencies.len(), 1);
    assert_eq!(dependencies[0].name(), "Newtonsoft.Json");

    let target = snapshot.target(Some("net8.0")).unwrap();
    for library in target.libraries() {
        for dependency in snapshot
            .try_get_dependencies(library.name(), None, Some("net8.0"))
            .unwrap()
        {
            assert!(target.library(dependency.name()).is_some());
        }
    }

    // Two targets and none named: ambiguous
    assert!(snapshot.try_get_dependencies("Serilog", None, None).is_none());
    assert!(snapshot.try_get_package("Shared.Lib", None, Some("net8.0")).is_none());
    assert!(snapshot.try_get_package("Newtonsoft.Json", Some("13.0.3"), Some("net48")).is_some());
}

#[test]
fn test_package_path_probing_order() {
    let primary = TempDir::new().unwrap();
    let fallback = TempDir::new().unwrap();
    std::fs::create_dir_all(fallback.path().join("newtonsoft.json/13.0.3")).unwrap();

    let snapshot = AssetsFileSnapshotBuilder::build(
        &AssetsFileDependenciesSnapshot::default(),
        &multi_target_assets(),
        Path::new(FIXTURE),
    )
    .unwrap()
    .with_additional_package_folders([primary.path().to_path_buf(), fallback.path().to_path_buf()]);
    assert_eq!(snapshot.package_folders().len(), 3);

    assert_eq!(
        snapshot.try_resolve_package_path("Newtonsoft.Json", "13.0.3"),
        Some(fallback.path().join("newtonsoft.json/13.0.3"))
    );

    std::fs::create_dir_all(primary.path().join("serilog/3.1.1")).unwrap();
    std::fs::create_dir_all(fallback.path().join("serilog/3.1.1")).unwrap();
    assert_eq!(
        snapshot.try_resolve_package_path("Serilog", "3.1.1"),
        Some(primary.path().join("serilog/3.1.1"))
    );

    assert!(snapshot.try_resolve_package_path("Missing.Package", "1.0.0").is_none());
}

#[test]
fn test_runtime_component_mapping_examples() {
    assert_eq!(
        RuntimeComponentMap::map_package_name_to_component_id(NETCORE_APP_PACKAGE, "v2.1"),
        "Microsoft.Net.Core.Component.SDK.2.1"
    );
    assert_eq!(
        RuntimeComponentMap::map_package_name_to_component_id(NETCORE_APP_PACKAGE, "v8.0"),
        "Microsoft.NetCore.Component.Runtime.8.0"
    );
    assert_eq!(
        RuntimeComponentMap::map_package_name_to_component_id(NETCORE_APP_PACKAGE, "v1.0"),
        ""
    );
}

#[tokio::test]
async fn test_active_framework_is_member_of_context() {
    let project = |tf: &str| {
        ConfiguredProject::new(
            ProjectConfiguration::new([("Configuration", "Debug"), ("TargetFramework", tf)]),
            Arc::new(InMemoryProjectProperties::new([("TargetFramework", tf.to_string())])),
        )
    };

    let provider = CrossTargetContextProvider::new(Arc::new(MockConfiguredProjects::new(
        vec![
            ("net8.0".to_string(), project("net8.0")),
            ("net48".to_string(), project("net48")),
        ],
        project("net48"),
    )));

    let context = provider
        .create_project_context(&CancellationToken::new())
        .await
        .unwrap();

    assert!(context.is_cross_targeting());
    assert_eq!(context.active_target_framework().short_name(), "net48");
    assert!(context.has_target_framework(context.active_target_framework()));
    assert_eq!(context.target_frameworks().count(), 2);
}

#[tokio::test]
async fn test_context_provider_fails_without_projects() {
    let provider = CrossTargetContextProvider::new(Arc::new(MockConfiguredProjects::default()));
    assert!(provider
        .create_project_context(&CancellationToken::new())
        .await
        .is_err());
}

#[tokio::test]
async fn test_web_workload_reported_at_most_once() {
    let capabilities =
        Arc::new(ProjectValueDataSource::<ProjectCapabilitiesSnapshot>::new("Capabilities"));
    let faults = MockFaultHandler::new();
    let source = WebWorkloadDescriptorDataSource::create(capabilities.clone(), Arc::new(faults.clone()));
    let mut link = source.subscribe().unwrap();

    let mut reported = 0;
    for _ in 0..3 {
        capabilities
            .post(ProjectCapabilitiesSnapshot::new(["DotNetCoreWeb", "DotNetCore"]))
            .unwrap();
        reported += next(&mut link).await.value().len();
    }

    assert_eq!(reported, 1);
    assert!(faults.get_faults().is_empty());
}

#[tokio::test]
async fn test_missing_runtime_flows_into_setup_registration() {
    let subscription =
        Arc::new(ProjectValueDataSource::<ProjectSubscriptionUpdate>::new("Subscription"));
    let registry = MockRuntimeRegistry::with_versions(&["6.0.29"]);
    let source = RuntimeDescriptorDataSource::create(
        subscription.clone(),
        Arc::new(registry.clone()),
        Arc::new(MockFaultHandler::new()),
        CancellationToken::new(),
    );

    let service = SetupComponentRegistrationService::new();
    service.register_runtime_source(&source).unwrap();
    let mut changes = service.subscribe_changes();

    subscription.post(runtime_update(".NETCoreApp", "v8.0")).unwrap();
    subscription.post(runtime_update(".NETCoreApp", "v6.0")).unwrap();
    subscription.post(runtime_update(".NETCoreApp", "v8.0")).unwrap();

    tokio::time::timeout(Duration::from_secs(5), changes.wait_for(|count| *count >= 1))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        service.missing_component_ids(),
        ["Microsoft.NetCore.Component.Runtime.8.0"]
    );
    assert_eq!(registry.call_count(), 1);
    service.dispose();
}

#[tokio::test]
async fn test_runtime_source_reports_nothing_when_registry_fails() {
    let subscription =
        Arc::new(ProjectValueDataSource::<ProjectSubscriptionUpdate>::new("Subscription"));
    let source = RuntimeDescriptorDataSource::create(
        subscription.clone(),
        Arc::new(MockRuntimeRegistry::with_failure()),
        Arc::new(MockFaultHandler::new()),
        CancellationToken::new(),
    );
    let mut link = source.subscribe().unwrap();

    subscription.post(runtime_update(".NETCoreApp", "v8.0")).unwrap();
    assert!(next(&mut link).await.value().is_empty());
}

#[tokio::test]
async fn test_registry_creates_sources_for_net_core_projects() {
    let registry = DataSourceRegistry::with_defaults().unwrap();
    let context = DataSourceContext {
        subscription: Arc::new(ProjectValueDataSource::<ProjectSubscriptionUpdate>::new("Subscription")),
        capabilities: Arc::new(ProjectValueDataSource::<ProjectCapabilitiesSnapshot>::new("Capabilities")),
        runtime_registry: Arc::new(MockRuntimeRegistry::default()),
        fault_handler: Arc::new(MockFaultHandler::new()),
        cancel: CancellationToken::new(),
    };

    let plain = registry.create_applicable(&ProjectCapabilitiesSnapshot::new(["CSharp"]), &context);
    assert!(plain.is_empty());

    let net_core = registry.create_applicable(
        &ProjectCapabilitiesSnapshot::new(["DotNetCore", "PackageReferences"]),
        &context,
    );
    let names: Vec<_> = net_core.iter().map(|(name, _)| name.as_str()).collect();
    assert!(names.len() >= 3);
    assert!(net_core
        .iter()
        .any(|(_, source)| matches!(source, RegisteredDataSource::AssetsFile(_))));
}
