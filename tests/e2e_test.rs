/// End-to-end tests for the CLI
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn multi_target_assets() -> String {
    fixture("multi-target/obj/project.assets.json")
        .display()
        .to_string()
}

// Exit code tests for CLI
mod exit_code_tests {
    use super::*;

    /// Exit code 0: Success - assets file without error diagnostics
    #[test]
    fn test_exit_code_success() {
        cargo_bin_cmd!("project-system")
            .args(["inspect", "--quiet", &multi_target_assets()])
            .assert()
            .code(0);
    }

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("project-system").arg("--help").assert().code(0);
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("project-system")
            .arg("--version")
            .assert()
            .code(0)
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    /// Exit code 1: Restore reported error diagnostics
    #[test]
    fn test_exit_code_diagnostics_found() {
        cargo_bin_cmd!("project-system")
            .args(["inspect", "--quiet"])
            .arg(fixture("restore-errors"))
            .assert()
            .code(1)
            .stdout(predicate::str::contains("NU1101"));
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("project-system")
            .arg("--invalid-option")
            .assert()
            .code(2);
    }

    /// Exit code 2: Invalid format value
    #[test]
    fn test_exit_code_invalid_format() {
        cargo_bin_cmd!("project-system")
            .args(["inspect", "-f", "invalid_format", &multi_target_assets()])
            .assert()
            .code(2);
    }

    /// Exit code 3: Application error - missing assets file
    #[test]
    fn test_exit_code_application_error_missing_assets_file() {
        let dir = TempDir::new().unwrap();
        cargo_bin_cmd!("project-system")
            .args(["inspect", "--quiet"])
            .arg(dir.path())
            .assert()
            .code(3)
            .stderr(predicate::str::contains("project.assets.json"));
    }

    /// Exit code 3: Application error - unknown target
    #[test]
    fn test_exit_code_application_error_unknown_target() {
        cargo_bin_cmd!("project-system")
            .args(["inspect", "--quiet", "--target", "net6.0", &multi_target_assets()])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("net6.0"));
    }
}

mod inspect_tests {
    use super::*;

    #[test]
    fn test_inspect_json_output() {
        let output = cargo_bin_cmd!("project-system")
            .args(["inspect", "--quiet"])
            .arg(fixture("multi-target"))
            .output()
            .unwrap();

        assert!(output.status.success());
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["summary"]["targets"], 2);
        assert_eq!(json["summary"]["warnings"], 1);
        assert_eq!(json["summary"]["errors"], 0);

        let names: Vec<&str> = json["targets"]
            .as_array()
            .unwrap()
            .iter()
            .map(|target| target["framework"].as_str().unwrap())
            .collect();
        assert!(names.contains(&"net8.0"));
        assert!(names.contains(&"net48"));
    }

    #[test]
    fn test_inspect_single_target_markdown() {
        cargo_bin_cmd!("project-system")
            .args([
                "inspect",
                "--quiet",
                "--format",
                "markdown",
                "--target",
                "net48",
                &multi_target_assets(),
            ])
            .assert()
            .code(0)
            .stdout(predicate::str::contains("# Assets Report"))
            .stdout(predicate::str::contains("Newtonsoft.Json"))
            .stdout(predicate::str::contains("Serilog").not());
    }

    #[test]
    fn test_inspect_writes_output_file() {
        let dir = TempDir::new().unwrap();
        let report = dir.path().join("report.json");

        cargo_bin_cmd!("project-system")
            .args(["inspect", "--quiet", &multi_target_assets(), "--output"])
            .arg(&report)
            .assert()
            .code(0)
            .stdout(predicate::str::is_empty());

        let content = fs::read_to_string(&report).unwrap();
        assert!(content.contains("Serilog"));
    }

    #[test]
    fn test_inspect_output_directory_gets_named_report() {
        let dir = TempDir::new().unwrap();

        cargo_bin_cmd!("project-system")
            .args(["inspect", "--quiet", &multi_target_assets(), "--format", "markdown", "--output"])
            .arg(dir.path())
            .assert()
            .code(0);

        let content = fs::read_to_string(dir.path().join("assets-report.md")).unwrap();
        assert!(content.contains("# Assets Report"));
    }

    #[test]
    fn test_inspect_progress_on_stderr() {
        cargo_bin_cmd!("project-system")
            .args(["inspect", &multi_target_assets()])
            .assert()
            .code(0)
            .stderr(predicate::str::contains("Generating JSON report"));
    }
}

mod resolve_tests {
    use super::*;

    #[test]
    fn test_resolve_from_fallback_folder() {
        let packages = TempDir::new().unwrap();
        fs::create_dir_all(packages.path().join("serilog/3.1.1")).unwrap();

        cargo_bin_cmd!("project-system")
            .args(["resolve", &multi_target_assets(), "Serilog", "3.1.1", "--fallback-folder"])
            .arg(packages.path())
            .assert()
            .code(0)
            .stdout(predicate::str::contains("serilog"));
    }

    #[test]
    fn test_resolve_missing_package_fails() {
        cargo_bin_cmd!("project-system")
            .args(["resolve", &multi_target_assets(), "Serilog", "3.1.1"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("was not found"));
    }
}

mod context_tests {
    use super::*;

    #[test]
    fn test_context_defaults_to_first_target() {
        cargo_bin_cmd!("project-system")
            .args(["context", &multi_target_assets()])
            .assert()
            .code(0)
            .stdout(predicate::str::contains("Cross-targeting: true"))
            .stdout(predicate::str::contains("net48"))
            .stdout(predicate::str::contains("net8.0"));
    }

    #[test]
    fn test_context_with_active_target() {
        cargo_bin_cmd!("project-system")
            .args(["context", "--active", "net48", &multi_target_assets()])
            .assert()
            .code(0)
            .stdout(predicate::str::contains("Active: net48"))
            .stdout(predicate::str::contains("* net48"));
    }

    #[test]
    fn test_context_unknown_active_target_fails() {
        cargo_bin_cmd!("project-system")
            .args(["context", "--active", "net6.0", &multi_target_assets()])
            .assert()
            .code(3);
    }

    #[test]
    fn test_context_single_target_is_not_cross_targeting() {
        cargo_bin_cmd!("project-system")
            .arg("context")
            .arg(fixture("restore-errors"))
            .assert()
            .code(0)
            .stdout(predicate::str::contains("Cross-targeting: false"));
    }
}

mod runtime_component_tests {
    use super::*;

    #[test]
    fn test_runtime_component_id() {
        cargo_bin_cmd!("project-system")
            .args(["runtime-component", "Microsoft.NETCore.App", "v8.0"])
            .assert()
            .code(0)
            .stdout(predicate::str::contains(
                "Microsoft.NetCore.Component.Runtime.8.0",
            ));
    }

    #[test]
    fn test_runtime_component_installed() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("shared/Microsoft.NETCore.App/8.0.4")).unwrap();

        cargo_bin_cmd!("project-system")
            .args(["runtime-component", "Microsoft.NETCore.App", "v8.0", "--dotnet-root"])
            .arg(root.path())
            .assert()
            .code(0)
            .stdout(predicate::str::contains("Installed: yes"));
    }

    #[test]
    fn test_runtime_component_not_installed() {
        let root = TempDir::new().unwrap();

        cargo_bin_cmd!("project-system")
            .args(["runtime-component", "Microsoft.NETCore.App", "v9.0", "--dotnet-root"])
            .arg(root.path())
            .assert()
            .code(0)
            .stdout(predicate::str::contains("Installed: no"));
    }
}
