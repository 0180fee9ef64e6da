/// Shared helpers for integration tests
pub mod mocks;

use std::path::PathBuf;

/// Assets file of a project targeting net8.0 and net48
#[allow(dead_code)]
pub fn multi_target_assets_file() -> PathBuf {
    PathBuf::from("tests/fixtures/multi-target/obj/project.assets.json")
}

#[allow(dead_code)]
pub fn multi_target_assets() -> Vec<u8> {
    std::fs::read(multi_target_assets_file()).unwrap()
}

/// Assets file of a restore that failed to find a package
#[allow(dead_code)]
pub fn restore_errors_assets_file() -> PathBuf {
    PathBuf::from("tests/fixtures/restore-errors/obj/project.assets.json")
}
