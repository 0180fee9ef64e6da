use crate::shared::Result;

/// InstalledRuntimeRegistry port for the machine's installed .NET runtimes
///
/// This port abstracts the machine-wide record of shared runtime versions
/// (the `sharedfx\Microsoft.NETCore.App` registry key on Windows, the
/// `shared/Microsoft.NETCore.App` folder of a dotnet root elsewhere).
pub trait InstalledRuntimeRegistry: Send + Sync {
    /// Returns the installed `Microsoft.NETCore.App` versions
    ///
    /// # Returns
    /// Version strings such as `8.0.4`; empty when nothing is recorded
    ///
    /// # Errors
    /// Returns an error if the record exists but cannot be read
    fn installed_runtime_versions(&self) -> Result<Vec<String>>;
}
