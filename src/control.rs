//! Service lifecycle control - delegates to the OS-native service manager
//!
//! Linux drives the system unit through systemd (`systemctl`, `journalctl`).
//! Other platforms have no service to control and report that instead.

use crate::config::ToolConfig;
use crate::error::LifecycleError;
use crate::paths::SystemPaths;

// Platform-specific implementations
cfg_if::cfg_if! {
    if #[cfg(target_os = "linux")] {
        mod linux_control;
        use linux_control as platform;
    } else {
        mod unsupported;
        use unsupported as platform;
    }
}

/// Check if the service is running
///
/// Returns: Ok(true) if active, Ok(false) otherwise
pub fn check_status(tools: &ToolConfig, paths: &SystemPaths) -> Result<bool, LifecycleError> {
    platform::check_status(tools, &paths.unit_name())
}

/// Start the service; the unit must be installed
pub fn start_service(tools: &ToolConfig, paths: &SystemPaths) -> Result<(), LifecycleError> {
    ensure_installed(paths)?;
    platform::start_service(tools, &paths.unit_name())
}

/// Stop the service
pub fn stop_service(tools: &ToolConfig, paths: &SystemPaths) -> Result<(), LifecycleError> {
    platform::stop_service(tools, &paths.unit_name())
}

/// Restart the service; the unit must be installed
pub fn restart_service(tools: &ToolConfig, paths: &SystemPaths) -> Result<(), LifecycleError> {
    ensure_installed(paths)?;
    platform::restart_service(tools, &paths.unit_name())
}

/// Stream the service journal to stdout until EOF or Ctrl-C
pub async fn follow_logs(
    tools: &ToolConfig,
    paths: &SystemPaths,
    lines: u32,
    follow: bool,
) -> Result<(), LifecycleError> {
    platform::follow_logs(tools, &paths.unit_name(), lines, follow).await
}

fn ensure_installed(paths: &SystemPaths) -> Result<(), LifecycleError> {
    if paths.unit_file.exists() {
        Ok(())
    } else {
        Err(LifecycleError::NotInstalled(paths.unit_file.clone()))
    }
}
