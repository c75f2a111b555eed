//! Fallback for platforms without a systemd service to control

use crate::config::ToolConfig;
use crate::error::LifecycleError;

fn unsupported() -> LifecycleError {
    LifecycleError::System("service control is only supported on Linux (systemd)".to_string())
}

pub(super) fn check_status(_tools: &ToolConfig, _unit: &str) -> Result<bool, LifecycleError> {
    Err(unsupported())
}

pub(super) fn start_service(_tools: &ToolConfig, _unit: &str) -> Result<(), LifecycleError> {
    Err(unsupported())
}

pub(super) fn stop_service(_tools: &ToolConfig, _unit: &str) -> Result<(), LifecycleError> {
    Err(unsupported())
}

pub(super) fn restart_service(_tools: &ToolConfig, _unit: &str) -> Result<(), LifecycleError> {
    Err(unsupported())
}

pub(super) async fn follow_logs(
    _tools: &ToolConfig,
    _unit: &str,
    _lines: u32,
    _follow: bool,
) -> Result<(), LifecycleError> {
    Err(unsupported())
}
