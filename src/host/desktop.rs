//! Desktop database refresh after launcher entries are removed.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::LifecycleError;

/// Resolve the refresh tool on `PATH`, if installed.
pub(super) fn locate(tool: &str) -> Option<PathBuf> {
    match which::which(tool) {
        Ok(program) => Some(program),
        Err(_) => {
            log::debug!("{tool} not found on PATH");
            None
        }
    }
}

/// Run the refresh tool on `dir`.
pub(super) fn refresh_desktop_database(tool: &str, dir: &Path) -> Result<(), LifecycleError> {
    let program = locate(tool)
        .ok_or_else(|| LifecycleError::System(format!("{tool} is not installed")))?;

    log::debug!("Running {} {}", program.display(), dir.display());
    let output = Command::new(&program)
        .arg(dir)
        .output()
        .map_err(|e| LifecycleError::System(format!("Failed to execute {tool}: {e}")))?;

    if !output.status.success() {
        return Err(LifecycleError::System(format!(
            "{tool} failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    Ok(())
}
