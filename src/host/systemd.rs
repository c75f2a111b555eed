//! Systemd service manager operations.
//!
//! Thin wrappers over `systemctl` for the system manager. Callers decide
//! whether a failure matters; these functions only report it.
//!
//! With a staging root, `systemctl --root=<dir>` edits the unit links of the
//! image offline instead of talking to the running manager.

use std::path::Path;
use std::process::{Command, Output};

use crate::error::LifecycleError;

/// Run `systemctl` with `args` and capture its output.
pub(crate) fn run(
    systemctl: &str,
    root: Option<&Path>,
    args: &[&str],
) -> Result<Output, LifecycleError> {
    let args = rooted_args(root, args);
    log::debug!("Running {systemctl} {}", args.join(" "));
    Command::new(systemctl).args(&args).output().map_err(|e| {
        LifecycleError::System(format!("Failed to execute {systemctl} {}: {e}", args.join(" ")))
    })
}

/// Run `systemctl` and turn a non-zero exit into an error carrying stderr.
pub(crate) fn systemctl(
    systemctl: &str,
    root: Option<&Path>,
    args: &[&str],
) -> Result<(), LifecycleError> {
    let output = run(systemctl, root, args)?;

    if !output.status.success() {
        return Err(LifecycleError::System(format!(
            "{systemctl} {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    Ok(())
}

fn rooted_args(root: Option<&Path>, args: &[&str]) -> Vec<String> {
    root.map(|root| format!("--root={}", root.display()))
        .into_iter()
        .chain(args.iter().map(|arg| arg.to_string()))
        .collect()
}

/// Check whether the unit is known to the service manager.
///
/// `list-unit-files` exits non-zero when nothing matches on newer systemd
/// releases, so the listing itself is inspected rather than the exit code.
pub(crate) fn unit_registered(
    systemctl: &str,
    root: Option<&Path>,
    unit: &str,
) -> Result<bool, LifecycleError> {
    let output = run(
        systemctl,
        root,
        &["list-unit-files", "--no-legend", "--no-pager", unit],
    )?;
    Ok(listing_contains(&String::from_utf8_lossy(&output.stdout), unit))
}

fn listing_contains(listing: &str, unit: &str) -> bool {
    listing
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .any(|name| name == unit)
}
