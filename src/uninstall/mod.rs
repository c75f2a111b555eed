//! Uninstallation and cleanup.
//!
//! Teardown is a fixed sequence of independently guarded steps. Each step
//! re-checks the live system, prints a status line before it acts, and records
//! an explicit [`StepOutcome`]. In system mode the only fatal condition is the
//! upfront privilege check; every later failure is recorded and the sequence
//! carries on, so a half-finished earlier run never blocks a full one.

use std::io::Write;
use std::path::Path;

use crate::error::LifecycleError;
use crate::host::HostOps;
use crate::paths::{SystemPaths, UserPaths};

pub(crate) mod fs_ops;
mod report;

pub use report::{Step, StepOutcome, StepRecord, UninstallReport};

/// Remove every machine-wide resource belonging to the application.
///
/// Fails only with [`LifecycleError::PermissionDenied`], before anything is
/// touched. Status lines go to `out`.
pub fn uninstall_system<H, W>(
    paths: &SystemPaths,
    host: &H,
    out: &mut W,
) -> Result<UninstallReport, LifecycleError>
where
    H: HostOps + ?Sized,
    W: Write + ?Sized,
{
    if !host.is_privileged() {
        return Err(LifecycleError::PermissionDenied);
    }

    log::debug!("Starting system uninstallation of {}", paths.app_id);
    let mut report = UninstallReport::default();
    let unit = paths.unit_name();
    // An offline image has no running manager to stop units or reload.
    let live = host.manages_live_system();

    // Service registration
    match host.unit_registered(&unit) {
        Ok(true) if live => {
            status(out, format_args!("Stopping and disabling {unit}..."));
            // Both may fail on a unit that is already stopped or disabled.
            report.record(Step::StopService, outcome(host.stop_unit(&unit)));
            report.record(Step::DisableService, outcome(host.disable_unit(&unit)));
        }
        Ok(true) => {
            status(out, format_args!("Disabling {unit}..."));
            report.record(Step::StopService, StepOutcome::Skipped);
            report.record(Step::DisableService, outcome(host.disable_unit(&unit)));
        }
        Ok(false) => {
            report.record(Step::StopService, StepOutcome::Skipped);
            report.record(Step::DisableService, StepOutcome::Skipped);
        }
        Err(e) => {
            report.record(Step::StopService, StepOutcome::Failed(e.to_string()));
            report.record(Step::DisableService, StepOutcome::Skipped);
        }
    }

    // Unit file, then reload only if something was actually removed
    let unit_removed = remove_path(
        &mut report,
        out,
        Step::RemoveUnitFile,
        &paths.unit_file,
        "Removing systemd unit",
    );
    if unit_removed && live {
        status(out, format_args!("Reloading systemd..."));
        report.record(Step::ReloadUnits, outcome(host.reload_units()));
    } else {
        report.record(Step::ReloadUnits, StepOutcome::Skipped);
    }

    remove_path(
        &mut report,
        out,
        Step::RemoveAppDir,
        &paths.app_dir,
        "Removing application directory",
    );
    remove_path(
        &mut report,
        out,
        Step::RemoveDesktopEntry,
        &paths.desktop_entry,
        "Removing desktop entry",
    );
    remove_path(&mut report, out, Step::RemoveIcon, &paths.icon, "Removing icon");

    // The state directory may be the account's home; userdel must not find it.
    remove_path(
        &mut report,
        out,
        Step::RemoveStateDir,
        &paths.state_dir,
        "Removing state directory",
    );

    let account = paths.account();
    if host.account_exists(account) {
        status(out, format_args!("Removing service user {account}..."));
        let result = host.delete_account(account);
        if result.is_err() {
            // Usually processes still running under the account. Warn only:
            // killing them is not this tool's call.
            log::warn!(
                "Service user {account} could not be removed; \
                 check for processes still running as {account} and remove it manually"
            );
        }
        report.record(Step::RemoveServiceAccount, outcome(result));
    } else {
        report.record(Step::RemoveServiceAccount, StepOutcome::Skipped);
    }

    if host.desktop_database_available() {
        status(out, format_args!("Updating desktop database..."));
        report.record(
            Step::RefreshDesktopDatabase,
            outcome(host.refresh_desktop_database(&paths.applications_dir)),
        );
    } else {
        report.record(Step::RefreshDesktopDatabase, StepOutcome::Skipped);
    }

    status(out, format_args!("{} removed.", paths.app_id));
    log::debug!(
        "System uninstallation of {} finished: {} changes, {} tolerated failures",
        paths.app_id,
        report.changed(),
        report.failures().count()
    );
    Ok(report)
}

/// Remove the invoking user's per-user data and launcher entry.
///
/// Absent paths are fine; any other filesystem error is returned.
pub fn uninstall_user<W>(paths: &UserPaths, out: &mut W) -> Result<UninstallReport, LifecycleError>
where
    W: Write + ?Sized,
{
    let mut report = UninstallReport::default();

    for (step, path, label) in [
        (Step::RemoveUserData, &paths.data_dir, "Removing user data"),
        (
            Step::RemoveUserDesktopEntry,
            &paths.desktop_entry,
            "Removing user desktop entry",
        ),
    ] {
        if fs_ops::is_present(path) {
            status(out, format_args!("{label} {}...", path.display()));
        }
        let removed = fs_ops::remove_entry(path).map_err(|e| LifecycleError::io(path, e))?;
        let outcome = if removed {
            StepOutcome::Done
        } else {
            StepOutcome::Skipped
        };
        report.record(step, outcome);
    }

    status(out, format_args!("{} removed.", paths.app_id));
    Ok(report)
}

/// Guarded best-effort removal. Returns whether the path was removed.
fn remove_path<W: Write + ?Sized>(
    report: &mut UninstallReport,
    out: &mut W,
    step: Step,
    path: &Path,
    label: &str,
) -> bool {
    if !fs_ops::is_present(path) {
        report.record(step, StepOutcome::Skipped);
        return false;
    }

    status(out, format_args!("{label} {}...", path.display()));
    match fs_ops::remove_entry(path) {
        Ok(removed) => {
            report.record(step, if removed { StepOutcome::Done } else { StepOutcome::Skipped });
            removed
        }
        Err(e) => {
            report.record(step, StepOutcome::Failed(e.to_string()));
            false
        }
    }
}

fn outcome(result: Result<(), LifecycleError>) -> StepOutcome {
    match result {
        Ok(()) => StepOutcome::Done,
        Err(e) => StepOutcome::Failed(e.to_string()),
    }
}

fn status<W: Write + ?Sized>(out: &mut W, line: std::fmt::Arguments<'_>) {
    // Progress output is advisory; a closed stdout must not abort teardown.
    let _ = writeln!(out, "{line}");
}
