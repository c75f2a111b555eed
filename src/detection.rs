//! Installation state detection
//!
//! Determines if the application is installed, partially installed, or not
//! installed by checking each machine-wide resource the teardown removes:
//! - Systemd unit file in /etc/systemd/system
//! - Application directory in /opt
//! - Desktop entry and icon in /usr/share
//! - State directory in /var/lib
//! - Service account

use std::fmt;
use std::path::PathBuf;

use crate::host::HostOps;
use crate::paths::SystemPaths;
use crate::uninstall::fs_ops;

/// Installation state enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallationState {
    /// No resources found
    NotInstalled,
    /// Some resources present (an interrupted install or uninstall)
    PartiallyInstalled,
    /// Every resource present
    FullyInstalled,
}

impl fmt::Display for InstallationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InstallationState::NotInstalled => "not installed",
            InstallationState::PartiallyInstalled => "partially installed",
            InstallationState::FullyInstalled => "installed",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    UnitFile(PathBuf),
    AppDir(PathBuf),
    DesktopEntry(PathBuf),
    Icon(PathBuf),
    StateDir(PathBuf),
    ServiceAccount(String),
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::UnitFile(p) => write!(f, "service unit      {}", p.display()),
            Resource::AppDir(p) => write!(f, "app directory     {}", p.display()),
            Resource::DesktopEntry(p) => write!(f, "desktop entry     {}", p.display()),
            Resource::Icon(p) => write!(f, "icon              {}", p.display()),
            Resource::StateDir(p) => write!(f, "state directory   {}", p.display()),
            Resource::ServiceAccount(name) => write!(f, "service account   {name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceStatus {
    pub resource: Resource,
    pub present: bool,
}

/// Check each resource against the live system, in teardown order.
pub fn inspect<H: HostOps + ?Sized>(paths: &SystemPaths, host: &H) -> Vec<ResourceStatus> {
    let file = |resource: Resource, path: &PathBuf| ResourceStatus {
        present: fs_ops::is_present(path),
        resource,
    };

    vec![
        file(Resource::UnitFile(paths.unit_file.clone()), &paths.unit_file),
        file(Resource::AppDir(paths.app_dir.clone()), &paths.app_dir),
        file(
            Resource::DesktopEntry(paths.desktop_entry.clone()),
            &paths.desktop_entry,
        ),
        file(Resource::Icon(paths.icon.clone()), &paths.icon),
        file(Resource::StateDir(paths.state_dir.clone()), &paths.state_dir),
        ResourceStatus {
            resource: Resource::ServiceAccount(paths.account().to_string()),
            present: host.account_exists(paths.account()),
        },
    ]
}

/// Summarise resource presence into a single state.
pub fn summarize(statuses: &[ResourceStatus]) -> InstallationState {
    let present = statuses.iter().filter(|s| s.present).count();
    match present {
        0 => InstallationState::NotInstalled,
        n if n == statuses.len() => InstallationState::FullyInstalled,
        _ => InstallationState::PartiallyInstalled,
    }
}

/// Check current installation state by verifying all resources
pub fn check_installation_state<H: HostOps + ?Sized>(
    paths: &SystemPaths,
    host: &H,
) -> InstallationState {
    summarize(&inspect(paths, host))
}
