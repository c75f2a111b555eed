//! Host integration: the OS collaborators the lifecycle tools drive.
//!
//! Everything outside the filesystem (privilege, systemd, the account
//! database, the desktop database) goes through [`HostOps`]. The production
//! implementation, [`SystemHost`], shells out to the configured tools and
//! re-queries the live system on every call; nothing is cached.
//!
//! A host built [`SystemHost::with_root`] a staging directory other than `/`
//! works on that image offline: `systemctl --root`, `userdel --root` and the
//! image's own `etc/passwd`. Operations that only make sense against a running
//! service manager are not attempted there.
//!
//! # Module Structure
//!
//! - `privileges` - Effective-uid check
//! - `systemd` - `systemctl` invocation and unit queries
//! - `accounts` - Service account lookup and removal
//! - `desktop` - Optional desktop database refresh

use std::path::{Path, PathBuf};

use crate::config::ToolConfig;
use crate::error::LifecycleError;

mod accounts;
mod desktop;
mod privileges;
pub(crate) mod systemd;

/// Operations the teardown sequence needs from the host.
pub trait HostOps {
    /// Whether the caller may mutate machine-wide state.
    fn is_privileged(&self) -> bool;

    /// Whether service and account operations act on the running system.
    ///
    /// `false` for an offline image, where stopping a unit or reloading the
    /// manager would hit the machine running the tool instead.
    fn manages_live_system(&self) -> bool {
        true
    }

    /// Whether the service manager knows a unit with this name.
    fn unit_registered(&self, unit: &str) -> Result<bool, LifecycleError>;

    fn stop_unit(&self, unit: &str) -> Result<(), LifecycleError>;

    fn disable_unit(&self, unit: &str) -> Result<(), LifecycleError>;

    /// Make the service manager re-read unit files from disk.
    fn reload_units(&self) -> Result<(), LifecycleError>;

    fn account_exists(&self, name: &str) -> bool;

    fn delete_account(&self, name: &str) -> Result<(), LifecycleError>;

    /// Whether a desktop database refresh tool is installed.
    fn desktop_database_available(&self) -> bool;

    fn refresh_desktop_database(&self, dir: &Path) -> Result<(), LifecycleError>;
}

/// [`HostOps`] backed by the real system tools.
#[derive(Debug, Clone)]
pub struct SystemHost {
    tools: ToolConfig,
    root: Option<PathBuf>,
}

impl SystemHost {
    pub fn new(tools: ToolConfig) -> Self {
        Self { tools, root: None }
    }

    /// Target the system image under `root`. `/` is the live system.
    pub fn with_root(mut self, root: &Path) -> Self {
        self.root = (root != Path::new("/")).then(|| root.to_path_buf());
        self
    }

    /// The staging root, if this host works on an offline image.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn tools(&self) -> &ToolConfig {
        &self.tools
    }
}

impl Default for SystemHost {
    fn default() -> Self {
        Self::new(ToolConfig::default())
    }
}

impl HostOps for SystemHost {
    fn is_privileged(&self) -> bool {
        privileges::is_root()
    }

    fn manages_live_system(&self) -> bool {
        self.root.is_none()
    }

    fn unit_registered(&self, unit: &str) -> Result<bool, LifecycleError> {
        systemd::unit_registered(&self.tools.systemctl, self.root(), unit)
    }

    fn stop_unit(&self, unit: &str) -> Result<(), LifecycleError> {
        systemd::systemctl(&self.tools.systemctl, self.root(), &["stop", unit])
    }

    fn disable_unit(&self, unit: &str) -> Result<(), LifecycleError> {
        systemd::systemctl(&self.tools.systemctl, self.root(), &["disable", unit])
    }

    fn reload_units(&self) -> Result<(), LifecycleError> {
        systemd::systemctl(&self.tools.systemctl, self.root(), &["daemon-reload"])
    }

    fn account_exists(&self, name: &str) -> bool {
        accounts::account_exists(self.root(), name)
    }

    fn delete_account(&self, name: &str) -> Result<(), LifecycleError> {
        accounts::delete_account(&self.tools.userdel, self.root(), name)
    }

    fn desktop_database_available(&self) -> bool {
        desktop::locate(&self.tools.desktop_database).is_some()
    }

    fn refresh_desktop_database(&self, dir: &Path) -> Result<(), LifecycleError> {
        desktop::refresh_desktop_database(&self.tools.desktop_database, dir)
    }
}
