//! Recording fake of the host collaborators.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use hello_pi_lifecycle::{AppId, HostOps, LifecycleError, SystemPaths};

#[derive(Debug, Default)]
pub struct FakeHost {
    pub privileged: bool,
    /// Working on an offline image instead of the running system.
    pub staged: bool,
    pub registered_units: RefCell<HashSet<String>>,
    pub accounts: RefCell<HashSet<String>>,
    pub desktop_tool: bool,
    pub fail_stop: bool,
    pub fail_disable: bool,
    pub fail_reload: bool,
    pub fail_delete_account: bool,
    pub fail_unit_query: bool,
    /// Path that must already be gone when the account is deleted.
    pub watch_on_delete: Option<PathBuf>,
    pub watched_present_at_delete: RefCell<Option<bool>>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeHost {
    pub fn root() -> Self {
        Self {
            privileged: true,
            desktop_tool: true,
            ..Self::default()
        }
    }

    pub fn unprivileged() -> Self {
        Self::default()
    }

    pub fn staged(mut self) -> Self {
        self.staged = true;
        self
    }

    pub fn with_unit(self, unit: &str) -> Self {
        self.registered_units.borrow_mut().insert(unit.to_string());
        self
    }

    pub fn with_account(self, name: &str) -> Self {
        self.accounts.borrow_mut().insert(name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn call(&self, what: String) {
        self.calls.borrow_mut().push(what);
    }

    fn failure(what: &str) -> LifecycleError {
        LifecycleError::System(format!("{what} failed"))
    }
}

impl HostOps for FakeHost {
    fn is_privileged(&self) -> bool {
        self.privileged
    }

    fn manages_live_system(&self) -> bool {
        !self.staged
    }

    fn unit_registered(&self, unit: &str) -> Result<bool, LifecycleError> {
        self.call(format!("query {unit}"));
        if self.fail_unit_query {
            return Err(Self::failure("query"));
        }
        Ok(self.registered_units.borrow().contains(unit))
    }

    fn stop_unit(&self, unit: &str) -> Result<(), LifecycleError> {
        self.call(format!("stop {unit}"));
        if self.fail_stop {
            return Err(Self::failure("stop"));
        }
        Ok(())
    }

    fn disable_unit(&self, unit: &str) -> Result<(), LifecycleError> {
        self.call(format!("disable {unit}"));
        if self.fail_disable {
            return Err(Self::failure("disable"));
        }
        self.registered_units.borrow_mut().remove(unit);
        Ok(())
    }

    fn reload_units(&self) -> Result<(), LifecycleError> {
        self.call("daemon-reload".to_string());
        if self.fail_reload {
            return Err(Self::failure("reload"));
        }
        Ok(())
    }

    fn account_exists(&self, name: &str) -> bool {
        self.accounts.borrow().contains(name)
    }

    fn delete_account(&self, name: &str) -> Result<(), LifecycleError> {
        self.call(format!("userdel {name}"));
        if let Some(path) = &self.watch_on_delete {
            *self.watched_present_at_delete.borrow_mut() = Some(path.exists());
        }
        if self.fail_delete_account {
            return Err(Self::failure("userdel"));
        }
        self.accounts.borrow_mut().remove(name);
        Ok(())
    }

    fn desktop_database_available(&self) -> bool {
        self.desktop_tool
    }

    fn refresh_desktop_database(&self, dir: &Path) -> Result<(), LifecycleError> {
        self.call(format!("update-desktop-database {}", dir.display()));
        Ok(())
    }
}

pub fn hello_pi_paths(root: &Path) -> SystemPaths {
    SystemPaths::new(&AppId::new("hello-pi").unwrap(), root)
}

/// Create the on-disk resources selected by `mask` (bit order: app dir,
/// desktop entry, icon, unit file, state dir).
pub fn create_files(paths: &SystemPaths, mask: u8) {
    if mask & 0b00001 != 0 {
        fs::create_dir_all(paths.app_dir.join("bin")).unwrap();
        fs::write(paths.app_dir.join("bin/x"), "#!/bin/sh\n").unwrap();
    }
    if mask & 0b00010 != 0 {
        write_file(&paths.desktop_entry, "[Desktop Entry]\n");
    }
    if mask & 0b00100 != 0 {
        write_file(&paths.icon, "png");
    }
    if mask & 0b01000 != 0 {
        write_file(&paths.unit_file, "[Service]\nExecStart=/opt/hello-pi/bin/x\n");
    }
    if mask & 0b10000 != 0 {
        fs::create_dir_all(&paths.state_dir).unwrap();
        fs::write(paths.state_dir.join("config.json"), "{}").unwrap();
    }
}

pub fn write_file(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

pub fn all_absent(paths: &SystemPaths, host: &FakeHost) -> bool {
    [
        &paths.app_dir,
        &paths.desktop_entry,
        &paths.icon,
        &paths.unit_file,
        &paths.state_dir,
    ]
    .iter()
    .all(|p| p.symlink_metadata().is_err())
        && !host.account_exists(paths.account())
}
