//! Application identity and the resource paths derived from it.
//!
//! Every path the lifecycle tools touch is computed here from a single
//! [`AppId`], so the system and per-user layouts cannot drift apart.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::LifecycleError;

/// Identifier used when no configuration overrides it.
pub const DEFAULT_APP_ID: &str = "hello-pi";

/// Validated application identifier.
///
/// The id ends up as a path component, a unit name and an argument to
/// `userdel`/`systemctl`, so anything that could escape a directory or be read
/// as an option is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AppId(String);

impl AppId {
    pub fn new(id: impl Into<String>) -> Result<Self, LifecycleError> {
        let id = id.into();
        let reason = if id.is_empty() {
            Some("must not be empty")
        } else if id == "." || id == ".." {
            Some("must not be a relative directory name")
        } else if id.starts_with('-') {
            Some("must not start with '-'")
        } else if id.contains('/') {
            Some("must not contain '/'")
        } else if id.chars().any(|c| c.is_whitespace() || c == '\0') {
            Some("must not contain whitespace or NUL")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(LifecycleError::InvalidAppId { id, reason }),
            None => Ok(Self(id)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the systemd unit, e.g. `hello-pi.service`.
    pub fn unit_name(&self) -> String {
        format!("{}.service", self.0)
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Machine-wide resources owned by one application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemPaths {
    pub app_id: AppId,
    pub app_dir: PathBuf,
    pub applications_dir: PathBuf,
    pub desktop_entry: PathBuf,
    pub icon: PathBuf,
    pub unit_file: PathBuf,
    pub state_dir: PathBuf,
}

impl SystemPaths {
    /// Resolve every system resource under `root` (`/` on a live system).
    pub fn new(app_id: &AppId, root: &Path) -> Self {
        let id = app_id.as_str();
        let applications_dir = root.join("usr/share/applications");

        Self {
            app_id: app_id.clone(),
            app_dir: root.join("opt").join(id),
            desktop_entry: applications_dir.join(format!("{id}.desktop")),
            applications_dir,
            icon: root.join("usr/share/pixmaps").join(format!("{id}.png")),
            unit_file: root.join("etc/systemd/system").join(app_id.unit_name()),
            state_dir: root.join("var/lib").join(id),
        }
    }

    pub fn unit_name(&self) -> String {
        self.app_id.unit_name()
    }

    /// The service account shares the application's name.
    pub fn account(&self) -> &str {
        self.app_id.as_str()
    }
}

/// Resources a desktop user installs into their own home directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPaths {
    pub app_id: AppId,
    pub data_dir: PathBuf,
    pub desktop_entry: PathBuf,
}

impl UserPaths {
    pub fn new(app_id: &AppId, home: &Path) -> Self {
        let share = home.join(".local/share");
        Self {
            app_id: app_id.clone(),
            data_dir: share.join(app_id.as_str()),
            desktop_entry: share
                .join("applications")
                .join(format!("{}.desktop", app_id.as_str())),
        }
    }

    /// Resolve the invoking user's layout from their home directory.
    pub fn for_current_user(app_id: &AppId) -> Result<Self, LifecycleError> {
        let home = dirs::home_dir().ok_or(LifecycleError::HomeNotFound)?;
        Ok(Self::new(app_id, &home))
    }
}
