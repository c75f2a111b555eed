use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::LifecycleError;
use crate::paths::{AppId, DEFAULT_APP_ID, SystemPaths};

/// Consulted when no `--config` is given; absence is not an error.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/hello-pi/lifecycle.toml";

/// Top-level lifecycle configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    pub app_id: String,
    /// Prefix every system path is resolved under.
    pub root: PathBuf,
    pub tools: ToolConfig,
}

/// External programs the host layer shells out to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub systemctl: String,
    pub journalctl: String,
    pub userdel: String,
    pub desktop_database: String,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            app_id: DEFAULT_APP_ID.to_string(),
            root: PathBuf::from("/"),
            tools: ToolConfig::default(),
        }
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            systemctl: "systemctl".to_string(),
            journalctl: "journalctl".to_string(),
            userdel: "userdel".to_string(),
            desktop_database: "update-desktop-database".to_string(),
        }
    }
}

impl LifecycleConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist and parse. Without one, the default
    /// location is used if present and built-in defaults otherwise. Nothing
    /// is ever written back: teardown must not create files.
    pub fn load(explicit: Option<&Path>) -> Result<Self, LifecycleError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.is_file() {
                    Self::from_file(default_path)
                } else {
                    log::debug!("No config at {DEFAULT_CONFIG_PATH}, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, LifecycleError> {
        let raw = fs::read_to_string(path).map_err(|e| LifecycleError::Config {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        let cfg = Self::from_toml(&raw).map_err(|e| LifecycleError::Config {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        log::info!("Using config from: {}", path.display());
        Ok(cfg)
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Apply command-line overrides on top of the file values.
    pub fn with_overrides(mut self, app_id: Option<String>, root: Option<PathBuf>) -> Self {
        if let Some(app_id) = app_id {
            self.app_id = app_id;
        }
        if let Some(root) = root {
            self.root = root;
        }
        self
    }

    pub fn app_id(&self) -> Result<AppId, LifecycleError> {
        AppId::new(self.app_id.as_str())
    }

    /// Whether system paths point at an offline image rather than this host.
    pub fn is_staged(&self) -> bool {
        self.root != Path::new("/")
    }

    pub fn system_paths(&self) -> Result<SystemPaths, LifecycleError> {
        Ok(SystemPaths::new(&self.app_id()?, &self.root))
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
