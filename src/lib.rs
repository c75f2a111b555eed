//! hello-pi lifecycle library
//!
//! Idempotent teardown of the hello-pi service installation, plus the service
//! control and installation detection the `hello-pi-ctl` binary exposes.

pub mod cli;
pub mod config;
pub mod control;
pub mod detection;
pub mod error;
pub mod host;
pub mod logging;
pub mod paths;
pub mod uninstall;

// Public exports
pub use config::LifecycleConfig;
pub use detection::{InstallationState, check_installation_state};
pub use error::LifecycleError;
pub use host::{HostOps, SystemHost};
pub use paths::{AppId, SystemPaths, UserPaths};
pub use uninstall::{Step, StepOutcome, UninstallReport, uninstall_system, uninstall_user};

use cli::{CommonArgs, SystemArgs};

/// Load configuration and apply command-line overrides.
pub fn resolve_config(
    common: &CommonArgs,
    system: Option<&SystemArgs>,
) -> Result<LifecycleConfig, LifecycleError> {
    let cfg = LifecycleConfig::load(common.config.as_deref())?;
    Ok(cfg.with_overrides(
        common.app_id.clone(),
        system.and_then(|s| s.root.clone()),
    ))
}

/// Run the system-wide teardown, printing to stdout.
///
/// A configured root other than `/` tears down that image offline.
pub fn run_system_uninstall(cfg: &LifecycleConfig) -> Result<UninstallReport, LifecycleError> {
    let paths = cfg.system_paths()?;
    let host = SystemHost::new(cfg.tools.clone()).with_root(&cfg.root);
    uninstall_system(&paths, &host, &mut std::io::stdout().lock())
}

/// Run the per-user teardown for the invoking user, printing to stdout.
pub fn run_user_uninstall(cfg: &LifecycleConfig) -> Result<UninstallReport, LifecycleError> {
    let paths = UserPaths::for_current_user(&cfg.app_id()?)?;
    uninstall_user(&paths, &mut std::io::stdout().lock())
}
