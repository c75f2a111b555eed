//! Command-line arguments for the lifecycle binaries

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Options every binary accepts; all are optional.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Path to configuration file (default: /etc/hello-pi/lifecycle.toml if present)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Application identifier to operate on (default: hello-pi)
    #[arg(long, global = true)]
    pub app_id: Option<String>,
}

/// Options for commands that touch machine-wide paths
#[derive(Args, Debug, Clone, Default)]
pub struct SystemArgs {
    /// Resolve system paths under this root instead of /
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(name = "hello-pi-ctl")]
#[command(version, about = "hello-pi service manager")]
pub struct CtlArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub system: SystemArgs,

    #[command(subcommand)]
    pub sub: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Show service and installation status (Exit 0 = running, 1 = stopped)
    Status,
    /// Start the service (Exit 0 = success, 1 = failed)
    Start,
    /// Stop the service (Exit 0 = success, 1 = failed)
    Stop,
    /// Restart the service (Exit 0 = success, 1 = failed)
    Restart,
    /// Show the service journal
    Logs {
        /// Number of past lines to show
        #[arg(long, short = 'n', default_value_t = 200)]
        lines: u32,

        /// Print the past lines and exit instead of following
        #[arg(long)]
        no_follow: bool,
    },
    /// Remove the installation (system-wide unless --user)
    Uninstall {
        /// Remove only the invoking user's data and launcher
        #[arg(long)]
        user: bool,
    },
    /// Print the effective configuration
    Config,
}

/// `hello-pi-uninstall`: system-wide teardown, normally run with no arguments
#[derive(Parser, Debug)]
#[command(name = "hello-pi-uninstall")]
#[command(version, about = "Remove hello-pi from this machine (run as root)")]
pub struct SystemUninstallArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub system: SystemArgs,
}

/// `hello-pi-uninstall-user`: per-user teardown, normally run with no arguments
#[derive(Parser, Debug)]
#[command(name = "hello-pi-uninstall-user")]
#[command(version, about = "Remove hello-pi data and launcher from your home directory")]
pub struct UserUninstallArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}
