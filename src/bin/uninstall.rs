//! System-wide uninstaller
//!
//! Exits 1 only when not run as root or when configuration is unusable;
//! individual teardown step failures are logged and do not change the exit code.

use clap::Parser;
use hello_pi_lifecycle::cli::SystemUninstallArgs;
use hello_pi_lifecycle::{logging, resolve_config, run_system_uninstall};

fn main() {
    logging::init();
    let args = SystemUninstallArgs::parse();

    let result =
        resolve_config(&args.common, Some(&args.system)).and_then(|cfg| run_system_uninstall(&cfg));

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
