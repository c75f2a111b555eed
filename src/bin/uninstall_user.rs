//! Per-user uninstaller; needs no privilege

use clap::Parser;
use hello_pi_lifecycle::cli::UserUninstallArgs;
use hello_pi_lifecycle::{logging, resolve_config, run_user_uninstall};

fn main() {
    logging::init();
    let args = UserUninstallArgs::parse();

    let result = resolve_config(&args.common, None).and_then(|cfg| run_user_uninstall(&cfg));

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
