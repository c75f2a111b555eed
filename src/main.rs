use anyhow::{Context, Result, bail};
use clap::Parser;
use log::error;

use hello_pi_lifecycle::cli::{CtlArgs, Cmd};
use hello_pi_lifecycle::detection::{inspect, summarize};
use hello_pi_lifecycle::{
    LifecycleConfig, SystemHost, control, logging, resolve_config, run_system_uninstall,
    run_user_uninstall,
};

fn main() {
    logging::init();
    let args = CtlArgs::parse();

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("FATAL: Failed to create Tokio runtime: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = rt.block_on(real_main(args)) {
        error!("{e:#}");
        std::process::exit(1);
    }
}

async fn real_main(args: CtlArgs) -> Result<()> {
    let cfg = resolve_config(&args.common, Some(&args.system))
        .context("Failed to resolve configuration")?;

    match args.sub {
        Cmd::Status => handle_status(&cfg),
        Cmd::Start => {
            require_live(&cfg)?;
            handle_start(&cfg)
        }
        Cmd::Stop => {
            require_live(&cfg)?;
            handle_stop(&cfg)
        }
        Cmd::Restart => {
            require_live(&cfg)?;
            handle_restart(&cfg)
        }
        Cmd::Logs { lines, no_follow } => {
            require_live(&cfg)?;
            let paths = cfg.system_paths()?;
            control::follow_logs(&cfg.tools, &paths, lines, !no_follow)
                .await
                .context("Failed to read service journal")
        }
        Cmd::Uninstall { user } => handle_uninstall(&cfg, user),
        Cmd::Config => {
            let rendered = cfg
                .to_toml()
                .context("Failed to serialize configuration")?;
            print!("{rendered}");
            Ok(())
        }
    }
}

/// Service control talks to the running manager, which a staged image lacks.
fn require_live(cfg: &LifecycleConfig) -> Result<()> {
    if cfg.is_staged() {
        bail!(
            "{} is a staging root; service control needs the live system",
            cfg.root.display()
        );
    }
    Ok(())
}

/// Handle status command - print resource presence and whether the unit runs
fn handle_status(cfg: &LifecycleConfig) -> Result<()> {
    let paths = cfg.system_paths()?;
    let host = SystemHost::new(cfg.tools.clone()).with_root(&cfg.root);

    let statuses = inspect(&paths, &host);
    println!("{}: {}", paths.app_id, summarize(&statuses));
    for status in &statuses {
        let mark = if status.present { "present" } else { "absent " };
        println!("  [{mark}] {}", status.resource);
    }

    if cfg.is_staged() {
        std::process::exit(0);
    }

    match control::check_status(&cfg.tools, &paths) {
        Ok(true) => {
            println!("{} is running", paths.unit_name());
            std::process::exit(0);
        }
        Ok(false) => {
            println!("{} is stopped", paths.unit_name());
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error checking status: {e}");
            std::process::exit(1);
        }
    }
}

/// Handle start command - start the service
fn handle_start(cfg: &LifecycleConfig) -> Result<()> {
    let paths = cfg.system_paths()?;
    match control::start_service(&cfg.tools, &paths) {
        Ok(()) => {
            println!("{} started successfully", paths.unit_name());
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Failed to start: {e}");
            std::process::exit(1);
        }
    }
}

/// Handle stop command - stop the service
fn handle_stop(cfg: &LifecycleConfig) -> Result<()> {
    let paths = cfg.system_paths()?;
    match control::stop_service(&cfg.tools, &paths) {
        Ok(()) => {
            println!("{} stopped successfully", paths.unit_name());
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Failed to stop: {e}");
            std::process::exit(1);
        }
    }
}

/// Handle restart command - restart the service
fn handle_restart(cfg: &LifecycleConfig) -> Result<()> {
    let paths = cfg.system_paths()?;
    match control::restart_service(&cfg.tools, &paths) {
        Ok(()) => {
            println!("{} restarted successfully", paths.unit_name());
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Failed to restart: {e}");
            std::process::exit(1);
        }
    }
}

/// Handle uninstall command - same teardown as the standalone uninstallers
fn handle_uninstall(cfg: &LifecycleConfig, user: bool) -> Result<()> {
    let report = if user {
        run_user_uninstall(cfg)
    } else {
        run_system_uninstall(cfg)
    };

    match report {
        Ok(_) => Ok(()),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
