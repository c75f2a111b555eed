//! Linux service control using systemd (systemctl, journalctl)

use std::os::unix::process::ExitStatusExt;
use std::process::{ExitStatus, Stdio};

use nix::sys::signal::Signal;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

use crate::config::ToolConfig;
use crate::error::LifecycleError;
use crate::host::systemd;

/// Check if the unit is running via systemctl is-active
pub(super) fn check_status(tools: &ToolConfig, unit: &str) -> Result<bool, LifecycleError> {
    let output = systemd::run(&tools.systemctl, None, &["is-active", unit])?;

    // systemctl is-active returns:
    // - Exit 0 if active
    // - Exit 3 if inactive
    // - Other codes for other states
    Ok(output.status.success())
}

pub(super) fn start_service(tools: &ToolConfig, unit: &str) -> Result<(), LifecycleError> {
    systemd::systemctl(&tools.systemctl, None, &["start", unit])
}

pub(super) fn stop_service(tools: &ToolConfig, unit: &str) -> Result<(), LifecycleError> {
    systemd::systemctl(&tools.systemctl, None, &["stop", unit])
}

pub(super) fn restart_service(tools: &ToolConfig, unit: &str) -> Result<(), LifecycleError> {
    systemd::systemctl(&tools.systemctl, None, &["restart", unit])
}

/// Stream `journalctl -u <unit>` line by line to stdout.
pub(super) async fn follow_logs(
    tools: &ToolConfig,
    unit: &str,
    lines: u32,
    follow: bool,
) -> Result<(), LifecycleError> {
    let args = journal_args(unit, lines, follow);
    log::debug!("Running {} {}", tools.journalctl, args.join(" "));

    let mut child = Command::new(&tools.journalctl)
        .args(&args)
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| {
            LifecycleError::System(format!("Failed to execute {}: {e}", tools.journalctl))
        })?;

    let stdout = child.stdout.take().ok_or_else(|| {
        LifecycleError::System(format!("{} produced no stdout", tools.journalctl))
    })?;
    let mut reader = BufReader::new(stdout).lines();

    // One listener for the whole stream so a Ctrl-C between lines is not lost.
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            line = reader.next_line() => match line {
                Ok(Some(line)) => println!("{line}"),
                Ok(None) => break,
                Err(e) => {
                    return Err(LifecycleError::System(format!(
                        "Failed to read journal output: {e}"
                    )));
                }
            },
            _ = &mut ctrl_c => {
                log::debug!("Interrupted, stopping journal stream");
                let _ = child.kill().await;
                return Ok(());
            }
        }
    }

    // The terminal delivers SIGINT to journalctl too, which may close stdout
    // before the listener above fires.
    let status = tokio::select! {
        biased;
        _ = &mut ctrl_c => {
            log::debug!("Interrupted, stopping journal stream");
            let _ = child.kill().await;
            return Ok(());
        }
        status = child.wait() => status.map_err(|e| {
            LifecycleError::System(format!("Failed to wait for {}: {e}", tools.journalctl))
        })?,
    };
    if !ended_cleanly(status) {
        return Err(LifecycleError::System(format!(
            "{} exited with {status}",
            tools.journalctl
        )));
    }

    Ok(())
}

/// Success, or stopped by the same Ctrl-C that ends the stream.
fn ended_cleanly(status: ExitStatus) -> bool {
    status.success() || status.signal() == Some(Signal::SIGINT as i32)
}

fn journal_args(unit: &str, lines: u32, follow: bool) -> Vec<String> {
    let mut args = vec![
        "-u".to_string(),
        unit.to_string(),
        "-n".to_string(),
        lines.to_string(),
        "--no-pager".to_string(),
        "-o".to_string(),
        "short-iso".to_string(),
    ];
    if follow {
        args.push("-f".to_string());
    }
    args
}
