//! Exit codes and output of the uninstaller binaries.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn uninstall_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_hello-pi-uninstall"))
}

fn uninstall_user_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_hello-pi-uninstall-user"))
}

/// Config file that keeps the run away from `/etc/hello-pi/lifecycle.toml`.
fn write_config(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("lifecycle.toml");
    fs::write(&path, body).unwrap();
    path
}

fn run(bin: &Path, args: &[&Path], home: &Path) -> Output {
    Command::new(bin)
        .args(args)
        .env("HOME", home)
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("spawn {}: {e}", bin.display()))
}

fn combined(output: &Output) -> String {
    format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

#[test]
fn user_uninstall_exits_zero_and_is_silent_about_absent_paths() {
    let tmp = tempfile::tempdir().unwrap();
    let home = tmp.path().join("home");
    let data = home.join(".local/share/hello-pi");
    let launcher = home.join(".local/share/applications/hello-pi.desktop");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("settings.json"), "{}").unwrap();
    fs::create_dir_all(launcher.parent().unwrap()).unwrap();
    fs::write(&launcher, "[Desktop Entry]\n").unwrap();
    let config = write_config(tmp.path(), "");

    let first = run(
        &uninstall_user_bin(),
        &[Path::new("--config"), config.as_path()],
        &home,
    );
    assert!(first.status.success(), "{}", combined(&first));
    assert!(!data.exists());
    assert!(!launcher.exists());

    let second = run(
        &uninstall_user_bin(),
        &[Path::new("--config"), config.as_path()],
        &home,
    );
    assert_eq!(second.status.code(), Some(0));
    let text = combined(&second);
    assert!(!text.contains(&data.display().to_string()), "{text}");
    assert!(!text.contains(&launcher.display().to_string()), "{text}");
    assert!(String::from_utf8_lossy(&second.stdout).contains("hello-pi removed."));
}

#[test]
fn system_uninstall_exit_code_depends_only_on_privilege() {
    let tmp = tempfile::tempdir().unwrap();
    let image = tmp.path().join("image");
    let unit = image.join("etc/systemd/system/hello-pi.service");
    let app = image.join("opt/hello-pi/bin");
    fs::create_dir_all(unit.parent().unwrap()).unwrap();
    fs::write(&unit, "[Service]\n").unwrap();
    fs::create_dir_all(&app).unwrap();
    fs::write(app.join("x"), "#!/bin/sh\n").unwrap();
    // Every tool is missing, so each host step fails and is tolerated.
    let config = write_config(
        tmp.path(),
        r#"
        [tools]
        systemctl = "/nonexistent/systemctl"
        userdel = "/nonexistent/userdel"
        desktop_database = "/nonexistent/update-desktop-database"
        "#,
    );

    let output = run(
        &uninstall_bin(),
        &[Path::new("--config"), config.as_path(), Path::new("--root"), image.as_path()],
        tmp.path(),
    );

    if nix::unistd::geteuid().is_root() {
        assert_eq!(output.status.code(), Some(0), "{}", combined(&output));
        assert!(!unit.exists());
        assert!(!image.join("opt/hello-pi").exists());
    } else {
        assert_eq!(output.status.code(), Some(1));
        assert!(unit.exists());
        assert!(app.join("x").exists());
        assert!(String::from_utf8_lossy(&output.stderr).contains("must be run as root"));
        assert!(output.stdout.is_empty());
    }
}
