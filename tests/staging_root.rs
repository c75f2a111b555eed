//! A staging root must reach the host tools, never the running system.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use hello_pi_lifecycle::config::ToolConfig;
use hello_pi_lifecycle::{HostOps, SystemHost};

/// Stand-in tool that appends its arguments to `log`.
fn recording_tool(dir: &Path, name: &str, log: &Path, listing: &str) -> String {
    let path = dir.join(name);
    let script = format!(
        "#!/bin/sh\necho \"$*\" >> '{}'\ncase \"$*\" in *list-unit-files*) echo '{listing}' ;; esac\n",
        log.display()
    );
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn staged_host_passes_the_root_to_every_tool() {
    let tmp = tempfile::tempdir().unwrap();
    let bin = tmp.path().join("bin");
    let image = tmp.path().join("image");
    fs::create_dir_all(&bin).unwrap();
    fs::create_dir_all(image.join("etc")).unwrap();
    fs::write(
        image.join("etc/passwd"),
        "root:x:0:0:root:/root:/bin/sh\nhello-pi:x:998:998::/var/lib/hello-pi:/usr/sbin/nologin\n",
    )
    .unwrap();
    let log = tmp.path().join("calls.log");

    let tools = ToolConfig {
        systemctl: recording_tool(&bin, "systemctl", &log, "hello-pi.service disabled enabled"),
        userdel: recording_tool(&bin, "userdel", &log, ""),
        ..ToolConfig::default()
    };
    let host = SystemHost::new(tools).with_root(&image);

    assert!(!host.manages_live_system());
    assert!(host.unit_registered("hello-pi.service").unwrap());
    host.disable_unit("hello-pi.service").unwrap();
    assert!(host.account_exists("hello-pi"));
    assert!(!host.account_exists("root-less"));
    host.delete_account("hello-pi").unwrap();

    let image = image.display();
    let calls = fs::read_to_string(&log).unwrap();
    assert_eq!(
        calls.lines().collect::<Vec<_>>(),
        [
            format!("--root={image} list-unit-files --no-legend --no-pager hello-pi.service"),
            format!("--root={image} disable hello-pi.service"),
            format!("--root {image} hello-pi"),
        ]
    );
}
