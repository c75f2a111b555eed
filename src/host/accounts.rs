//! Service account lookup and removal.

use std::fs;
use std::path::Path;
use std::process::Command;

use crate::error::LifecycleError;

/// Check whether a user with this name resolves in the account database.
///
/// With a staging root only the image's own `etc/passwd` is consulted.
pub(super) fn account_exists(root: Option<&Path>, name: &str) -> bool {
    if let Some(root) = root {
        return fs::read_to_string(root.join("etc/passwd"))
            .map(|passwd| passwd_contains(&passwd, name))
            .unwrap_or(false);
    }

    #[cfg(target_os = "linux")]
    {
        users::get_user_by_name(name).is_some()
    }

    #[cfg(not(target_os = "linux"))]
    {
        matches!(nix::unistd::User::from_name(name), Ok(Some(_)))
    }
}

/// Delete the account with `userdel` (`userdel --root <dir>` for an image).
///
/// The home directory is deliberately left to the caller: the state directory
/// is removed explicitly before this runs.
pub(super) fn delete_account(
    userdel: &str,
    root: Option<&Path>,
    name: &str,
) -> Result<(), LifecycleError> {
    let mut cmd = Command::new(userdel);
    if let Some(root) = root {
        cmd.arg("--root").arg(root);
    }
    cmd.arg(name);

    log::debug!("Running {cmd:?}");
    let output = cmd
        .output()
        .map_err(|e| LifecycleError::System(format!("Failed to execute {userdel}: {e}")))?;

    if !output.status.success() {
        return Err(LifecycleError::System(format!(
            "Failed to delete user {name}: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    Ok(())
}

fn passwd_contains(passwd: &str, name: &str) -> bool {
    passwd
        .lines()
        .filter(|line| !line.starts_with('#'))
        .filter_map(|line| line.split(':').next())
        .any(|user| user == name)
}

#[cfg(test)]
mod tests {
    use super::passwd_contains;

    #[test]
    fn passwd_lookup_matches_whole_names() {
        let passwd = "root:x:0:0:root:/root:/bin/bash\n\
                      hello-pi:x:998:998::/var/lib/hello-pi:/usr/sbin/nologin\n";
        assert!(passwd_contains(passwd, "hello-pi"));
        assert!(!passwd_contains(passwd, "hello"));
        assert!(!passwd_contains("#hello-pi:x:1:1::/:/bin/sh\n", "hello-pi"));
    }
}
