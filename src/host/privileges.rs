//! Privilege checking for machine-wide teardown.

/// Check if we are running with an effective uid of root.
///
/// Capabilities are not consulted: `userdel` and writes under `/etc` need
/// real root in practice.
#[inline]
pub(super) fn is_root() -> bool {
    nix::unistd::geteuid().is_root()
}
