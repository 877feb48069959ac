use is_root::is_root;
use netlens_common::network::target::Platform;
use tracing::warn;

/// Whether the process runs as root (Unix) or as an administrator (Windows).
pub fn has_elevated_privileges() -> bool {
    is_root()
}

/// Logs a warning when path tracing is likely to be refused by the host.
///
/// Returns whether elevated privileges are held.
pub fn warn_if_unprivileged(platform: Platform) -> bool {
    let elevated: bool = has_elevated_privileges();
    if !elevated {
        match platform {
            Platform::Windows => {
                warn!("Not running with administrator privileges. Traceroute may not work.")
            }
            Platform::Unix => warn!("Not running as root. Traceroute may not work."),
        }
    }
    elevated
}
