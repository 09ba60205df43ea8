//! Typed fatal errors for the setup CLI.
//!
//! Every variant is a non-recoverable precondition failure. None are retried
//! internally; the documented recovery is operator action (attach or detach
//! hardware, pass `--serial`, rerun).

use std::path::PathBuf;

use thiserror::Error;

/// Fatal setup preconditions.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("this command must be run as root (try: sudo hostmon install)")]
    NotRoot,

    #[error("systemd is required but systemctl did not respond")]
    SystemdMissing,

    #[error("serial override path does not exist: {0}")]
    OverridePathNotFound(PathBuf),

    #[error(
        "multiple serial candidates found; pass --serial <path> to pick one:\n{}",
        candidate_list(.0)
    )]
    AmbiguousDevice(Vec<PathBuf>),

    #[error("no serial device found; attach the monitor or pass --serial <path>")]
    NoDeviceFound,
}

fn candidate_list(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("  {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n")
}
