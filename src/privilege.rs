//! Effective-uid check for commands that mutate host state.

use anyhow::Result;

use crate::error::SetupError;

/// Require that the process runs with effective uid 0.
///
/// # Errors
///
/// Returns [`SetupError::NotRoot`] when not running as root.
pub fn require_root() -> Result<()> {
    if !is_root() {
        return Err(SetupError::NotRoot.into());
    }
    Ok(())
}

/// True when the effective uid is 0.
#[must_use]
#[allow(unsafe_code)] // geteuid has no failure modes and touches no memory
pub fn is_root() -> bool {
    unsafe { libc::geteuid() == 0 }
}
