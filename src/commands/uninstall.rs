//! `hostmon uninstall` — best-effort removal; configuration is preserved.

use anyhow::Result;

use crate::layout::{HostLayout, SERVICE_NAME};
use crate::output::OutputContext;
use crate::systemd::ServiceManager;

/// Run `hostmon uninstall`.
///
/// Every removal tolerates absence and failure, so the command also cleans
/// up interrupted or partial installs. The configuration file is left in
/// place on purpose: reinstalling must not force the operator to
/// reconfigure.
pub async fn run(
    layout: &HostLayout,
    svc: &impl ServiceManager,
    ctx: &OutputContext,
) -> Result<()> {
    // Stop and deregister; fine if it was never registered.
    let _ = svc.disable_now(SERVICE_NAME).await;

    let unit_path = layout.unit_path();
    if unit_path.exists() {
        let _ = std::fs::remove_file(&unit_path);
        ctx.success(&format!(
            "Removed service registration {}",
            unit_path.display()
        ));
    }
    let _ = svc.daemon_reload().await;

    if layout.program_dir.exists() {
        let _ = std::fs::remove_dir_all(&layout.program_dir);
        ctx.success(&format!("Removed {}", layout.program_dir.display()));
    }

    ctx.info(&format!(
        "Configuration preserved at {}",
        layout.config_path().display()
    ));
    Ok(())
}
