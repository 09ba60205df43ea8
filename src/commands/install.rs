//! `hostmon install` — bring the host to the installed target state.
//!
//! Every step is idempotent; a failure aborts the sequence and a rerun
//! repairs whatever the aborted run left behind. Device resolution happens
//! before the configuration is written, so a detection failure never
//! clobbers an existing config.

use std::path::PathBuf;
use std::process::Output;

use anyhow::{Context, Result};
use clap::Args;

use crate::config::AgentConfig;
use crate::device::DeviceScanner;
use crate::error::SetupError;
use crate::layout::{HostLayout, SERVICE_NAME};
use crate::output::{OutputContext, progress};
use crate::pkg::{PackageManager, REQUIRED_PACKAGES};
use crate::systemd::{ServiceManager, render_unit};
use crate::venv::{RuntimeBuilder, VENV_PACKAGES};

/// Embedded agent script, placed into the program directory on every run.
pub const AGENT_SOURCE: &str = include_str!("../../assets/hostmon.py");

/// Arguments for `hostmon install`.
#[derive(Args)]
pub struct InstallArgs {
    /// Overwrite the existing runtime environment and configuration file
    #[arg(long)]
    pub force: bool,

    /// Enable debug logging and payload tracing in the generated config
    #[arg(long)]
    pub trace: bool,

    /// Serial device path; skips discovery (the path must exist)
    #[arg(long, value_name = "PATH")]
    pub serial: Option<PathBuf>,
}

/// Run `hostmon install`.
///
/// # Errors
///
/// Returns an error on any fatal precondition (systemd missing, device
/// resolution failure) or when an install step fails. Nothing is rolled
/// back; rerunning repairs state.
pub async fn run(
    args: &InstallArgs,
    layout: &HostLayout,
    scanner: &DeviceScanner,
    pkg: &impl PackageManager,
    venv: &impl RuntimeBuilder,
    svc: &impl ServiceManager,
    ctx: &OutputContext,
) -> Result<()> {
    if !svc.available().await {
        return Err(SetupError::SystemdMissing.into());
    }

    let state = layout.inspect();

    // 1. Directories — cheap, always safe to repeat.
    std::fs::create_dir_all(&layout.program_dir)
        .with_context(|| format!("creating {}", layout.program_dir.display()))?;
    std::fs::create_dir_all(&layout.config_dir)
        .with_context(|| format!("creating {}", layout.config_dir.display()))?;

    // 2. OS packages.
    let pb = ctx
        .show_progress()
        .then(|| progress::spinner("Installing system packages..."));
    let output = pkg.ensure_installed(&REQUIRED_PACKAGES).await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    ensure_success(&output?, "package installation")?;
    ctx.success("System packages present");

    // 3. Agent program file — small, replaced every run so upgrades stick.
    let agent_path = layout.agent_path();
    std::fs::write(&agent_path, AGENT_SOURCE)
        .with_context(|| format!("writing {}", agent_path.display()))?;
    ctx.success(&format!("Agent placed at {}", agent_path.display()));

    // 4. Isolated runtime — expensive, skipped when present and not forced.
    if state.venv && !args.force {
        ctx.info("Runtime environment already present (use --force to recreate)");
    } else {
        if state.venv {
            std::fs::remove_dir_all(layout.venv_dir())
                .with_context(|| format!("removing {}", layout.venv_dir().display()))?;
        }
        let pb = ctx
            .show_progress()
            .then(|| progress::spinner("Creating runtime environment..."));
        let result = build_runtime(venv, layout).await;
        if let Some(pb) = pb {
            match &result {
                Ok(()) => progress::finish_ok(&pb, "Runtime environment ready"),
                Err(_) => pb.finish_and_clear(),
            }
        }
        result?;
        if !ctx.show_progress() {
            ctx.success("Runtime environment ready");
        }
    }

    // 5. Device resolution gates configuration generation.
    let device = scanner.resolve(args.serial.as_deref())?;
    ctx.success(&format!("Serial device: {}", device.display()));

    // 6. Configuration — operator edits survive unforced reruns.
    let config_path = layout.config_path();
    if state.config && !args.force {
        ctx.info(&format!(
            "Keeping existing configuration at {}",
            config_path.display()
        ));
    } else {
        AgentConfig::new(device, args.trace).write(&config_path)?;
        ctx.success(&format!(
            "Configuration written to {}",
            config_path.display()
        ));
    }

    // 7. Unit file — re-rendered every run so it reflects current paths.
    let unit_path = layout.unit_path();
    std::fs::write(&unit_path, render_unit(layout))
        .with_context(|| format!("writing {}", unit_path.display()))?;

    // 8. Register for boot and start immediately.
    ensure_success(&svc.daemon_reload().await?, "systemctl daemon-reload")?;
    ensure_success(&svc.enable_now(SERVICE_NAME).await?, "service start")?;
    ctx.success(&format!("Service {SERVICE_NAME} enabled and started"));

    Ok(())
}

async fn build_runtime(venv: &impl RuntimeBuilder, layout: &HostLayout) -> Result<()> {
    let venv_dir = layout.venv_dir();
    ensure_success(&venv.create_env(&venv_dir).await?, "runtime creation")?;
    ensure_success(
        &venv.install_libs(&layout.venv_pip(), &VENV_PACKAGES).await?,
        "runtime library installation",
    )?;
    Ok(())
}

fn ensure_success(output: &Output, what: &str) -> Result<()> {
    if output.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("{what} failed: {}", stderr.trim())
}
