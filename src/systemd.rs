//! Service-manager collaborator and unit rendering.

use std::process::Output;

use anyhow::{Context, Result};

use crate::command_runner::{CommandRunner, DEFAULT_CMD_TIMEOUT, TokioCommandRunner};
use crate::layout::HostLayout;

/// Narrow interface over the host service manager.
#[allow(async_fn_in_trait)]
pub trait ServiceManager {
    /// True when systemctl answers a version probe.
    async fn available(&self) -> bool;

    /// Reload unit definitions from disk.
    async fn daemon_reload(&self) -> Result<Output>;

    /// Enable the unit for boot and start it now.
    async fn enable_now(&self, unit: &str) -> Result<Output>;

    /// Stop the unit and remove it from boot.
    async fn disable_now(&self, unit: &str) -> Result<Output>;
}

/// Production service manager — routes all systemctl calls through a
/// [`CommandRunner`].
pub struct Systemctl<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> Systemctl<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl Systemctl<TokioCommandRunner> {
    /// Convenience constructor for production use.
    #[must_use]
    pub fn default_runner() -> Self {
        Self::new(TokioCommandRunner::new(DEFAULT_CMD_TIMEOUT))
    }
}

impl<R: CommandRunner> ServiceManager for Systemctl<R> {
    async fn available(&self) -> bool {
        self.runner
            .run("systemctl", &["--version"])
            .await
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    async fn daemon_reload(&self) -> Result<Output> {
        self.runner
            .run("systemctl", &["daemon-reload"])
            .await
            .context("systemctl daemon-reload")
    }

    async fn enable_now(&self, unit: &str) -> Result<Output> {
        self.runner
            .run("systemctl", &["enable", "--now", unit])
            .await
            .context("systemctl enable")
    }

    async fn disable_now(&self, unit: &str) -> Result<Output> {
        self.runner
            .run("systemctl", &["disable", "--now", unit])
            .await
            .context("systemctl disable")
    }
}

/// Render the unit definition for the current layout.
///
/// Re-rendered on every install so the unit always reflects current paths.
#[must_use]
pub fn render_unit(layout: &HostLayout) -> String {
    format!(
        "[Unit]\n\
         Description=ThinkLab host monitor agent\n\
         After=network.target\n\
         \n\
         [Service]\n\
         Type=simple\n\
         User=root\n\
         WorkingDirectory={workdir}\n\
         Environment=PYTHONUNBUFFERED=1\n\
         ExecStart={python} {agent} --config {config}\n\
         Restart=always\n\
         RestartSec=5\n\
         \n\
         [Install]\n\
         WantedBy=multi-user.target\n",
        workdir = layout.program_dir.display(),
        python = layout.venv_python().display(),
        agent = layout.agent_path().display(),
        config = layout.config_path().display(),
    )
}
