//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;
use crate::device::DeviceScanner;
use crate::layout::HostLayout;
use crate::output::OutputContext;
use crate::pkg::Apt;
use crate::systemd::Systemctl;
use crate::venv::VenvBuilder;

/// Setup tool for the ThinkLab host monitor agent
#[derive(Parser)]
#[command(
    name = "hostmon",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Install the agent and register its service
    Install(commands::install::InstallArgs),

    /// Remove the agent and its service (configuration is preserved)
    Uninstall,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if a fatal precondition fails or an install step
    /// cannot complete.
    pub async fn run(self) -> Result<()> {
        let Cli { quiet, no_color, command } = self;
        let ctx = OutputContext::new(no_color, quiet);
        let layout = HostLayout::default();
        match command {
            Command::Install(args) => {
                crate::privilege::require_root()?;
                let pkg = Apt::default_runner();
                let venv = VenvBuilder::default_runner();
                let systemd = Systemctl::default_runner();
                let scanner = DeviceScanner::default();
                commands::install::run(&args, &layout, &scanner, &pkg, &venv, &systemd, &ctx).await
            }
            Command::Uninstall => {
                let systemd = Systemctl::default_runner();
                commands::uninstall::run(&layout, &systemd, &ctx).await
            }
        }
    }
}
