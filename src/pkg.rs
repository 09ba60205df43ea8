//! Package-manager collaborator.

use std::process::Output;

use anyhow::{Context, Result};

use crate::command_runner::{CommandRunner, DEFAULT_BUILD_TIMEOUT, TokioCommandRunner};

/// OS packages the agent runtime needs.
pub const REQUIRED_PACKAGES: [&str; 3] = ["python3", "python3-venv", "python3-pip"];

/// Narrow interface over the host package manager.
#[allow(async_fn_in_trait)]
pub trait PackageManager {
    /// Install `packages`; succeeds if they are already present.
    async fn ensure_installed(&self, packages: &[&str]) -> Result<Output>;
}

/// Production package manager — shells out to apt-get through a
/// [`CommandRunner`]. Generic over the runner so tests can inject a double.
pub struct Apt<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> Apt<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl Apt<TokioCommandRunner> {
    /// Convenience constructor for production use.
    #[must_use]
    pub fn default_runner() -> Self {
        Self::new(TokioCommandRunner::new(DEFAULT_BUILD_TIMEOUT))
    }
}

impl<R: CommandRunner> PackageManager for Apt<R> {
    async fn ensure_installed(&self, packages: &[&str]) -> Result<Output> {
        let mut args = vec!["install", "-y"];
        args.extend_from_slice(packages);
        self.runner
            .run("apt-get", &args)
            .await
            .context("apt-get install")
    }
}
