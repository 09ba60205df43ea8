//! Isolated-runtime collaborator (Python virtual environment).

use std::path::Path;
use std::process::Output;

use anyhow::{Context, Result};

use crate::command_runner::{CommandRunner, DEFAULT_BUILD_TIMEOUT, TokioCommandRunner};

/// Libraries installed into the agent's environment.
pub const VENV_PACKAGES: [&str; 2] = ["pyserial", "pyyaml"];

/// Narrow interface over the isolated-runtime builder.
#[allow(async_fn_in_trait)]
pub trait RuntimeBuilder {
    /// Create a fresh environment at `dir`.
    async fn create_env(&self, dir: &Path) -> Result<Output>;

    /// Install `libs` into the environment whose pip lives at `pip`.
    async fn install_libs(&self, pip: &Path, libs: &[&str]) -> Result<Output>;
}

/// Production runtime builder — drives `python3 -m venv` and the venv's own
/// pip through a [`CommandRunner`].
pub struct VenvBuilder<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> VenvBuilder<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl VenvBuilder<TokioCommandRunner> {
    /// Convenience constructor for production use.
    #[must_use]
    pub fn default_runner() -> Self {
        Self::new(TokioCommandRunner::new(DEFAULT_BUILD_TIMEOUT))
    }
}

impl<R: CommandRunner> RuntimeBuilder for VenvBuilder<R> {
    async fn create_env(&self, dir: &Path) -> Result<Output> {
        let dir_arg = dir.to_string_lossy();
        self.runner
            .run("python3", &["-m", "venv", &dir_arg])
            .await
            .context("python3 -m venv")
    }

    async fn install_libs(&self, pip: &Path, libs: &[&str]) -> Result<Output> {
        let pip_arg = pip.to_string_lossy();
        let mut args = vec!["install", "--upgrade"];
        args.extend_from_slice(libs);
        self.runner
            .run(&pip_arg, &args)
            .await
            .context("pip install")
    }
}
