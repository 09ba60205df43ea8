//! Managed host paths and installation-state inspection.

use std::path::{Path, PathBuf};

/// Systemd unit name under which the agent runs.
pub const SERVICE_NAME: &str = "hl-hostmon";

/// Agent script filename inside the program directory.
pub const AGENT_FILENAME: &str = "hostmon.py";

/// Explicit handle for every host path the installer owns.
///
/// All mutations go through this handle so the full managed-resource set is
/// visible in one place, and tests can rebase it under a temp root.
#[derive(Debug, Clone)]
pub struct HostLayout {
    pub program_dir: PathBuf,
    pub config_dir: PathBuf,
    pub unit_dir: PathBuf,
}

impl Default for HostLayout {
    fn default() -> Self {
        Self {
            program_dir: PathBuf::from("/opt/hl-hostmon"),
            config_dir: PathBuf::from("/etc/hl-hostmon"),
            unit_dir: PathBuf::from("/etc/systemd/system"),
        }
    }
}

impl HostLayout {
    /// Rebase every managed path under `root` (tests).
    #[must_use]
    pub fn with_root(root: &Path) -> Self {
        Self {
            program_dir: root.join("opt/hl-hostmon"),
            config_dir: root.join("etc/hl-hostmon"),
            unit_dir: root.join("etc/systemd/system"),
        }
    }

    #[must_use]
    pub fn agent_path(&self) -> PathBuf {
        self.program_dir.join(AGENT_FILENAME)
    }

    #[must_use]
    pub fn venv_dir(&self) -> PathBuf {
        self.program_dir.join("venv")
    }

    #[must_use]
    pub fn venv_python(&self) -> PathBuf {
        self.venv_dir().join("bin/python")
    }

    #[must_use]
    pub fn venv_pip(&self) -> PathBuf {
        self.venv_dir().join("bin/pip")
    }

    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join("config.yaml")
    }

    #[must_use]
    pub fn unit_path(&self) -> PathBuf {
        self.unit_dir.join(format!("{SERVICE_NAME}.service"))
    }

    /// Presence of each managed resource, by direct existence check.
    /// Pure query; presence alone gates whether the installer skips a step.
    #[must_use]
    pub fn inspect(&self) -> InstallState {
        InstallState {
            program_dir: self.program_dir.exists(),
            venv: self.venv_dir().exists(),
            config: self.config_path().exists(),
            unit: self.unit_path().exists(),
        }
    }
}

/// Snapshot of which managed resources currently exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallState {
    pub program_dir: bool,
    pub venv: bool,
    pub config: bool,
    pub unit: bool,
}
