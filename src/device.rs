//! Serial device discovery and resolution.
//!
//! Candidates are gathered from fixed filesystem locations partitioned by
//! provenance tier, then resolved by strict precedence: the first non-empty
//! tier decides. A collision at the decisive tier is fatal — picking the
//! first entry would silently drive the wrong hardware over serial.

use std::path::{Path, PathBuf};

use crate::error::SetupError;

/// Vendor substring identifying the monitor's USB-serial interface in
/// `/dev/serial/by-id` entries, matched case-insensitively.
pub const VENDOR_MATCH: &str = "espressif";

/// Marker naming a terminal device in a stable alias entry.
const TTY_MARKER: &str = "tty";

/// Kernel device-node prefixes for the two USB-serial adapter families.
const RAW_NODE_PREFIXES: [&str; 2] = ["ttyUSB", "ttyACM"];

/// Discovery tier, ordered by decreasing confidence that a path uniquely
/// identifies the intended device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// `/dev/serial/by-id` entry matching the vendor string.
    VendorAlias,
    /// Any `/dev/serial/by-id` entry carrying the terminal marker.
    GenericAlias,
    /// Raw `/dev/ttyUSB*` / `/dev/ttyACM*` node.
    RawNode,
}

/// Scans fixed filesystem locations for serial device candidates.
///
/// Scan roots are injectable so tests run against temp directories.
pub struct DeviceScanner {
    by_id_dir: PathBuf,
    dev_dir: PathBuf,
}

impl Default for DeviceScanner {
    fn default() -> Self {
        Self {
            by_id_dir: PathBuf::from("/dev/serial/by-id"),
            dev_dir: PathBuf::from("/dev"),
        }
    }
}

impl DeviceScanner {
    /// Scanner with explicit roots (tests).
    #[must_use]
    pub fn new(by_id_dir: PathBuf, dev_dir: PathBuf) -> Self {
        Self { by_id_dir, dev_dir }
    }

    /// Existing candidates at one tier, sorted by name so diagnostics are
    /// deterministic. A missing or unreadable directory yields an empty
    /// tier, never an error.
    #[must_use]
    pub fn scan(&self, tier: Tier) -> Vec<PathBuf> {
        let mut found = match tier {
            Tier::VendorAlias => list_matching(&self.by_id_dir, |name| {
                name.to_ascii_lowercase().contains(VENDOR_MATCH)
            }),
            Tier::GenericAlias => list_matching(&self.by_id_dir, |name| name.contains(TTY_MARKER)),
            Tier::RawNode => list_matching(&self.dev_dir, |name| {
                RAW_NODE_PREFIXES.iter().any(|p| name.starts_with(p))
            }),
        };
        // A by-id symlink can outlive its device node; drop dangling entries.
        found.retain(|p| p.exists());
        found.sort();
        found
    }

    /// Resolve exactly one device path.
    ///
    /// An override bypasses every tier but must exist. Otherwise tiers are
    /// walked in precedence order; at the first tier with candidates, one
    /// candidate wins and more than one is fatal. Later tiers are never
    /// consulted once a tier has candidates.
    ///
    /// # Errors
    ///
    /// [`SetupError::OverridePathNotFound`] for a missing override,
    /// [`SetupError::AmbiguousDevice`] for a collision at the decisive tier,
    /// [`SetupError::NoDeviceFound`] when every tier is empty.
    pub fn resolve(&self, override_path: Option<&Path>) -> Result<PathBuf, SetupError> {
        if let Some(path) = override_path {
            if !path.exists() {
                return Err(SetupError::OverridePathNotFound(path.to_path_buf()));
            }
            return Ok(path.to_path_buf());
        }

        for tier in [Tier::VendorAlias, Tier::GenericAlias, Tier::RawNode] {
            let mut candidates = self.scan(tier);
            match candidates.len() {
                0 => continue,
                1 => return Ok(candidates.remove(0)),
                _ => return Err(SetupError::AmbiguousDevice(candidates)),
            }
        }
        Err(SetupError::NoDeviceFound)
    }
}

fn list_matching(dir: &Path, keep: impl Fn(&str) -> bool) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    entries
        .flatten()
        .filter(|e| keep(&e.file_name().to_string_lossy()))
        .map(|e| e.path())
        .collect()
}
