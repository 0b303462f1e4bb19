//! # relayhub-adapter-gpio-sysfs
//!
//! Drives relay output lines through the Linux GPIO sysfs interface
//! (`/sys/class/gpio`).
//!
//! ## Layout
//!
//! | Path | Use |
//! |------|-----|
//! | `{root}/export` | write a line number to make `gpio{line}` appear |
//! | `{root}/gpio{line}/direction` | set to `out` once at startup |
//! | `{root}/gpio{line}/value` | `1` / `0` on every relay switch |
//!
//! ## Dependency rule
//!
//! Depends on `relayhub-app` (port traits) and `relayhub-domain` only.

mod error;

use std::fs;
use std::path::PathBuf;

use relayhub_app::ports::RelayOutput;
use relayhub_domain::error::RelayHubError;

pub use error::GpioError;

/// Default sysfs GPIO mount point.
pub const DEFAULT_ROOT: &str = "/sys/class/gpio";

/// Output lines backed by sysfs GPIO files.
#[derive(Debug, Clone)]
pub struct SysfsGpio {
    root: PathBuf,
    active_low: bool,
}

impl SysfsGpio {
    /// `active_low` inverts every written level, for relay boards that
    /// energise the coil when the line is pulled low.
    pub fn new(root: impl Into<PathBuf>, active_low: bool) -> Self {
        Self {
            root: root.into(),
            active_low,
        }
    }

    /// Export every line that is not exported yet and configure it as an
    /// output.
    ///
    /// # Errors
    ///
    /// Returns [`GpioError::Export`] or [`GpioError::Direction`] for the
    /// first line that cannot be prepared.
    pub fn prepare(&self, lines: &[u32]) -> Result<(), GpioError> {
        for &line in lines {
            if !self.line_dir(line).is_dir() {
                fs::write(self.root.join("export"), line.to_string())
                    .map_err(|source| GpioError::Export { line, source })?;
                tracing::debug!(line, "exported gpio line");
            }
            fs::write(self.line_dir(line).join("direction"), "out")
                .map_err(|source| GpioError::Direction { line, source })?;
        }
        tracing::info!(lines = lines.len(), root = %self.root.display(), "gpio lines prepared");
        Ok(())
    }

    fn line_dir(&self, line: u32) -> PathBuf {
        self.root.join(format!("gpio{line}"))
    }
}

impl RelayOutput for SysfsGpio {
    fn write(&self, line: u32, level: bool) -> Result<(), RelayHubError> {
        let physical = level != self.active_low;
        fs::write(
            self.line_dir(line).join("value"),
            if physical { "1" } else { "0" },
        )
        .map_err(|source| GpioError::Write { line, source })?;
        Ok(())
    }
}
