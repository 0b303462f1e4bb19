//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `relayhub.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::collections::HashSet;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Relay bank settings.
    pub relays: RelaysConfig,
    /// Status panel settings.
    pub display: DisplayConfig,
    /// Output exercise sequence.
    pub pulse: PulseConfig,
    /// Static assets (the polling page).
    pub assets: AssetsConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Which [`RelayOutput`](relayhub_app::ports::RelayOutput) drives the lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// In-memory lines, no hardware.
    #[default]
    Simulated,
    /// Linux sysfs GPIO.
    Sysfs,
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simulated" => Ok(Self::Simulated),
            "sysfs" => Ok(Self::Sysfs),
            other => Err(ConfigError::Validation(format!(
                "unknown backend `{other}` (expected `simulated` or `sysfs`)"
            ))),
        }
    }
}

/// Relay bank configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RelaysConfig {
    /// Output line of each relay; relay `i` is driven through `pins[i]`.
    /// The relay count is the length of this list.
    pub pins: Vec<u32>,
    /// Output backend.
    pub backend: Backend,
    /// Root of the sysfs GPIO tree (sysfs backend only).
    pub sysfs_root: PathBuf,
    /// Invert line levels (sysfs backend only).
    pub active_low: bool,
}

/// Status panel configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Redraw the status panel on every relay change.
    pub enabled: bool,
}

/// Output exercise sequence configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    /// Run the sequence in the background.
    pub enabled: bool,
    /// Relay indices to pulse, in order.
    pub relays: Vec<usize>,
    /// Milliseconds each relay stays on.
    pub on_ms: u64,
    /// Milliseconds between pulses.
    pub off_ms: u64,
}

/// Static assets configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory served at `/`; disabled when unset.
    pub dir: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `relayhub.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("relayhub.toml")?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("RELAYHUB_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("RELAYHUB_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("RELAYHUB_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Ok(val) = std::env::var("RELAYHUB_BACKEND") {
            self.relays.backend = val.parse()?;
        }
        if let Ok(val) = std::env::var("RELAYHUB_ASSETS") {
            self.assets.dir = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("RELAYHUB_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.relays.pins.is_empty() {
            return Err(ConfigError::Validation(
                "at least one relay pin is required".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        if let Some(pin) = self.relays.pins.iter().find(|pin| !seen.insert(**pin)) {
            return Err(ConfigError::Validation(format!(
                "pin {pin} is assigned to more than one relay"
            )));
        }
        if self.pulse.enabled {
            let count = self.relays.pins.len();
            if let Some(index) = self.pulse.relays.iter().find(|&&index| index >= count) {
                return Err(ConfigError::Validation(format!(
                    "pulse relay {index} does not exist (bank has {count} relays)"
                )));
            }
            if self.pulse.on_ms == 0 || self.pulse.off_ms == 0 {
                return Err(ConfigError::Validation(
                    "pulse timings must be non-zero".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl PulseConfig {
    #[must_use]
    pub fn on_time(&self) -> Duration {
        Duration::from_millis(self.on_ms)
    }

    #[must_use]
    pub fn off_time(&self) -> Duration {
        Duration::from_millis(self.off_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for RelaysConfig {
    fn default() -> Self {
        Self {
            pins: vec![1, 2, 3, 4, 5, 6, 7],
            backend: Backend::default(),
            sysfs_root: PathBuf::from(relayhub_adapter_gpio_sysfs::DEFAULT_ROOT),
            active_low: false,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            relays: vec![5, 6],
            on_ms: 250,
            off_ms: 250,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "relayhubd=info,relayhub=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
