//! GPIO-specific error type wrapping sysfs IO failures.

use relayhub_domain::error::RelayHubError;

/// Errors originating from the sysfs GPIO layer.
#[derive(Debug, thiserror::Error)]
pub enum GpioError {
    /// Writing the line number to `export` failed.
    #[error("failed to export gpio line {line}")]
    Export {
        line: u32,
        #[source]
        source: std::io::Error,
    },

    /// Configuring the line as an output failed.
    #[error("failed to configure gpio line {line} as output")]
    Direction {
        line: u32,
        #[source]
        source: std::io::Error,
    },

    /// Writing the line level failed.
    #[error("failed to write gpio line {line}")]
    Write {
        line: u32,
        #[source]
        source: std::io::Error,
    },
}

impl From<GpioError> for RelayHubError {
    fn from(err: GpioError) -> Self {
        Self::Output(Box::new(err))
    }
}
