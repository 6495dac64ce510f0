use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::platform::PlatformKey;

/// Errors that stop the launcher before or while relaying to the platform binary.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// No binary is published for this platform, or its package is not installed.
    #[error("Could not resolve binary path for platform/arch: {platform}")]
    UnsupportedPlatform { platform: PlatformKey },

    #[error("Failed to spawn {}: {source}", path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to wait for child process: {source}")]
    Wait {
        #[source]
        source: io::Error,
    },

    #[error("Failed to install signal handlers: {source}")]
    SignalSetup {
        #[source]
        source: io::Error,
    },
}

pub type Result<T, E = LaunchError> = std::result::Result<T, E>;
