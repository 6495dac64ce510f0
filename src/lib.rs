pub mod config;
pub mod error;
pub mod launcher;
pub mod package;
pub mod platform;
pub mod runtime;

pub use error::LaunchError;
pub use launcher::{ExitOutcome, LaunchState, Launcher, run};
pub use platform::{BinaryDescriptor, PlatformKey};
