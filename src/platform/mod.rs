//! Platform detection and binary lookup module
//!
//! This module detects the current platform (OS and architecture) using the
//! npm naming convention the platform packages are published under, and maps
//! it to the descriptor of the prebuilt binary for that platform.

mod detection;
mod table;

pub use detection::{DefaultPlatformDetector, PlatformDetector, PlatformKey};
pub use table::{BINARY_TABLE, BinaryDescriptor, lookup};
