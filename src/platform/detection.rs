use std::fmt;

/// Operating system and CPU architecture identifiers of the running host.
///
/// Identifiers follow the npm convention (`darwin`, `linux`, `win32` and
/// `x64`, `arm64`, ...) since that is how the platform packages are named.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlatformKey {
    pub os: String,
    pub arch: String,
}

impl PlatformKey {
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// Detect the current platform
    pub fn detect() -> Self {
        Self::from_rust_target(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Translate Rust target identifiers (`macos`, `x86_64`, ...) to npm ones.
    /// Unknown identifiers pass through unchanged.
    pub fn from_rust_target(os: &str, arch: &str) -> Self {
        let os = match os {
            "macos" => "darwin",
            "windows" => "win32",
            other => other,
        };
        let arch = match arch {
            "x86_64" => "x64",
            "aarch64" => "arm64",
            "x86" => "ia32",
            other => other,
        };
        Self::new(os, arch)
    }

    /// Key form used by the binary table, e.g. `linux_x64`.
    pub fn table_key(&self) -> String {
        format!("{}_{}", self.os, self.arch)
    }
}

impl fmt::Display for PlatformKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}

/// Trait for platform detection (useful for testing)
pub trait PlatformDetector: Send + Sync {
    fn detect(&self) -> PlatformKey;
}

/// Default platform detector using compile-time target identifiers
pub struct DefaultPlatformDetector;

impl PlatformDetector for DefaultPlatformDetector {
    fn detect(&self) -> PlatformKey {
        PlatformKey::detect()
    }
}

/// Detector that always reports the given platform.
impl PlatformDetector for PlatformKey {
    fn detect(&self) -> PlatformKey {
        self.clone()
    }
}
