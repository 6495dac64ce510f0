use std::path::PathBuf;

use super::PlatformKey;

/// Name and file suffix of the prebuilt binary for one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryDescriptor {
    pub name: &'static str,
    pub suffix: &'static str,
}

impl BinaryDescriptor {
    /// Installation-relative path: `<name>/bin/<name><suffix>`.
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from(self.name)
            .join("bin")
            .join(format!("{}{}", self.name, self.suffix))
    }
}

/// Supported platforms keyed by `<os>_<arch>`.
pub static BINARY_TABLE: &[(&str, BinaryDescriptor)] = &[
    (
        "darwin_x64",
        BinaryDescriptor {
            name: "mcp-alertmanager-darwin-amd64",
            suffix: "",
        },
    ),
    (
        "darwin_arm64",
        BinaryDescriptor {
            name: "mcp-alertmanager-darwin-arm64",
            suffix: "",
        },
    ),
    (
        "linux_x64",
        BinaryDescriptor {
            name: "mcp-alertmanager-linux-amd64",
            suffix: "",
        },
    ),
    (
        "linux_arm64",
        BinaryDescriptor {
            name: "mcp-alertmanager-linux-arm64",
            suffix: "",
        },
    ),
    (
        "win32_x64",
        BinaryDescriptor {
            name: "mcp-alertmanager-windows-amd64",
            suffix: ".exe",
        },
    ),
    (
        "win32_arm64",
        BinaryDescriptor {
            name: "mcp-alertmanager-windows-arm64",
            suffix: ".exe",
        },
    ),
];

/// Find the descriptor for a platform, if one is published.
pub fn lookup(platform: &PlatformKey) -> Option<&'static BinaryDescriptor> {
    let key = platform.table_key();
    BINARY_TABLE
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, descriptor)| descriptor)
}
