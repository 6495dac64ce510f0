use log::{debug, warn};
use std::env;
use std::path::PathBuf;

use crate::runtime::Runtime;

/// Extra package roots searched before the launcher's own node_modules tree.
pub const PACKAGE_PATH_ENV: &str = "MCP_ALERTMANAGER_PACKAGE_PATH";

/// Global package roots, searched after the launcher's node_modules tree.
pub const NODE_PATH_ENV: &str = "NODE_PATH";

/// Log filter for the launcher itself (env_logger syntax).
pub const LOG_ENV: &str = "MCP_ALERTMANAGER_LAUNCHER_LOG";

/// Launcher settings, read once from the environment at startup.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LauncherConfig {
    /// Directories from `MCP_ALERTMANAGER_PACKAGE_PATH`.
    pub package_paths: Vec<PathBuf>,
    /// Directory containing the launcher executable, when it can be located.
    pub launcher_dir: Option<PathBuf>,
    /// Directories from `NODE_PATH`.
    pub node_paths: Vec<PathBuf>,
    /// Home directory, for `~/.node_modules` and `~/.node_libraries`.
    pub home_dir: Option<PathBuf>,
}

impl LauncherConfig {
    /// Gather settings. Sources that cannot be read are left out, so the
    /// remaining package roots are still searched.
    pub fn from_runtime<R: Runtime>(runtime: &R) -> Self {
        let package_paths = split_path_list(runtime, PACKAGE_PATH_ENV);
        let node_paths = split_path_list(runtime, NODE_PATH_ENV);

        let launcher_dir = match runtime.current_exe() {
            Ok(exe) => exe.parent().map(|p| p.to_path_buf()),
            Err(e) => {
                warn!("Not searching next to the launcher: {:#}", e);
                None
            }
        };

        let config = Self {
            package_paths,
            launcher_dir,
            node_paths,
            home_dir: runtime.home_dir(),
        };
        debug!("Launcher config: {:?}", config);
        config
    }
}

fn split_path_list<R: Runtime>(runtime: &R, key: &str) -> Vec<PathBuf> {
    runtime
        .env_var_os(key)
        .map(|value| {
            env::split_paths(&value)
                .filter(|p| !p.as_os_str().is_empty())
                .collect()
        })
        .unwrap_or_default()
}
