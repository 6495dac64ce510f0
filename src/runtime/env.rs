//! Environment and process information.

use anyhow::{Context, Result};
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn env_var_os_impl(&self, key: &str) -> Option<OsString> {
        env::var_os(key)
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn current_exe_impl(&self) -> Result<PathBuf> {
        env::current_exe().context("Failed to locate the launcher executable")
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn home_dir_impl(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::{RealRuntime, Runtime};

    #[test]
    fn test_real_runtime_env() {
        let runtime = RealRuntime;

        // PATH should exist on all systems
        assert!(runtime.env_var_os("PATH").is_some());
        assert!(
            runtime
                .env_var_os("MCP_ALERTMANAGER_TEST_SURELY_UNSET_VAR")
                .is_none()
        );

        // CI might not have a home directory
        let home = runtime.home_dir();
        assert!(home.is_some() || cfg!(target_os = "linux"));
    }

    #[test]
    fn test_real_runtime_current_exe_is_absolute() {
        let runtime = RealRuntime;
        let exe = runtime.current_exe().unwrap();
        assert!(exe.is_absolute());
    }
}
