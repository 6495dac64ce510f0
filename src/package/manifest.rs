use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::runtime::Runtime;

/// The fields of a platform package's `package.json` the launcher cares about.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PackageManifest {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
}

impl PackageManifest {
    pub const FILE_NAME: &'static str = "package.json";

    /// Load the manifest from a package directory.
    /// Returns `Ok(None)` when the directory carries no manifest.
    #[tracing::instrument(skip(runtime))]
    pub fn load<R: Runtime>(runtime: &R, package_dir: &Path) -> Result<Option<Self>> {
        let path = package_dir.join(Self::FILE_NAME);
        if !runtime.exists(&path) {
            return Ok(None);
        }
        let content = runtime.read_to_string(&path)?;
        let manifest = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse package manifest at {:?}", path))?;
        Ok(Some(manifest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use mockall::predicate::eq;
    use std::path::PathBuf;

    #[test]
    fn test_load_manifest() {
        let mut runtime = MockRuntime::new();
        let path = PathBuf::from("/nm/pkg/package.json");

        runtime
            .expect_exists()
            .with(eq(path.clone()))
            .returning(|_| true);
        runtime
            .expect_read_to_string()
            .with(eq(path))
            .returning(|_| Ok(r#"{"name": "pkg", "version": "1.2.0", "os": ["linux"]}"#.into()));

        let manifest = PackageManifest::load(&runtime, Path::new("/nm/pkg"))
            .unwrap()
            .unwrap();
        assert_eq!(manifest.name, "pkg");
        assert_eq!(manifest.version.as_deref(), Some("1.2.0"));
    }

    #[test]
    fn test_load_manifest_missing() {
        let mut runtime = MockRuntime::new();
        runtime.expect_exists().returning(|_| false);

        let manifest = PackageManifest::load(&runtime, Path::new("/nm/pkg")).unwrap();
        assert!(manifest.is_none());
    }

    #[test]
    fn test_load_manifest_invalid_json() {
        let mut runtime = MockRuntime::new();
        runtime.expect_exists().returning(|_| true);
        runtime
            .expect_read_to_string()
            .returning(|_| Ok("not json".into()));

        let err = PackageManifest::load(&runtime, Path::new("/nm/pkg")).unwrap_err();
        assert!(err.to_string().contains("Failed to parse package manifest"));
    }

    #[test]
    fn test_load_manifest_without_version() {
        let mut runtime = MockRuntime::new();
        runtime.expect_exists().returning(|_| true);
        runtime
            .expect_read_to_string()
            .returning(|_| Ok(r#"{"name": "pkg"}"#.into()));

        let manifest = PackageManifest::load(&runtime, Path::new("/nm/pkg"))
            .unwrap()
            .unwrap();
        assert_eq!(manifest.version, None);
    }
}
