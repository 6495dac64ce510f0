//! File system queries (existence, reading, canonicalization).

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn exists_impl(&self, path: &Path) -> bool {
        path.exists()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn is_file_impl(&self, path: &Path) -> bool {
        path.is_file()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn read_to_string_impl(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).context("Failed to read file to string")
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn canonicalize_impl(&self, path: &Path) -> Result<PathBuf> {
        fs::canonicalize(path)
            .with_context(|| format!("Failed to canonicalize path: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::{RealRuntime, Runtime};
    use tempfile::tempdir;

    #[test]
    fn test_real_runtime_file_queries() {
        let rt = RealRuntime;
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.txt");

        assert!(!rt.exists(&file_path));
        assert!(!rt.is_file(&file_path));

        std::fs::write(&file_path, "hello").unwrap();
        assert!(rt.exists(&file_path));
        assert!(rt.is_file(&file_path));
        assert_eq!(rt.read_to_string(&file_path).unwrap(), "hello");

        // A directory exists but is not a file
        assert!(rt.exists(dir.path()));
        assert!(!rt.is_file(dir.path()));
    }

    #[test]
    fn test_real_runtime_canonicalize() {
        let rt = RealRuntime;
        let dir = tempdir().unwrap();
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();

        let dotted = sub.join("..").join("sub");
        let canonical = rt.canonicalize(&dotted).unwrap();
        assert!(canonical.is_absolute());
        assert_eq!(canonical, rt.canonicalize(&sub).unwrap());
    }

    #[test]
    fn test_real_runtime_errors() {
        let rt = RealRuntime;
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing");

        assert!(rt.read_to_string(&missing).is_err());
        assert!(rt.canonicalize(&missing).is_err());
    }
}
