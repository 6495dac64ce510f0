use log::{debug, info, warn};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use super::PackageManifest;
use crate::config::LauncherConfig;
use crate::error::{LaunchError, Result};
use crate::platform::{BinaryDescriptor, PlatformKey, lookup};
use crate::runtime::{Runtime, normalize_path};

const NODE_MODULES: &str = "node_modules";

/// Global folders under the home directory, searched after `NODE_PATH`.
const HOME_FOLDERS: [&str; 2] = [".node_modules", ".node_libraries"];

/// `node_modules` directories visible from `start`, nearest first.
///
/// Directories that are themselves named `node_modules` are not descended
/// into again, so `/app/node_modules/launcher/bin` yields
/// `/app/node_modules/launcher/bin/node_modules`,
/// `/app/node_modules/launcher/node_modules`, `/app/node_modules` and
/// `/node_modules`.
pub fn node_modules_ancestors(start: &Path) -> Vec<PathBuf> {
    start
        .ancestors()
        .filter(|dir| dir.file_name() != Some(OsStr::new(NODE_MODULES)))
        .map(|dir| dir.join(NODE_MODULES))
        .collect()
}

/// Package roots in search order, with duplicates removed: explicit roots,
/// the launcher's node_modules ancestors, `NODE_PATH`, then the home folders.
pub fn search_roots(config: &LauncherConfig) -> Vec<PathBuf> {
    let ancestors = config
        .launcher_dir
        .as_deref()
        .map(node_modules_ancestors)
        .unwrap_or_default();
    let home_folders = config
        .home_dir
        .iter()
        .flat_map(|home| HOME_FOLDERS.iter().map(move |folder| home.join(folder)));

    let mut roots: Vec<PathBuf> = Vec::new();
    for root in config
        .package_paths
        .iter()
        .cloned()
        .chain(ancestors)
        .chain(config.node_paths.iter().cloned())
        .chain(home_folders)
    {
        let root = normalize_path(&root);
        if !roots.contains(&root) {
            roots.push(root);
        }
    }
    roots
}

/// Resolve the absolute path of the platform binary.
///
/// Fails with [`LaunchError::UnsupportedPlatform`] when the platform has no
/// table entry or when no search root holds the package.
#[tracing::instrument(skip(runtime, config))]
pub fn resolve_binary_path<R: Runtime>(
    runtime: &R,
    platform: &PlatformKey,
    config: &LauncherConfig,
) -> Result<PathBuf> {
    let unsupported = || LaunchError::UnsupportedPlatform {
        platform: platform.clone(),
    };

    let descriptor = lookup(platform).ok_or_else(|| {
        debug!("No binary published for {}", platform);
        unsupported()
    })?;

    let roots = search_roots(config);
    debug!(
        "Looking for {:?} in {} package roots",
        descriptor.relative_path(),
        roots.len()
    );

    let path = roots
        .iter()
        .find_map(|root| locate_in_root(runtime, descriptor, root))
        .ok_or_else(|| {
            debug!("Package {} is not installed", descriptor.name);
            unsupported()
        })?;

    info!("Resolved {} binary: {:?}", platform, path);
    Ok(path)
}

fn locate_in_root<R: Runtime>(
    runtime: &R,
    descriptor: &BinaryDescriptor,
    root: &Path,
) -> Option<PathBuf> {
    let candidate = root.join(descriptor.relative_path());
    if !runtime.is_file(&candidate) {
        return None;
    }

    let package_dir = root.join(descriptor.name);
    match PackageManifest::load(runtime, &package_dir) {
        Ok(Some(manifest)) if manifest.name != descriptor.name => {
            warn!(
                "Skipping {:?}: package.json names {:?}, expected {:?}",
                package_dir, manifest.name, descriptor.name
            );
            return None;
        }
        Ok(Some(manifest)) => {
            debug!(
                "Found {} {}",
                manifest.name,
                manifest.version.as_deref().unwrap_or("(unversioned)")
            );
        }
        Ok(None) => {}
        Err(e) => {
            warn!("Skipping {:?}: {:#}", package_dir, e);
            return None;
        }
    }

    match runtime.canonicalize(&candidate) {
        Ok(path) => Some(path),
        Err(e) => {
            warn!("Skipping {:?}: {:#}", candidate, e);
            None
        }
    }
}
