//! Locating installed platform packages.
//!
//! Platform binaries ship as separate packages laid out as
//! `<name>/bin/<name>[.exe]`. Resolution walks a list of package roots the
//! same way node resolves `require("<name>/bin/<name>")`.

mod manifest;
mod resolve;

pub use manifest::PackageManifest;
pub use resolve::{node_modules_ancestors, resolve_binary_path, search_roots};
