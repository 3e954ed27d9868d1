//! Directory scanner: turns a directory of Rust source files into the
//! ordered struct declarations of exactly one package.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use syn::{Item, ItemStruct};
use walkdir::WalkDir;

use crate::error::GenError;

/// A struct declaration together with where it lives, relative to the scan
/// root.
#[derive(Debug, Clone)]
pub struct ScannedStruct {
    /// Module segments of the defining file, relative to the scan root.
    pub module: Vec<String>,
    pub item: ItemStruct,
}

/// Everything the scanner recovered from one directory.
#[derive(Debug)]
pub struct ScanOutput {
    /// Name of the single package the scanned files belong to.
    pub package: String,
    /// Struct declarations, in sorted-file then declaration order.
    pub structs: Vec<ScannedStruct>,
}

/// Scan `root` for struct declarations.
///
/// Files named `output_filename` are excluded so the generator never
/// re-ingests its own output. Any unreadable or unparsable file fails the
/// whole run; files resolving to more than one package name fail with
/// [`GenError::AmbiguousPackage`].
pub fn scan_package(root: &Path, output_filename: &str) -> Result<ScanOutput, GenError> {
    if !root.is_dir() {
        return Err(GenError::Io {
            path: root.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        });
    }

    let files = discover_files(root, output_filename);
    let mut manifests = ManifestCache::default();
    let mut packages = BTreeSet::new();
    let mut structs = Vec::new();

    for file in &files {
        packages.insert(manifests.owning_package(file)?);

        let content = fs::read_to_string(file).map_err(|source| GenError::Io {
            path: file.clone(),
            source,
        })?;
        let parsed = syn::parse_file(&content).map_err(|source| GenError::Parse {
            path: file.clone(),
            source,
        })?;

        let module = module_segments(file, root);
        for item in parsed.items {
            if let Item::Struct(item_struct) = item {
                // Generic structs have no single fetchable shape; they are
                // not struct-shaped declarations for this tool.
                if !item_struct.generics.params.is_empty() {
                    debug!("skipping generic struct `{}`", item_struct.ident);
                    continue;
                }
                structs.push(ScannedStruct {
                    module: module.clone(),
                    item: item_struct,
                });
            }
        }
    }

    if packages.len() > 1 {
        return Err(GenError::AmbiguousPackage {
            found: packages.into_iter().collect(),
        });
    }

    let package = match packages.into_iter().next() {
        Some(name) => name,
        // Nothing to scan: attribute the run to the package owning the
        // directory itself.
        None => manifests
            .package_for_dir(root)?
            .ok_or_else(|| GenError::PackageNotFound {
                path: root.to_path_buf(),
            })?,
    };

    debug!(
        "scanned {} files under {}: {} struct declarations in package `{package}`",
        files.len(),
        root.display(),
        structs.len()
    );

    Ok(ScanOutput { package, structs })
}

/// Collect the `.rs` files under `root`, sorted for deterministic output.
///
/// Hidden paths, `target` directories, and the generator's own output file
/// are skipped.
fn discover_files(root: &Path, output_filename: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
    {
        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != "rs") {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        if relative.components().any(|component| {
            let name = component.as_os_str().to_string_lossy();
            name.starts_with('.') || name == "target"
        }) {
            continue;
        }

        if path.file_name().is_some_and(|name| name == output_filename) {
            continue;
        }

        files.push(path.to_path_buf());
    }

    files.sort();
    files
}

/// Module segments of `file` relative to `root`.
///
/// `src/sub/thing.rs` becomes `["src", "sub", "thing"]` when scanning above
/// `src`, or `["sub", "thing"]` when scanning `src` itself; a trailing
/// `mod`/`lib`/`main` component names the enclosing module and is dropped.
fn module_segments(file: &Path, root: &Path) -> Vec<String> {
    let relative = file.strip_prefix(root).unwrap_or(file);
    let without_extension = relative.with_extension("");

    let mut segments: Vec<String> = without_extension
        .components()
        .filter_map(|component| component.as_os_str().to_str())
        .map(String::from)
        .collect();

    if let Some(last) = segments.last()
        && (last == "mod" || last == "lib" || last == "main")
    {
        segments.pop();
    }

    segments
}

/// Per-directory cache of `[package].name` lookups.
#[derive(Default)]
struct ManifestCache {
    by_dir: HashMap<PathBuf, Option<String>>,
}

impl ManifestCache {
    fn owning_package(&mut self, file: &Path) -> Result<String, GenError> {
        let dir = file.parent().unwrap_or(Path::new("."));
        self.package_for_dir(dir)?
            .ok_or_else(|| GenError::PackageNotFound {
                path: file.to_path_buf(),
            })
    }

    /// Name from the nearest ancestor `Cargo.toml` carrying a `[package]`
    /// section. Virtual workspace manifests are skipped.
    fn package_for_dir(&mut self, dir: &Path) -> Result<Option<String>, GenError> {
        if let Some(cached) = self.by_dir.get(dir) {
            return Ok(cached.clone());
        }

        let manifest = dir.join("Cargo.toml");
        let local = if manifest.is_file() {
            read_package_name(&manifest)?
        } else {
            None
        };

        let resolved = match local {
            Some(name) => Some(name),
            None => match dir.parent() {
                Some(parent) => self.package_for_dir(parent)?,
                None => None,
            },
        };

        self.by_dir.insert(dir.to_path_buf(), resolved.clone());
        Ok(resolved)
    }
}

fn read_package_name(manifest: &Path) -> Result<Option<String>, GenError> {
    let text = fs::read_to_string(manifest).map_err(|source| GenError::Io {
        path: manifest.to_path_buf(),
        source,
    })?;
    let value: toml::Value = toml::from_str(&text).map_err(|source| GenError::Manifest {
        path: manifest.to_path_buf(),
        source,
    })?;

    Ok(value
        .get("package")
        .and_then(|package| package.get("name"))
        .and_then(|name| name.as_str())
        .map(String::from))
}
