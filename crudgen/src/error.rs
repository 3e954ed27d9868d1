use std::path::PathBuf;

use thiserror::Error;

/// Generation-time failures. All of these abort the run before any artifact
/// is committed; per-field annotation problems are not errors and are
/// handled by silently dropping the field during extraction.
#[derive(Debug, Error)]
pub enum GenError {
    /// A source file or directory could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A source file is not valid Rust. There is no partial scan.
    #[error("failed to parse {}: {source}", path.display())]
    Parse { path: PathBuf, source: syn::Error },

    /// The scanned files belong to more than one package.
    #[error("multiple packages found ({found:?}); crudgen scans one package at a time")]
    AmbiguousPackage { found: Vec<String> },

    /// No ancestor `Cargo.toml` with a `[package]` section owns this path.
    #[error("no owning package found for {}", path.display())]
    PackageNotFound { path: PathBuf },

    /// An ancestor `Cargo.toml` is not valid TOML.
    #[error("failed to parse manifest {}: {source}", path.display())]
    Manifest {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Two fields of one struct map to the same storage column. Generating
    /// a binder for them would be ambiguous, so the run is rejected.
    #[error("duplicate storage column `{column}` on struct `{name}`")]
    DuplicateColumn { name: String, column: String },

    /// The synthesizer produced tokens that do not re-parse, or was given an
    /// invalid runtime crate path.
    #[error("failed to render generated module: {0}")]
    Render(#[from] syn::Error),

    /// The generated artifact could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
