//! End-to-end pipeline: scan, extract, synthesize, commit.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::OUTPUT_FILENAME;
use crate::codegen::Synthesizer;
use crate::error::GenError;
use crate::extract;
use crate::scanner;

/// Builder for configuring and running one generation pass.
pub struct Generator {
    scan_path: PathBuf,
    output_filename: String,
    runtime_crate: String,
}

/// What a completed run produced.
#[derive(Debug)]
pub struct GenReport {
    /// Path of the generated artifact.
    pub output: PathBuf,
    /// Name of the scanned package.
    pub package: String,
    /// Number of structs that produced routines.
    pub structs_rendered: usize,
    /// False when the existing artifact already matched the rendered output.
    pub written: bool,
}

impl Generator {
    pub fn new() -> Self {
        Self {
            scan_path: PathBuf::from("."),
            output_filename: OUTPUT_FILENAME.to_string(),
            runtime_crate: "crud".to_string(),
        }
    }

    /// Directory holding the package to scan. Default: current directory.
    pub fn scan_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.scan_path = path.into();
        self
    }

    /// Filename of the artifact, written inside the scanned directory.
    pub fn output_filename(mut self, name: impl Into<String>) -> Self {
        self.output_filename = name.into();
        self
    }

    /// Rust path generated code uses to reach the runtime crate.
    ///
    /// Default: `crud`.
    pub fn runtime_crate(mut self, path: impl Into<String>) -> Self {
        self.runtime_crate = path.into();
        self
    }

    /// Run the pipeline once, to completion.
    ///
    /// Nothing is written until every struct has synthesized; a mid-run
    /// failure leaves any previous artifact untouched.
    pub fn run(self) -> Result<GenReport, GenError> {
        let scan = scanner::scan_package(&self.scan_path, &self.output_filename)?;

        let mut descriptors = Vec::with_capacity(scan.structs.len());
        for scanned in &scan.structs {
            descriptors.push(extract::extract_struct(scanned)?);
        }

        let synthesizer = Synthesizer::new(&self.runtime_crate)?;
        let code = synthesizer.render_module(&scan.package, &descriptors)?;
        let structs_rendered = descriptors
            .iter()
            .filter(|descriptor| descriptor.has_fields())
            .count();

        let output = self.scan_path.join(&self.output_filename);
        let written = commit(&output, &code)?;
        if written {
            info!(
                "generated {} with {structs_rendered} structs (package `{}`)",
                output.display(),
                scan.package
            );
        } else {
            debug!("{} already up to date", output.display());
        }

        Ok(GenReport {
            output,
            package: scan.package,
            structs_rendered,
            written,
        })
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

/// Atomically replace `path` with `code`.
///
/// The full module is already rendered in memory; it lands via a temporary
/// file in the same directory plus a rename, so a failed run can never leave
/// a truncated artifact. An artifact that already matches is left untouched.
fn commit(path: &Path, code: &str) -> Result<bool, GenError> {
    if let Ok(existing) = fs::read_to_string(path)
        && existing == code
    {
        return Ok(false);
    }

    let dir = path.parent().unwrap_or(Path::new("."));
    let write_err = |source: std::io::Error| GenError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(code.as_bytes()).map_err(write_err)?;
    tmp.persist(path).map_err(|error| write_err(error.error))?;

    Ok(true)
}
