//! crudgen scans one package's structs for `#[crud(column = "...")]` field
//! annotations and writes a module of deterministic data-access boilerplate:
//! per struct, a fetch-one routine, a fetch-list routine, and
//! `FieldBinder`/`FieldEnumerator` implementations consumed by the `crud`
//! runtime crate.
//!
//! The pipeline is a strict scan → extract → synthesize sequence, run once
//! per invocation:
//!
//! ```ignore
//! crudgen::generator()
//!     .scan_path("my-app/src")
//!     .run()?;
//! ```
//!
//! The rendered module is a pure function of the discovered structs:
//! re-running on unchanged input produces byte-identical output, and the
//! artifact is only committed once every struct has synthesized.

mod codegen;
mod error;
mod extract;
mod generate;
mod model;
mod scanner;

pub use codegen::Synthesizer;
pub use error::GenError;
pub use generate::{GenReport, Generator};
pub use model::{FieldDescriptor, StructDescriptor};

/// Default filename of the generated artifact. The scanner always excludes
/// the configured output filename so repeated runs never re-ingest their own
/// output.
pub const OUTPUT_FILENAME: &str = "crud_gen.rs";

/// Create a generator with default settings.
pub fn generator() -> Generator {
    Generator::new()
}
