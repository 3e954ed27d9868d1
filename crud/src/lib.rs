//! Minimal data-access runtime consumed by `crudgen`-generated code.
//!
//! The `crudgen` binary scans a package for structs whose fields carry
//! `#[crud(column = "...")]` annotations and writes a module of fetch
//! routines plus [`FieldBinder`]/[`FieldEnumerator`] implementations. Those
//! routines link against the traits and helpers in this crate:
//!
//! - [`Executor`] runs a query and hands back a [`Rows`] cursor.
//! - [`scan`] copies the cursor's current row into any [`FieldBinder`],
//!   matching columns by storage name.
//! - [`Value`] is the loosely typed payload moved between the two, with
//!   [`ToValue`]/[`FromValue`] conversions for the common scalar types.
//!
//! Every failure is an ordinary [`CrudError`] return. Nothing here panics or
//! terminates the host process.

mod error;
mod memory;
mod scan;
mod value;

pub use crud_macros::Crud;
pub use error::CrudError;
pub use memory::{MemoryExecutor, MemoryRows};
pub use scan::{Executor, FieldBinder, FieldEnumerator, Rows, scan};
pub use value::{FromValue, ToValue, Value, convert};
