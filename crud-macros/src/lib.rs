use proc_macro::TokenStream;
use syn::{Data, DeriveInput, Error, parse_macro_input};

/// Marks a struct for processing by the `crudgen` binary.
///
/// The derive expands to nothing. It exists so that the compiler accepts
/// `#[crud(column = "...")]` annotations on fields; the actual fetch/bind
/// boilerplate is written out-of-band by `crudgen`, which scans source text
/// rather than running inside macro expansion.
///
/// Annotated structs should also derive [`Default`]: generated fetch
/// routines allocate fresh instances with `T::default()` before scanning a
/// row into them.
#[proc_macro_derive(Crud, attributes(crud))]
pub fn derive_crud(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match &input.data {
        Data::Struct(_) => TokenStream::new(),
        _ => Error::new_spanned(&input.ident, "Crud can only be derived for structs")
            .to_compile_error()
            .into(),
    }
}
