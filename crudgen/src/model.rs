//! Field-to-column model built by extraction and consumed by the
//! synthesizer. Built fresh on every run; nothing here is persisted.

/// One struct discovered in the scanned package.
///
/// A descriptor with no fields is inert: it is carried through the pipeline
/// but renders nothing.
#[derive(Debug, Clone)]
pub struct StructDescriptor {
    /// The struct's identifier.
    pub ident: syn::Ident,
    /// Module segments of the defining file relative to the scan root
    /// (empty for `lib.rs`/`main.rs`/`mod.rs` at the root). Used to import
    /// the struct into the generated module.
    pub module: Vec<String>,
    /// Annotated members, in declaration order.
    pub fields: Vec<FieldDescriptor>,
}

impl StructDescriptor {
    pub fn name(&self) -> String {
        self.ident.to_string()
    }

    pub fn has_fields(&self) -> bool {
        !self.fields.is_empty()
    }
}

/// One annotated member of a struct.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// Member identifier as declared.
    pub member: syn::Ident,
    /// Storage column name, taken verbatim from the annotation value.
    pub column: String,
    /// Declared type, preserved verbatim in generated code and never
    /// interpreted.
    pub ty: syn::Type,
}
