//! Annotation extraction: one struct declaration in, its field-to-column
//! model out.
//!
//! Field-level problems are never fatal. A field is silently dropped when it
//! has no `#[crud]` attribute, no name (tuple/anonymous member), a malformed
//! attribute body, no `column` key, or an empty column value. The only
//! rejection is two fields of one struct claiming the same column, which
//! would make the generated binder ambiguous.

use syn::{Attribute, LitStr, Token};

use crate::error::GenError;
use crate::model::{FieldDescriptor, StructDescriptor};
use crate::scanner::ScannedStruct;

/// Name of the recognized field attribute.
const ANNOTATION: &str = "crud";

/// Build the field model for one scanned struct.
pub fn extract_struct(scanned: &ScannedStruct) -> Result<StructDescriptor, GenError> {
    let item = &scanned.item;
    let mut fields: Vec<FieldDescriptor> = Vec::new();

    for field in item.fields.iter() {
        // Embedded/anonymous members are a deferred feature, not an error.
        let Some(member) = field.ident.clone() else {
            continue;
        };
        let Some(column) = column_name(&field.attrs) else {
            continue;
        };

        if fields.iter().any(|existing| existing.column == column) {
            return Err(GenError::DuplicateColumn {
                name: item.ident.to_string(),
                column,
            });
        }

        fields.push(FieldDescriptor {
            member,
            column,
            ty: field.ty.clone(),
        });
    }

    Ok(StructDescriptor {
        ident: item.ident.clone(),
        module: scanned.module.clone(),
        fields,
    })
}

/// Storage column name for one field, if its annotation is usable.
///
/// Malformed annotations are treated as absent: a single bad tag must not
/// abort the run.
fn column_name(attrs: &[Attribute]) -> Option<String> {
    for attr in attrs {
        if !attr.path().is_ident(ANNOTATION) {
            continue;
        }

        let mut column = None;
        let parsed = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("column") {
                let lit: LitStr = meta.value()?.parse()?;
                column = Some(lit.value());
            } else if meta.input.peek(Token![=]) {
                // Unrecognized key: consume its value and move on.
                let _eq: Token![=] = meta.input.parse()?;
                let _value: syn::Expr = meta.input.parse()?;
            }
            Ok(())
        });
        if parsed.is_err() {
            continue;
        }

        match column {
            Some(column) if !column.is_empty() => return Some(column),
            _ => continue,
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::ItemStruct;

    fn scanned(code: &str) -> ScannedStruct {
        let item: ItemStruct = syn::parse_str(code).unwrap();
        ScannedStruct {
            module: Vec::new(),
            item,
        }
    }

    #[test]
    fn retains_annotated_fields_in_declaration_order() {
        let descriptor = extract_struct(&scanned(
            r#"
            struct User {
                #[crud(column = "id")]
                ID: i64,
                #[crud(column = "name")]
                Name: String,
                secret: String,
            }
            "#,
        ))
        .unwrap();

        assert_eq!(descriptor.name(), "User");
        let pairs: Vec<(String, &str)> = descriptor
            .fields
            .iter()
            .map(|field| (field.member.to_string(), field.column.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![("ID".to_string(), "id"), ("Name".to_string(), "name")]
        );
    }

    #[test]
    fn unannotated_struct_is_inert() {
        let descriptor = extract_struct(&scanned("struct Plain { a: u8, b: u8 }")).unwrap();
        assert!(!descriptor.has_fields());
    }

    #[test]
    fn tuple_fields_are_skipped() {
        let descriptor =
            extract_struct(&scanned(r#"struct Pair(#[crud(column = "x")] i64, i64);"#)).unwrap();
        assert!(!descriptor.has_fields());
    }

    #[test]
    fn malformed_annotation_drops_only_that_field() {
        let descriptor = extract_struct(&scanned(
            r#"
            struct Mixed {
                #[crud(column = 5)]
                bad: i64,
                #[crud]
                bare: i64,
                #[crud(column = "kept")]
                good: i64,
            }
            "#,
        ))
        .unwrap();

        assert_eq!(descriptor.fields.len(), 1);
        assert_eq!(descriptor.fields[0].column, "kept");
    }

    #[test]
    fn empty_or_missing_column_value_is_skipped() {
        let descriptor = extract_struct(&scanned(
            r#"
            struct Sparse {
                #[crud(column = "")]
                empty: i64,
                #[crud(primary)]
                keyless: i64,
            }
            "#,
        ))
        .unwrap();

        assert!(!descriptor.has_fields());
    }

    #[test]
    fn column_value_is_used_verbatim() {
        let descriptor = extract_struct(&scanned(
            r#"
            struct Odd {
                #[crud(column = "  Spaced Name  ")]
                field: String,
            }
            "#,
        ))
        .unwrap();

        assert_eq!(descriptor.fields[0].column, "  Spaced Name  ");
    }

    #[test]
    fn duplicate_columns_are_rejected() {
        let err = extract_struct(&scanned(
            r#"
            struct Clash {
                #[crud(column = "id")]
                a: i64,
                #[crud(column = "id")]
                b: i64,
            }
            "#,
        ))
        .unwrap_err();

        match err {
            GenError::DuplicateColumn { name, column } => {
                assert_eq!(name, "Clash");
                assert_eq!(column, "id");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unrecognized_keys_do_not_hide_the_column() {
        let descriptor = extract_struct(&scanned(
            r#"
            struct Extra {
                #[crud(index = "btree", column = "id")]
                id: i64,
            }
            "#,
        ))
        .unwrap();

        assert_eq!(descriptor.fields[0].column, "id");
    }
}
