//! Executor, cursor, and field-binding traits plus the generic row scanner.

use crate::error::CrudError;
use crate::value::Value;

/// Runs a query and hands back a row cursor.
///
/// Bind parameters are positional; how placeholders are spelled is the
/// executor's business.
pub trait Executor {
    fn query(&self, query: &str, params: &[Value]) -> Result<Box<dyn Rows + '_>, CrudError>;
}

/// Sequential cursor over a query's result rows.
///
/// Dropping the cursor releases it; there is no explicit close.
pub trait Rows {
    /// Column names of the result set, in select order.
    fn columns(&self) -> Vec<String>;

    /// Advance to the next row. Returns `false` once the cursor is exhausted.
    fn advance(&mut self) -> Result<bool, CrudError>;

    /// Value of column `index` in the current row.
    fn get(&self, index: usize) -> Result<Value, CrudError>;
}

/// Write access to a struct's annotated members, keyed by storage column
/// name.
///
/// Implementations must ignore columns they do not recognize: a row-scanner
/// is free to request any subset, in any order, with repeats.
pub trait FieldBinder {
    fn bind_field(&mut self, column: &str, value: &Value) -> Result<(), CrudError>;
}

/// Parallel `(column name, value)` view over a struct's annotated members,
/// in field-declaration order. Consumed by serialization and insert code.
pub trait FieldEnumerator {
    fn enumerate_fields(&self) -> (Vec<&'static str>, Vec<Value>);
}

/// Copy the cursor's current row into `dest`, column by column.
///
/// The cursor must already be positioned on a row via [`Rows::advance`].
/// A type-incompatible copy fails with [`CrudError::TypeMismatch`].
pub fn scan<R, D>(rows: &mut R, dest: &mut D) -> Result<(), CrudError>
where
    R: Rows + ?Sized,
    D: FieldBinder + ?Sized,
{
    let columns = rows.columns();
    for (index, column) in columns.iter().enumerate() {
        let value = rows.get(index)?;
        dest.bind_field(column, &value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryRows;
    use crate::value::{ToValue, convert};

    /// Hand expansion of what crudgen emits for a two-column struct.
    #[derive(Debug, Default, PartialEq)]
    struct Account {
        id: i64,
        name: String,
    }

    impl FieldBinder for Account {
        fn bind_field(&mut self, column: &str, value: &Value) -> Result<(), CrudError> {
            match column {
                "id" => self.id = convert::<i64>("id", value)?,
                "name" => self.name = convert::<String>("name", value)?,
                _ => {}
            }
            Ok(())
        }
    }

    impl FieldEnumerator for Account {
        fn enumerate_fields(&self) -> (Vec<&'static str>, Vec<Value>) {
            (
                vec!["id", "name"],
                vec![
                    ToValue::to_value(&self.id),
                    ToValue::to_value(&self.name),
                ],
            )
        }
    }

    fn one_row(columns: &[&str], row: Vec<Value>) -> MemoryRows {
        MemoryRows::new(columns.iter().copied(), vec![row])
    }

    #[test]
    fn scan_fills_recognized_columns() {
        let mut rows = one_row(&["id", "name"], vec![Value::Integer(1), Value::Text("ada".into())]);
        assert!(rows.advance().unwrap());

        let mut account = Account::default();
        scan(&mut rows, &mut account).unwrap();
        assert_eq!(
            account,
            Account {
                id: 1,
                name: "ada".into()
            }
        );
    }

    #[test]
    fn scan_ignores_unknown_columns() {
        let mut rows = one_row(
            &["id", "shoe_size"],
            vec![Value::Integer(2), Value::Integer(44)],
        );
        assert!(rows.advance().unwrap());

        let mut account = Account::default();
        scan(&mut rows, &mut account).unwrap();
        assert_eq!(account.id, 2);
        assert_eq!(account.name, "");
    }

    #[test]
    fn scan_handles_duplicate_columns() {
        // Last occurrence wins; no failure, no aliasing hazard.
        let mut rows = one_row(
            &["name", "name"],
            vec![Value::Text("first".into()), Value::Text("second".into())],
        );
        assert!(rows.advance().unwrap());

        let mut account = Account::default();
        scan(&mut rows, &mut account).unwrap();
        assert_eq!(account.name, "second");
    }

    #[test]
    fn scan_reports_type_mismatch() {
        let mut rows = one_row(&["id"], vec![Value::Text("not-a-number".into())]);
        assert!(rows.advance().unwrap());

        let mut account = Account::default();
        let err = scan(&mut rows, &mut account).unwrap_err();
        assert!(matches!(err, CrudError::TypeMismatch { ref column, .. } if column == "id"));
    }

    #[test]
    fn enumerator_preserves_declaration_order() {
        let account = Account {
            id: 9,
            name: "grace".into(),
        };
        let (names, values) = account.enumerate_fields();
        assert_eq!(names, vec!["id", "name"]);
        assert_eq!(values, vec![Value::Integer(9), Value::Text("grace".into())]);
    }
}
