//! In-memory cursor and executor, used by tests and fixtures.

use crate::error::CrudError;
use crate::scan::{Executor, Rows};
use crate::value::Value;

/// Canned result set that walks a fixed list of rows.
#[derive(Debug, Clone, Default)]
pub struct MemoryRows {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    /// Index of the current row; `None` before the first `advance`, parked
    /// one past the end once exhausted.
    position: Option<usize>,
}

impl MemoryRows {
    pub fn new<I, S>(columns: I, rows: Vec<Vec<Value>>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows,
            position: None,
        }
    }

    /// A result set with columns but no rows.
    pub fn empty<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(columns, Vec::new())
    }

    fn current(&self) -> Result<&Vec<Value>, CrudError> {
        self.position
            .and_then(|index| self.rows.get(index))
            .ok_or(CrudError::NoCurrentRow)
    }
}

impl Rows for MemoryRows {
    fn columns(&self) -> Vec<String> {
        self.columns.clone()
    }

    fn advance(&mut self) -> Result<bool, CrudError> {
        let next = self.position.map_or(0, |index| index + 1);
        if next < self.rows.len() {
            self.position = Some(next);
            Ok(true)
        } else {
            // Park past the end; an exhausted cursor must stay exhausted,
            // and a stray `get` still fails cleanly.
            self.position = Some(self.rows.len());
            Ok(false)
        }
    }

    fn get(&self, index: usize) -> Result<Value, CrudError> {
        let row = self.current()?;
        row.get(index).cloned().ok_or_else(|| {
            CrudError::query(format!("column index {index} out of range for row"))
        })
    }
}

/// Executor that replays one canned result set for every query, ignoring the
/// query text and bind parameters.
#[derive(Debug, Clone, Default)]
pub struct MemoryExecutor {
    result: MemoryRows,
}

impl MemoryExecutor {
    pub fn new(result: MemoryRows) -> Self {
        Self { result }
    }
}

impl Executor for MemoryExecutor {
    fn query(&self, _query: &str, _params: &[Value]) -> Result<Box<dyn Rows + '_>, CrudError> {
        Ok(Box::new(self.result.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_walks_rows_in_order() {
        let mut rows = MemoryRows::new(
            ["n"],
            vec![
                vec![Value::Integer(1)],
                vec![Value::Integer(2)],
            ],
        );

        assert!(rows.advance().unwrap());
        assert_eq!(rows.get(0).unwrap(), Value::Integer(1));
        assert!(rows.advance().unwrap());
        assert_eq!(rows.get(0).unwrap(), Value::Integer(2));
        assert!(!rows.advance().unwrap());
    }

    #[test]
    fn get_without_current_row_fails() {
        let rows = MemoryRows::empty(["n"]);
        assert!(matches!(rows.get(0), Err(CrudError::NoCurrentRow)));
    }

    #[test]
    fn get_after_exhaustion_fails() {
        let mut rows = MemoryRows::new(["n"], vec![vec![Value::Integer(1)]]);
        assert!(rows.advance().unwrap());
        assert!(!rows.advance().unwrap());
        assert!(!rows.advance().unwrap());
        assert!(matches!(rows.get(0), Err(CrudError::NoCurrentRow)));
    }

    #[test]
    fn exhausted_cursor_never_restarts() {
        let mut rows = MemoryRows::new(["n"], vec![vec![Value::Integer(1)]]);
        assert!(rows.advance().unwrap());
        assert!(!rows.advance().unwrap());

        // Advancing an exhausted cursor must not wrap back to row 0.
        for _ in 0..3 {
            assert!(!rows.advance().unwrap());
            assert!(matches!(rows.get(0), Err(CrudError::NoCurrentRow)));
        }
    }

    #[test]
    fn executor_replays_the_result_set() {
        let executor = MemoryExecutor::new(MemoryRows::new(["n"], vec![vec![Value::Integer(5)]]));
        let mut rows = executor.query("select n from t", &[]).unwrap();
        assert!(rows.advance().unwrap());
        assert_eq!(rows.get(0).unwrap(), Value::Integer(5));
    }
}
