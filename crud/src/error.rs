use thiserror::Error;

/// Failures surfaced by the runtime and by generated fetch routines.
///
/// Errors are always returned to the caller. Generated code never aborts the
/// process on a query or scan failure.
#[derive(Debug, Error)]
pub enum CrudError {
    /// The underlying query executor failed.
    #[error("query failed: {message}")]
    Query { message: String },

    /// A column value could not be copied into the destination member.
    #[error("column `{column}`: cannot convert {actual} into {expected}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// The cursor was read before `advance` produced a row, or after it was
    /// exhausted.
    #[error("cursor has no current row")]
    NoCurrentRow,
}

impl CrudError {
    /// Convenience constructor for executor failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}
