use thiserror::Error;

/// Unified error type for database operations that application code can handle
#[derive(Error, Debug)]
pub enum DbError {
    /// Entity not found by the given identifier
    #[error("Entity not found")]
    NotFound,

    /// Unique constraint violation
    #[error("Unique constraint violation")]
    UniqueViolation {
        table: Option<String>,
        column: Option<String>,
        message: String,
    },

    /// Foreign key constraint violation
    #[error("Foreign key constraint violation")]
    ForeignKeyViolation { message: String },

    /// Check constraint violation
    #[error("Check constraint violation")]
    CheckViolation { message: String },

    /// Catch-all for non-recoverable errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DbError {
    /// True when this is a unique violation on the given `table.column`.
    pub fn is_unique_violation_on(&self, table: &str, column: &str) -> bool {
        matches!(
            self,
            DbError::UniqueViolation { table: Some(t), column: Some(c), .. } if t == table && c == column
        )
    }
}

/// Convert from sqlx::Error using proper sqlx error categorization
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => DbError::NotFound,
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    let (table, column) = match extract_constraint_target(db_err.message()) {
                        Some((table, column)) => (Some(table), Some(column)),
                        None => (db_err.table().map(|s| s.to_string()), None),
                    };
                    DbError::UniqueViolation {
                        table,
                        column,
                        message: db_err.message().to_string(),
                    }
                } else if db_err.is_foreign_key_violation() {
                    DbError::ForeignKeyViolation {
                        message: db_err.message().to_string(),
                    }
                } else if db_err.is_check_violation() {
                    DbError::CheckViolation {
                        message: db_err.message().to_string(),
                    }
                } else {
                    // All other database errors are non-recoverable - convert to anyhow
                    DbError::Other(anyhow::Error::from(err))
                }
            }
            // All other sqlx errors are non-recoverable - convert to anyhow with context
            _ => DbError::Other(anyhow::Error::from(err)),
        }
    }
}

/// Extract the offending `table.column` from a SQLite constraint message.
///
/// SQLite does not report constraint names through the driver; the target is
/// only present in the message text, e.g. "UNIQUE constraint failed: users.username".
/// Composite constraints list several targets separated by ", "; only the first is used.
fn extract_constraint_target(message: &str) -> Option<(String, String)> {
    let (_, targets) = message.split_once("constraint failed: ")?;
    let first = targets.split(',').next()?.trim();
    let (table, column) = first.split_once('.')?;
    if table.is_empty() || column.is_empty() {
        return None;
    }
    Some((table.to_string(), column.to_string()))
}

/// Type alias for database operation results
pub type Result<T> = std::result::Result<T, DbError>;
