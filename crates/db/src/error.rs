use thiserror::Error;

/// Failures reported by the storage layer
#[derive(Error, Debug)]
pub enum DbError {
    /// The lookup, update, or delete matched zero rows
    #[error("no rows in result set")]
    NotFound,

    #[error(transparent)]
    Database(sqlx::Error),
}

impl DbError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NotFound)
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound,
            other => DbError::Database(other),
        }
    }
}
