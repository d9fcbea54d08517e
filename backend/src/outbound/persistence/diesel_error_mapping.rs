//! Shared Diesel error mapping for the repository adapters.
//!
//! Each repository supplies constructors for its own port error; the
//! helpers here decide which one a given Diesel failure becomes.

use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub(crate) fn map_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Constructors a repository offers for the Diesel failures it cares about.
pub(crate) struct DieselErrorMapping<Q, C, U> {
    /// Generic query failure.
    pub query: Q,
    /// Lost or closed connection.
    pub connection: C,
    /// Unique constraint violation.
    pub unique_violation: U,
}

impl<E, Q, C, U> DieselErrorMapping<Q, C, U>
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
    U: FnOnce() -> E,
{
    /// Classify `error` and build the matching port error.
    pub(crate) fn map(self, error: diesel::result::Error) -> E {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        match &error {
            DieselError::DatabaseError(kind, info) => {
                debug!(?kind, message = info.message(), "diesel operation failed");
            }
            _ => debug!(
                error_type = %std::any::type_name_of_val(&error),
                "diesel operation failed"
            ),
        }

        match error {
            DieselError::NotFound => (self.query)("record not found"),
            DieselError::QueryBuilderError(_) => (self.query)("database query error"),
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                (self.unique_violation)()
            }
            DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
                (self.connection)("database connection error")
            }
            _ => (self.query)("database error"),
        }
    }
}

/// Convert a stored like count, rejecting negative values.
pub(crate) fn likes_from_db(likes: i32) -> Result<u32, String> {
    u32::try_from(likes).map_err(|_| format!("negative like count {likes}"))
}
