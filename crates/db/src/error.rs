//! Translation of sqlx failures into storage-agnostic [`StoreError`]s.

use annotater_core::error::StoreError;

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL SQLSTATE for `foreign_key_violation`.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Classify a sqlx error.
///
/// - `RowNotFound` maps to [`StoreError::NotFound`].
/// - Unique constraint violations map to [`StoreError::Duplicate`].
/// - Foreign key violations map to [`StoreError::ViolatingKey`].
/// - Everything else maps to [`StoreError::Backend`] with the driver message.
pub fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::RowNotFound => StoreError::NotFound,
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some(UNIQUE_VIOLATION) => StoreError::Duplicate,
            Some(FOREIGN_KEY_VIOLATION) => StoreError::ViolatingKey,
            _ => {
                tracing::error!(error = %db_err, "Database error");
                StoreError::backend(db_err)
            }
        },
        other => {
            tracing::error!(error = %other, "Database error");
            StoreError::backend(other)
        }
    }
}

/// Domain ids are unsigned; the columns are `BIGINT`.
pub fn to_db_id(id: u64) -> Result<i64, StoreError> {
    i64::try_from(id).map_err(|_| StoreError::Backend(format!("id {id} exceeds BIGINT range")))
}

pub fn from_db_id(id: i64) -> Result<u64, StoreError> {
    u64::try_from(id).map_err(|_| StoreError::Backend(format!("negative id {id} in database")))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn row_not_found_is_not_found() {
        assert_matches!(map_sqlx_error(sqlx::Error::RowNotFound), StoreError::NotFound);
    }

    #[test]
    fn pool_errors_are_backend_failures() {
        assert_matches!(
            map_sqlx_error(sqlx::Error::PoolTimedOut),
            StoreError::Backend(_)
        );
    }

    #[test]
    fn id_conversion_rejects_out_of_range_values() {
        assert_eq!(to_db_id(20).unwrap(), 20);
        assert_matches!(to_db_id(u64::MAX), Err(StoreError::Backend(_)));
        assert_matches!(from_db_id(-1), Err(StoreError::Backend(_)));
    }
}
