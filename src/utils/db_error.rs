//! Classification of SQLx errors into store errors.

use crate::domain::repositories::StoreError;

/// Unique constraint on `short_links.code`.
pub const CODE_CONSTRAINT: &str = "short_links_code_key";

/// Unique constraint on `short_links.original_url`.
pub const URL_CONSTRAINT: &str = "short_links_original_url_key";

pub fn is_unique_violation_on(e: &sqlx::Error, constraint: &str) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    db_err.constraint() == Some(constraint)
}

/// Maps a failed `INSERT` into the store's uniqueness taxonomy.
///
/// PostgreSQL reports the first violated constraint only. A code collision
/// that hides a duplicate URL surfaces as `DuplicateUrl` on the retry.
pub fn map_insert_error(e: sqlx::Error) -> StoreError {
    if is_unique_violation_on(&e, URL_CONSTRAINT) {
        return StoreError::DuplicateUrl;
    }
    if is_unique_violation_on(&e, CODE_CONSTRAINT) {
        return StoreError::CodeCollision;
    }
    map_sqlx_error(e)
}

/// Maps any other SQLx error, separating connectivity from query failures.
pub fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Unavailable(e.to_string())
        }
        sqlx::Error::RowNotFound => StoreError::NotFound,
        other => StoreError::Database(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_are_unavailable() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolTimedOut),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolClosed),
            StoreError::Unavailable(_)
        ));
    }

    #[test]
    fn test_io_error_is_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(matches!(
            map_sqlx_error(sqlx::Error::Io(io)),
            StoreError::Unavailable(_)
        ));
    }

    #[test]
    fn test_row_not_found() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::RowNotFound),
            StoreError::NotFound
        ));
    }

    #[test]
    fn test_non_database_error_is_not_a_conflict() {
        assert!(!is_unique_violation_on(&sqlx::Error::RowNotFound, CODE_CONSTRAINT));
        assert!(matches!(
            map_insert_error(sqlx::Error::Protocol("unexpected message".into())),
            StoreError::Database(_)
        ));
    }
}
