//! Conversions from external infrastructure errors into domain errors.

use r2d2::Error as PoolError;
use rusqlite::Error as SqlError;
use tempo_domain::TempoError;
use tokio::task::JoinError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct InfraError(pub TempoError);

/// Result for synchronous SQL helpers
pub type InfraResult<T> = Result<T, InfraError>;

impl From<InfraError> for TempoError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<TempoError> for InfraError {
    fn from(value: TempoError) -> Self {
        Self(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoTempoError {
    fn into_tempo(self) -> TempoError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → TempoError */
/* -------------------------------------------------------------------------- */

impl IntoTempoError for SqlError {
    fn into_tempo(self) -> TempoError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => TempoError::Database("database is busy".into()),
                    (ErrorCode::DatabaseLocked, _) => {
                        TempoError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 2067) => {
                        TempoError::Database("unique constraint violation".into())
                    }
                    (ErrorCode::ConstraintViolation, 787) => {
                        TempoError::Database("foreign key constraint violation".into())
                    }
                    _ => TempoError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => TempoError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(column, _, cause) => {
                TempoError::Database(format!("failed to convert column {column}: {cause}"))
            }
            RE::InvalidColumnType(_, name, ty) => {
                TempoError::Database(format!("invalid column type for {name}: {ty}"))
            }
            RE::InvalidPath(path) => TempoError::Database(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            other => TempoError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        Self(value.into_tempo())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → TempoError */
/* -------------------------------------------------------------------------- */

impl IntoTempoError for PoolError {
    fn into_tempo(self) -> TempoError {
        TempoError::Database(format!("connection pool unavailable: {self}"))
    }
}

impl From<PoolError> for InfraError {
    fn from(value: PoolError) -> Self {
        Self(value.into_tempo())
    }
}

/* -------------------------------------------------------------------------- */
/* tokio::task::JoinError → TempoError */
/* -------------------------------------------------------------------------- */

impl IntoTempoError for JoinError {
    fn into_tempo(self) -> TempoError {
        if self.is_cancelled() {
            TempoError::Internal("blocking task cancelled".into())
        } else {
            TempoError::Internal(format!("blocking task failed: {self}"))
        }
    }
}

impl From<JoinError> for InfraError {
    fn from(value: JoinError) -> Self {
        Self(value.into_tempo())
    }
}

/// Map a failed `spawn_blocking` join into the domain error
pub fn map_join_error(err: JoinError) -> TempoError {
    err.into_tempo()
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use rusqlite::ffi::{Error as FfiError, ErrorCode};

    use super::*;

    #[test]
    fn sqlite_busy_maps_to_database_error() {
        let err = SqlError::SqliteFailure(
            FfiError { code: ErrorCode::DatabaseBusy, extended_code: 5 },
            Some("database is locked".into()),
        );

        let mapped: TempoError = InfraError::from(err).into();
        assert_eq!(mapped, TempoError::Database("database is busy".into()));
    }

    #[test]
    fn unique_violation_is_named() {
        let err = SqlError::SqliteFailure(
            FfiError { code: ErrorCode::ConstraintViolation, extended_code: 2067 },
            Some("UNIQUE constraint failed: timer_templates.owner_id, timer_templates.name".into()),
        );

        let mapped: TempoError = InfraError::from(err).into();
        assert_eq!(mapped, TempoError::Database("unique constraint violation".into()));
    }

    #[test]
    fn no_rows_maps_to_not_found() {
        let mapped: TempoError = InfraError::from(SqlError::QueryReturnedNoRows).into();
        assert!(matches!(mapped, TempoError::NotFound(_)));
    }

    #[tokio::test]
    async fn panicked_task_maps_to_internal() {
        let join_err = tokio::spawn(async { panic!("boom") }).await.unwrap_err();

        match map_join_error(join_err) {
            TempoError::Internal(msg) => assert!(msg.contains("blocking task failed")),
            other => panic!("expected internal error, got {other:?}"),
        }
    }

    #[test]
    fn infra_error_displays_inner() {
        let err = InfraError(TempoError::Database("database is locked".into()));
        assert_eq!(err.to_string(), TempoError::Database("database is locked".into()).to_string());
    }
}
