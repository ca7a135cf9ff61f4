//! Conversions from storage errors into domain errors.
//!
//! Keeps `rusqlite` knowledge on the infrastructure side; the core and
//! domain crates only ever see `PlanbordError`.

use planbord_domain::PlanbordError;
use rusqlite::Error as SqlError;

/// Error newtype that keeps conversions on the infrastructure side and can
/// be converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub PlanbordError);

impl From<InfraError> for PlanbordError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<PlanbordError> for InfraError {
    fn from(value: PlanbordError) -> Self {
        InfraError(value)
    }
}

impl From<SqlError> for InfraError {
    fn from(err: SqlError) -> Self {
        use rusqlite::ffi::ErrorCode;

        let domain = match err {
            SqlError::SqliteFailure(ffi, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match ffi.code {
                    ErrorCode::DatabaseBusy => PlanbordError::Store("database is busy".into()),
                    ErrorCode::DatabaseLocked => PlanbordError::Store("database is locked".into()),
                    ErrorCode::ConstraintViolation => {
                        PlanbordError::Store(format!("constraint violation: {message}"))
                    }
                    _ => PlanbordError::Store(format!(
                        "sqlite failure {:?} (code {}): {}",
                        ffi.code, ffi.extended_code, message
                    )),
                }
            }
            SqlError::QueryReturnedNoRows => {
                PlanbordError::NotFound("no rows returned by query".into())
            }
            SqlError::FromSqlConversionFailure(_, _, cause) => {
                PlanbordError::Store(format!("failed to convert sqlite value: {cause}"))
            }
            SqlError::InvalidColumnType(_, _, ty) => {
                PlanbordError::Store(format!("invalid column type: {ty}"))
            }
            SqlError::InvalidQuery => PlanbordError::Store("invalid SQL query".into()),
            other => PlanbordError::Store(other.to_string()),
        };
        InfraError(domain)
    }
}

impl From<r2d2::Error> for InfraError {
    fn from(err: r2d2::Error) -> Self {
        InfraError(PlanbordError::Store(format!("connection pool error: {err}")))
    }
}
