//! Maps storage errors to multyapp_core::AppError for user-facing messages.

use multyapp_core::{AppError, DatabaseError};

use crate::storage::StorageError;

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::Sqlite(rusqlite_err) => {
                let message = rusqlite_err.to_string();
                if message.contains("corrupt") || message.contains("not a database") {
                    AppError::Database(DatabaseError::Corruption(message))
                } else if message.contains("unable to open") {
                    AppError::Database(DatabaseError::ConnectionFailed(message))
                } else {
                    AppError::Database(DatabaseError::QueryFailed(message))
                }
            }
            StorageError::Backend(s) => AppError::Database(DatabaseError::QueryFailed(s)),
        }
    }
}
