//! Convenience result type alias for Linkbox.

use crate::error::AppError;

/// A specialized `Result` type for Linkbox operations.
pub type AppResult<T> = Result<T, AppError>;
