//! Convenience result type alias for FreshGuard.

use crate::error::AppError;

/// A specialized `Result` type for FreshGuard operations.
pub type AppResult<T> = Result<T, AppError>;
