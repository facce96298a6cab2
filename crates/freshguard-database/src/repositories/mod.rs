//! PostgreSQL implementations of the store traits.

pub mod item;
pub mod notification;
pub mod reminder_mark;
pub mod user;

pub use item::ItemRepository;
pub use notification::NotificationRepository;
pub use reminder_mark::ReminderMarkRepository;
pub use user::UserRepository;

use freshguard_core::error::{AppError, ErrorKind};

/// Map an insert failure, surfacing unique violations as `Conflict`.
pub(crate) fn insert_error(context: &str, err: sqlx::Error) -> AppError {
    let unique = matches!(&err, sqlx::Error::Database(db) if db.is_unique_violation());
    if unique {
        AppError::with_source(ErrorKind::Conflict, format!("{context}: already exists"), err)
    } else {
        AppError::with_source(ErrorKind::Database, context.to_string(), err)
    }
}
