//! Typed path parameter helpers.

use uuid::Uuid;

use freshguard_core::error::AppError;

/// Parses a typed ID from a path segment.
pub fn parse_id<T: From<Uuid>>(s: &str) -> Result<T, AppError> {
    Uuid::parse_str(s)
        .map(T::from)
        .map_err(|_| AppError::validation(format!("Invalid id: {s}")))
}

#[cfg(test)]
mod tests {
    use freshguard_core::types::NotificationId;

    use super::*;

    #[test]
    fn test_parse_id() {
        let id = NotificationId::new();
        let parsed: NotificationId = parse_id(&id.to_string()).unwrap();
        assert_eq!(parsed, id);

        let err = parse_id::<NotificationId>("not-a-uuid").unwrap_err();
        assert_eq!(err.kind, freshguard_core::error::ErrorKind::Validation);
    }
}
