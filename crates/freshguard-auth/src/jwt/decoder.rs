//! Session token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use freshguard_core::config::AuthConfig;
use freshguard_core::error::AppError;

use super::claims::Claims;

/// Validates HS256 session tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a session token.
    ///
    /// Every failure maps to the same `Authentication` error; the reason is
    /// only logged at debug level.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(reason = ?e.kind(), "Rejected session token");
                AppError::authentication("Unauthorized")
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use freshguard_core::error::ErrorKind;
    use freshguard_core::types::UserId;

    use super::*;
    use crate::jwt::JwtEncoder;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_issue_then_decode() {
        let cfg = config("s3cret");
        let user = UserId::new();
        let (token, expires_at) = JwtEncoder::new(&cfg)
            .issue(user, "ana@example.com", Utc::now())
            .expect("issue");

        let claims = JwtDecoder::new(&cfg).decode(&token).expect("decode");
        assert_eq!(claims.user_id(), user);
        assert_eq!(claims.email, "ana@example.com");
        assert_eq!(claims.exp, expires_at.timestamp());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let (token, _) = JwtEncoder::new(&config("one"))
            .issue(UserId::new(), "a@example.com", Utc::now())
            .expect("issue");
        let err = JwtDecoder::new(&config("two"))
            .decode(&token)
            .expect_err("bad signature");
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert_eq!(err.message, "Unauthorized");
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let cfg = config("s3cret");
        let (token, _) = JwtEncoder::new(&cfg)
            .issue(UserId::new(), "a@example.com", Utc::now() - Duration::days(30))
            .expect("issue");
        assert!(JwtDecoder::new(&cfg).decode(&token).is_err());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(JwtDecoder::new(&config("x")).decode("not.a.jwt").is_err());
    }
}
