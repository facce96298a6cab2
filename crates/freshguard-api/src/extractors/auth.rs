//! `AuthUser` extractor: reads the session token from the Authorization
//! header or the session cookie, verifies it and injects the caller context.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use tracing::debug;

use freshguard_core::error::AppError;
use freshguard_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).or_else(|| {
            CookieJar::from_headers(&parts.headers)
                .get(&state.config.auth.cookie_name)
                .map(|c| c.value().to_string())
        });

        let Some(token) = token else {
            debug!(path = %parts.uri.path(), "No session token presented");
            return Err(AppError::authentication("Unauthorized").into());
        };

        let claims = state.jwt_decoder.decode(&token)?;
        let ctx = RequestContext::new(claims.user_id(), claims.email, state.clock.now());

        Ok(AuthUser(ctx))
    }
}

/// The token from an `Authorization: Bearer <token>` header, if present.
pub(crate) fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}
