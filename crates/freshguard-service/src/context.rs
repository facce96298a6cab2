//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use freshguard_core::types::UserId;

/// Context for the current authenticated request.
///
/// Built by the API extractor from a verified session token and passed into
/// service methods so every operation is scoped to its caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// Email address from the session token.
    pub email: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: UserId, email: String, request_time: DateTime<Utc>) -> Self {
        Self {
            user_id,
            email,
            request_time,
        }
    }
}
