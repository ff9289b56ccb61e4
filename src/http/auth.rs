//! Acting-user extraction.
//!
//! Identity proper (sessions, tokens) belongs to an external subsystem;
//! this boundary trusts an `x-user-id` header and verifies the id against
//! the user directory. Anything missing or unknown is a 401.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::http::response::ApiError;
use crate::http::AppState;
use crate::user::User;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated actor, resolved to a full user record
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(ApiError::unauthorized)?;

        let user = state
            .store
            .find_user(user_id)
            .ok_or_else(ApiError::unauthorized)?;

        Ok(AuthUser(user))
    }
}
