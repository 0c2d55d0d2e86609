use auth::Role;
use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::models::User;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated caller in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub email: String,
    pub role: Role,
}

impl AuthenticatedUser {
    /// Admins manage every account; everyone else only their own.
    pub fn can_manage(&self, user: &User) -> bool {
        self.role.is_admin() || self.email == user.email.as_str()
    }
}

/// Middleware that validates session tokens and adds caller info to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&req)?;

    let claims = state.auth.validate_token(token).map_err(|e| {
        tracing::warn!(error = %e, uri = %req.uri(), "Session token rejected");
        ApiError::from(e)
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        email: claims.email,
        role: claims.role,
    });

    Ok(next.run(req).await)
}

/// Pull the token out of `Authorization: Bearer <token>`.
fn extract_bearer_token(req: &Request) -> Result<&str, ApiError> {
    let invalid_header =
        || ApiError::Unauthorized("Missing or invalid Authorization header".to_string());

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(invalid_header)?;

    let auth_str = auth_header.to_str().map_err(|_| invalid_header())?;

    let (scheme, token) = auth_str.split_once(' ').ok_or_else(invalid_header)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(invalid_header());
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(invalid_header());
    }

    Ok(token)
}
