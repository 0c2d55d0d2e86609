use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::SessionData;
use crate::domain::user::models::Credentials;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<SessionData>, ApiError> {
    // Unparseable credentials can never match a stored user
    let credentials = body
        .try_into_credentials()
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    let user = state.store.login(&credentials).await?;
    let token = state.auth.issue_token(user.email.as_str(), user.role)?;

    tracing::info!(user_id = %user.id, role = %user.role, "User logged in");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        SessionData {
            user: (&user).into(),
            token,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

impl LoginRequestBody {
    fn try_into_credentials(self) -> Option<Credentials> {
        Some(Credentials {
            email: EmailAddress::new(self.email).ok()?,
            password: Password::new(self.password).ok()?,
        })
    }
}
