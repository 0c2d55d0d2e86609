use auth::Role;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Password;
use crate::domain::user::models::Username;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn create_user(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(body): Json<CreateUserRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let new_user = body.try_into_new_user()?;

    if new_user.role.is_admin() && !caller.role.is_admin() {
        return Err(ApiError::Forbidden(
            "Only admins can create admin accounts".to_string(),
        ));
    }

    state
        .store
        .create(new_user)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for creating a user (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUserRequest {
    username: String,
    email: String,
    password: String,
    role: Option<String>,
}

impl CreateUserRequest {
    fn try_into_new_user(self) -> Result<NewUser, UserError> {
        let role = match self.role {
            Some(raw) => raw.parse::<Role>()?,
            None => Role::User,
        };

        Ok(NewUser {
            username: Username::new(self.username)?,
            email: EmailAddress::new(self.email)?,
            password: Password::new(self.password)?,
            role,
        })
    }
}
