use auth::Role;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::UserChanges;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::UserData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// HTTP request body for updating a user (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

impl UpdateUserRequest {
    fn try_into_changes(self) -> Result<UserChanges, UserError> {
        // Validation happens here - errors are automatically converted via #[from]
        Ok(UserChanges {
            username: self.username.map(Username::new).transpose()?,
            email: self.email.map(EmailAddress::new).transpose()?,
            password: self.password.map(Password::new).transpose()?,
            role: self.role.map(|raw| raw.parse::<Role>()).transpose()?,
        })
    }
}

pub async fn update_user(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let user_id = UserId::from_string(&id).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let changes = req.try_into_changes()?;

    if changes.role.is_some() && !caller.role.is_admin() {
        return Err(ApiError::Forbidden("Only admins can change roles".to_string()));
    }

    let target = state
        .store
        .find_by_id(&user_id)
        .await?
        .ok_or_else(|| ApiError::from(UserError::NotFound(user_id.to_string())))?;
    if !caller.can_manage(&target) {
        tracing::warn!(email = %caller.email, user_id = %user_id, "Update of another account refused");
        return Err(ApiError::Forbidden(
            "Only admins can modify other accounts".to_string(),
        ));
    }

    state
        .store
        .update(&user_id, changes)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
