use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Admin-only listing of every user.
pub async fn list_users(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<Vec<UserData>>, ApiError> {
    if !caller.role.is_admin() {
        tracing::warn!(email = %caller.email, role = %caller.role, "Non-admin tried to list users");
        return Err(ApiError::Forbidden("Admin role required".to_string()));
    }

    let users = state.store.list_all().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        users.iter().map(UserData::from).collect(),
    ))
}
