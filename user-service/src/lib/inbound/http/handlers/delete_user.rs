use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn delete_user(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let user_id = UserId::from_string(&id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let target = state
        .store
        .find_by_id(&user_id)
        .await?
        .ok_or_else(|| ApiError::from(UserError::NotFound(user_id.to_string())))?;
    if !caller.can_manage(&target) {
        tracing::warn!(email = %caller.email, user_id = %user_id, "Deletion of another account refused");
        return Err(ApiError::Forbidden(
            "Only admins can delete other accounts".to_string(),
        ));
    }

    state.store.delete(&user_id).await?;
    tracing::info!(user_id = %user_id, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}
