use auth::Role;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::SessionData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Password;
use crate::domain::user::models::Username;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Self-service sign-up. Accounts created here always get the `user` role.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequestBody>,
) -> Result<ApiSuccess<SessionData>, ApiError> {
    let user = state.store.register(body.try_into_new_user()?).await?;
    let token = state.auth.issue_token(user.email.as_str(), user.role)?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        SessionData {
            user: (&user).into(),
            token,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    username: String,
    email: String,
    password: String,
}

impl RegisterRequestBody {
    fn try_into_new_user(self) -> Result<NewUser, UserError> {
        Ok(NewUser {
            username: Username::new(self.username)?,
            email: EmailAddress::new(self.email)?,
            password: Password::new(self.password)?,
            role: Role::User,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::inbound::http::test_support::json_request;
    use crate::inbound::http::test_support::TestHarness;

    #[tokio::test]
    async fn test_register_ignores_requested_role() {
        let harness = TestHarness::with_memory_store();

        let (status, body) = harness
            .send(json_request(
                "POST",
                "/register",
                None,
                json!({
                    "username": "mallory",
                    "email": "mallory@example.com",
                    "password": "pass_word!",
                    "role": "admin"
                }),
            ))
            .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["user"]["role"], "user");

        let claims = harness
            .auth
            .validate_token(body["data"]["token"].as_str().unwrap())
            .unwrap();
        assert_eq!(claims.email, "mallory@example.com");
        assert_eq!(claims.role, Role::User);
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let harness = TestHarness::with_memory_store();
        let body = json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "pass_word!"
        });

        let (first, _) = harness
            .send(json_request("POST", "/register", None, body))
            .await;
        assert_eq!(first, StatusCode::CREATED);

        let (second, body) = harness
            .send(json_request(
                "POST",
                "/register",
                None,
                json!({
                    "username": "alice2",
                    "email": "alice@example.com",
                    "password": "pass_word!"
                }),
            ))
            .await;
        assert_eq!(second, StatusCode::CONFLICT);
        assert!(body["data"]["message"]
            .as_str()
            .unwrap()
            .contains("already exists"));
    }

    #[tokio::test]
    async fn test_register_invalid_fields() {
        let harness = TestHarness::with_memory_store();

        for body in [
            json!({ "username": "x", "email": "x@example.com", "password": "pw" }),
            json!({ "username": "xavier", "email": "nope", "password": "pw" }),
            json!({ "username": "xavier", "email": "x@example.com", "password": "" }),
        ] {
            let (status, _) = harness
                .send(json_request("POST", "/register", None, body))
                .await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        }
    }
}
