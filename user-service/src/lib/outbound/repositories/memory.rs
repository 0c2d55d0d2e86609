use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::user::models::Credentials;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Password;
use crate::domain::user::models::User;
use crate::domain::user::models::UserChanges;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserStore;
use crate::user::errors::UserError;

struct StoredUser {
    user: User,
    password: Password,
}

/// Volatile user store for local runs and tests.
///
/// Usernames and emails are unique. Passwords are compared as given.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<UserId, StoredUser>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        ensure_unique(&users, None, Some(&new_user.username), Some(&new_user.email))?;

        let user = User {
            id: UserId::new(),
            username: new_user.username,
            email: new_user.email,
            role: new_user.role,
            created_at: Utc::now(),
        };
        users.insert(
            user.id,
            StoredUser {
                user: user.clone(),
                password: new_user.password,
            },
        );

        Ok(user)
    }
}

fn ensure_unique(
    users: &HashMap<UserId, StoredUser>,
    skip: Option<&UserId>,
    username: Option<&Username>,
    email: Option<&EmailAddress>,
) -> Result<(), UserError> {
    for stored in users.values() {
        if Some(&stored.user.id) == skip {
            continue;
        }
        if username == Some(&stored.user.username) {
            return Err(UserError::UsernameAlreadyExists(
                stored.user.username.to_string(),
            ));
        }
        if email == Some(&stored.user.email) {
            return Err(UserError::EmailAlreadyExists(stored.user.email.to_string()));
        }
    }

    Ok(())
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn login(&self, credentials: &Credentials) -> Result<User, UserError> {
        let users = self.users.read().await;

        users
            .values()
            .find(|stored| {
                stored.user.email == credentials.email && stored.password == credentials.password
            })
            .map(|stored| stored.user.clone())
            .ok_or(UserError::InvalidCredentials)
    }

    async fn register(&self, user: NewUser) -> Result<User, UserError> {
        self.insert(user).await
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let users = self.users.read().await;

        let mut all: Vec<User> = users.values().map(|stored| stored.user.clone()).collect();
        all.sort_by_key(|user| user.created_at);
        Ok(all)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;

        Ok(users.get(id).map(|stored| stored.user.clone()))
    }

    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        self.insert(user).await
    }

    async fn update(&self, id: &UserId, changes: UserChanges) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        if !users.contains_key(id) {
            return Err(UserError::NotFound(id.to_string()));
        }
        ensure_unique(
            &users,
            Some(id),
            changes.username.as_ref(),
            changes.email.as_ref(),
        )?;

        let stored = users
            .get_mut(id)
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;
        if let Some(username) = changes.username {
            stored.user.username = username;
        }
        if let Some(email) = changes.email {
            stored.user.email = email;
        }
        if let Some(password) = changes.password {
            stored.password = password;
        }
        if let Some(role) = changes.role {
            stored.user.role = role;
        }

        Ok(stored.user.clone())
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let mut users = self.users.write().await;

        users
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }
}
