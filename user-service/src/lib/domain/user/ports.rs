use async_trait::async_trait;

use crate::domain::user::models::Credentials;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserChanges;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Storage of user records and their credentials.
///
/// Lives outside the service; the HTTP layer only talks to it through this port.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Check credentials and return the matching user.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `StoreError` - Storage operation failed
    async fn login(&self, credentials: &Credentials) -> Result<User, UserError>;

    /// Persist a self-registered user.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `StoreError` - Storage operation failed
    async fn register(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve all users.
    ///
    /// # Errors
    /// * `StoreError` - Storage operation failed
    async fn list_all(&self) -> Result<Vec<User>, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `StoreError` - Storage operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Persist a user created by an authenticated caller.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `StoreError` - Storage operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Apply a partial update.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `UsernameAlreadyExists` - New username is already taken
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `StoreError` - Storage operation failed
    async fn update(&self, id: &UserId, changes: UserChanges) -> Result<User, UserError>;

    /// Remove user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `StoreError` - Storage operation failed
    async fn delete(&self, id: &UserId) -> Result<(), UserError>;
}
