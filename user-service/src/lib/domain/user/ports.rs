use async_trait::async_trait;

use crate::user::errors::UserError;
use crate::user::models::EmailAddress;
use crate::user::models::NewUser;
use crate::user::models::Page;
use crate::user::models::Registration;
use crate::user::models::StoredCredential;
use crate::user::models::UpdateUserCommand;
use crate::user::models::User;
use crate::user::models::UserId;
use crate::user::requests::RegisterRequest;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Validate a signup request and create the account.
    ///
    /// # Arguments
    /// * `request` - Raw signup payload
    ///
    /// # Returns
    /// `Created` with the new user, or `Rejected` with every rule violation
    ///
    /// # Errors
    /// * `DuplicateUser` - Email is already registered
    /// * `Hashing` - Password hashing failed
    /// * `Storage` - Database operation failed
    async fn register(&self, request: RegisterRequest) -> Result<Registration, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Storage` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Retrieve one page of users, newest first.
    ///
    /// # Errors
    /// * `Storage` - Database operation failed
    async fn list_users(&self, page: Page) -> Result<Vec<User>, UserError>;

    /// Replace a user's first and last name.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Storage` - Database operation failed
    async fn update_user(&self, id: &UserId, command: UpdateUserCommand)
        -> Result<User, UserError>;

    /// Delete existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Storage` - Database operation failed
    async fn delete_user(&self, id: &UserId) -> Result<(), UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `DuplicateUser` - Email is already registered
    /// * `Storage` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Whether an account with this email exists.
    ///
    /// # Errors
    /// * `Storage` - Database operation failed
    async fn exists(&self, email: &EmailAddress) -> Result<bool, UserError>;

    /// Retrieve the stored password digest for an email.
    ///
    /// # Returns
    /// None if no account uses this email
    ///
    /// # Errors
    /// * `Storage` - Database operation failed
    async fn find_credential(&self, email: &str) -> Result<Option<StoredCredential>, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `Storage` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve one page of users ordered by creation time, newest first.
    ///
    /// # Errors
    /// * `Storage` - Database operation failed
    async fn list(&self, page: Page) -> Result<Vec<User>, UserError>;

    /// Update names of an existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Storage` - Database operation failed
    async fn update(&self, id: &UserId, command: UpdateUserCommand) -> Result<User, UserError>;

    /// Remove user from storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Storage` - Database operation failed
    async fn delete(&self, id: &UserId) -> Result<(), UserError>;
}
