use async_trait::async_trait;

use crate::domain::user::models::AuthSession;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserProfile;
use crate::user::errors::UserError;

/// Port for account operations exposed to inbound adapters.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new user and issue a token for it.
    ///
    /// # Arguments
    /// * `command` - Validated command containing name, email, and password
    ///
    /// # Returns
    /// Session with the created user's profile and a fresh token
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered
    /// * `StoreUnavailable` - Store operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<AuthSession, UserError>;

    /// Check credentials and issue a token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `StoreUnavailable` - Store operation failed
    async fn login(&self, command: LoginCommand) -> Result<AuthSession, UserError>;

    /// Resolve a bearer token to the profile it identifies.
    ///
    /// # Errors
    /// * `TokenInvalid` - Bad signature, malformed token, or unusable subject
    /// * `TokenExpired` - Token is past its expiry
    /// * `UserNotFound` - Token is valid but its subject no longer exists
    /// * `StoreUnavailable` - Store operation failed
    async fn authenticate(&self, token: &str) -> Result<UserProfile, UserError>;
}

/// Persistence operations for the user document collection.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// Uniqueness of the email is enforced here, atomically with the insert,
    /// so concurrent registrations of one address cannot both succeed.
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered
    /// * `StoreUnavailable` - Store operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve a full user (including password hash) by email.
    ///
    /// # Errors
    /// * `StoreUnavailable` - Store operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    /// Retrieve a full user (including password hash) by identifier.
    ///
    /// # Errors
    /// * `StoreUnavailable` - Store operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve a user by identifier with the password hash projected out.
    ///
    /// # Errors
    /// * `StoreUnavailable` - Store operation failed
    async fn find_profile_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, UserError>;
}
