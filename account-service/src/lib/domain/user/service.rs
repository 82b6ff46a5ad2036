use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenAuthority;
use tokio::sync::OnceCell;

use crate::domain::user::models::AuthSession;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserProfile;
use crate::user::errors::UserError;
use crate::user::ports::AccountServicePort;
use crate::user::ports::UserRepository;

/// Domain service implementation for account operations.
///
/// Owns password hashing and token issuance; persistence is injected.
/// Argon2 work runs on the blocking pool so it never stalls the executor.
pub struct AccountService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    token_authority: Arc<TokenAuthority>,
    password_hasher: PasswordHasher,
    // Verified against when the email is unknown, so both login failures
    // cost one Argon2 verification.
    decoy_hash: OnceCell<String>,
}

impl<UR> AccountService<UR>
where
    UR: UserRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `token_authority` - Signs and verifies identity tokens
    pub fn new(repository: Arc<UR>, token_authority: Arc<TokenAuthority>) -> Self {
        Self {
            repository,
            token_authority,
            password_hasher: PasswordHasher::new(),
            decoy_hash: OnceCell::new(),
        }
    }

    /// Retrieve a full user by identifier.
    pub async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| UserError::UserNotFound(id.to_string()))
    }

    /// Retrieve a full user by (normalised) email.
    pub async fn get_user_by_email(&self, email: &EmailAddress) -> Result<User, UserError> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| UserError::UserNotFound(email.to_string()))
    }

    /// Retrieve a user without its password hash.
    pub async fn get_profile(&self, id: &UserId) -> Result<UserProfile, UserError> {
        self.repository
            .find_profile_by_id(id)
            .await?
            .ok_or_else(|| UserError::UserNotFound(id.to_string()))
    }

    /// Check a plaintext password against the user's stored hash.
    ///
    /// # Errors
    /// * `Internal` - Stored hash is unreadable or the blocking task failed
    pub async fn verify_password(&self, user: &User, password: &str) -> Result<bool, UserError> {
        let hasher = self.password_hasher.clone();
        let password = password.to_owned();
        let stored_hash = user.password_hash.clone();

        let matches =
            tokio::task::spawn_blocking(move || hasher.verify(&password, &stored_hash)).await??;

        Ok(matches)
    }

    async fn hash_password(&self, password: Password) -> Result<String, UserError> {
        let hasher = self.password_hasher.clone();

        let hash = tokio::task::spawn_blocking(move || hasher.hash(password.expose())).await??;

        Ok(hash)
    }

    async fn verify_against_decoy(&self, password: &str) -> Result<(), UserError> {
        let decoy_hash = self
            .decoy_hash
            .get_or_try_init(|| async {
                let hasher = self.password_hasher.clone();
                let hash =
                    tokio::task::spawn_blocking(move || hasher.hash("decoy-password")).await??;
                Ok::<_, UserError>(hash)
            })
            .await?;

        let hasher = self.password_hasher.clone();
        let password = password.to_owned();
        let decoy_hash = decoy_hash.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &decoy_hash)).await??;

        Ok(())
    }

    fn open_session(&self, profile: UserProfile) -> Result<AuthSession, UserError> {
        let token = self.token_authority.issue(&profile.id.to_string())?;

        Ok(AuthSession { profile, token })
    }
}

#[async_trait]
impl<UR> AccountServicePort for AccountService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<AuthSession, UserError> {
        // Fast path only; the store's unique index settles concurrent races.
        if self.repository.find_by_email(&command.email).await?.is_some() {
            return Err(UserError::DuplicateEmail(command.email.to_string()));
        }

        let password_hash = self.hash_password(command.password).await?;

        let user = User {
            id: UserId::new(),
            name: command.name,
            email: command.email,
            password_hash,
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        self.open_session(created_user.profile())
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthSession, UserError> {
        let user = match EmailAddress::new(command.email) {
            Ok(email) => self.repository.find_by_email(&email).await?,
            Err(_) => None,
        };

        let Some(user) = user else {
            self.verify_against_decoy(&command.password).await?;
            tracing::debug!("Login rejected: unknown email");
            return Err(UserError::InvalidCredentials);
        };

        if !self.verify_password(&user, &command.password).await? {
            tracing::debug!(user_id = %user.id, "Login rejected: wrong password");
            return Err(UserError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id, "User logged in");
        self.open_session(user.profile())
    }

    async fn authenticate(&self, token: &str) -> Result<UserProfile, UserError> {
        let claims = self.token_authority.verify(token)?;

        let user_id = UserId::from_string(&claims.sub)
            .map_err(|e| UserError::TokenInvalid(format!("Unusable subject: {}", e)))?;

        self.get_profile(&user_id).await
    }
}
