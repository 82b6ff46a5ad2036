use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserProfile;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Process-local user store.
///
/// The email check and the insert happen under one write lock, which plays
/// the role of the unique index in the PostgreSQL store.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop a user, leaving any tokens issued for it still verifiable.
    ///
    /// Only compiled for tests, to model a user removed out of band.
    #[cfg(any(test, feature = "test-util"))]
    pub async fn remove(&self, id: &UserId) -> Option<User> {
        self.users.write().await.remove(id)
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if users.values().any(|existing| existing.email == user.email) {
            return Err(UserError::DuplicateEmail(user.email.to_string()));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;

        Ok(users.values().find(|user| &user.email == email).cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_profile_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, UserError> {
        Ok(self.users.read().await.get(id).map(User::profile))
    }
}
