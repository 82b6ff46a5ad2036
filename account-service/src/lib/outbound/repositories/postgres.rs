use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserProfile;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const EMAIL_UNIQUE_INDEX: &str = "users_email_key";

/// User store backed by JSONB documents in PostgreSQL.
///
/// Each row is `(id, document)`; email uniqueness comes from the
/// `users_email_key` index on `document ->> 'email'`.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Stored shape of a user document.
#[derive(Debug, Serialize, Deserialize)]
struct UserDocument {
    name: String,
    email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    password_hash: Option<String>,
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    document: Json<UserDocument>,
}

impl UserRow {
    fn into_user(self) -> Result<User, UserError> {
        let Json(document) = self.document;
        let password_hash = document.password_hash.ok_or_else(|| {
            UserError::StoreUnavailable(format!("User document {} has no password hash", self.id))
        })?;

        Ok(User {
            id: UserId(self.id),
            name: stored_name(document.name)?,
            email: stored_email(document.email)?,
            password_hash,
        })
    }

    fn into_profile(self) -> Result<UserProfile, UserError> {
        let Json(document) = self.document;

        Ok(UserProfile {
            id: UserId(self.id),
            name: stored_name(document.name)?,
            email: stored_email(document.email)?,
        })
    }
}

// Stored documents were validated on the way in; failing here means the
// collection was edited out of band.
fn stored_name(name: String) -> Result<DisplayName, UserError> {
    DisplayName::new(name)
        .map_err(|e| UserError::StoreUnavailable(format!("Corrupt name: {}", e)))
}

fn stored_email(email: String) -> Result<EmailAddress, UserError> {
    EmailAddress::new(email)
        .map_err(|e| UserError::StoreUnavailable(format!("Corrupt email: {}", e)))
}

fn store_error(e: sqlx::Error) -> UserError {
    UserError::StoreUnavailable(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let document = UserDocument {
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            password_hash: Some(user.password_hash.clone()),
        };

        sqlx::query(
            r#"
            INSERT INTO users (id, document)
            VALUES ($1, $2)
            "#,
        )
        .bind(user.id.0)
        .bind(Json(&document))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(EMAIL_UNIQUE_INDEX)
                {
                    return UserError::DuplicateEmail(user.email.as_str().to_string());
                }
            }
            store_error(e)
        })?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, document
            FROM users
            WHERE document ->> 'email' = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, document
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_profile_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, UserError> {
        // The hash is removed by the query, so it never leaves the database.
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, document - 'password_hash' AS document
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.map(UserRow::into_profile).transpose()
    }
}
