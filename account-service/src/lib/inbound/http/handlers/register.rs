use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::SessionResponseData;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::ports::AccountServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;
use crate::user::errors::NameError;
use crate::user::errors::PasswordError;

pub async fn register<S: AccountServicePort>(
    State(state): State<AppState<S>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<ApiSuccess<SessionResponseData>, ApiError> {
    let Json(body) = body?;

    state
        .account_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|session| ApiSuccess::new(StatusCode::CREATED, session.into()))
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Clone, Deserialize)]
pub struct RegisterRequest {
    name: String,
    email: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid name: {0}")]
    Name(#[from] NameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordError),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, ParseRegisterRequestError> {
        let name = DisplayName::new(self.name)?;
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        Ok(RegisterUserCommand::new(name, email, password))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
