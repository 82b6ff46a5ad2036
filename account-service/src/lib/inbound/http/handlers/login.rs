use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::SessionResponseData;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn login<S: AccountServicePort>(
    State(state): State<AppState<S>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<SessionResponseData>, ApiError> {
    let Json(body) = body?;

    let command = LoginCommand {
        email: body.email,
        password: body.password,
    };

    state
        .account_service
        .login(command)
        .await
        .map_err(ApiError::from)
        .map(|session| ApiSuccess::new(StatusCode::OK, session.into()))
}

#[derive(Clone, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}
