use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::user::models::AuthSession;
use crate::domain::user::models::UserProfile;
use crate::user::errors::UserError;

pub mod get_profile;
pub mod login;
pub mod register;

pub(crate) const NO_TOKEN: &str = "not authorized, no token";
pub(crate) const INVALID_TOKEN: &str = "not authorized, invalid token";
pub(crate) const USER_NOT_FOUND: &str = "user not found";
pub(crate) const INVALID_CREDENTIALS: &str = "invalid email or password";
pub(crate) const EMAIL_TAKEN: &str = "email is already registered";
pub(crate) const INTERNAL: &str = "internal server error";
pub(crate) const MALFORMED_BODY: &str = "request body is missing or malformed";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Outward error. Messages are fixed strings or validation text; internal
/// detail is logged before it gets here, never serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiErrorData { message })).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidName(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidPassword(_)
            | UserError::InvalidUserId(_) => ApiError::UnprocessableEntity(err.to_string()),
            UserError::DuplicateEmail(_) => ApiError::BadRequest(EMAIL_TAKEN.to_string()),
            UserError::InvalidCredentials => {
                ApiError::Unauthorized(INVALID_CREDENTIALS.to_string())
            }
            UserError::TokenMissing => ApiError::Unauthorized(NO_TOKEN.to_string()),
            UserError::TokenInvalid(_) | UserError::TokenExpired => {
                tracing::warn!(reason = %err, "Bearer token rejected");
                ApiError::Unauthorized(INVALID_TOKEN.to_string())
            }
            UserError::UserNotFound(_) => ApiError::NotFound(USER_NOT_FOUND.to_string()),
            UserError::StoreUnavailable(_) | UserError::Internal(_) => {
                tracing::error!(error = %err, "Request failed");
                ApiError::InternalServerError(INTERNAL.to_string())
            }
        }
    }
}

// serde's detail names fields and positions; it goes to the log only.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "Request body rejected");

        match rejection {
            JsonRejection::JsonDataError(_) => {
                ApiError::UnprocessableEntity(MALFORMED_BODY.to_string())
            }
            _ => ApiError::BadRequest(MALFORMED_BODY.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Body returned by register and login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionResponseData {
    pub id: String,
    pub name: String,
    pub email: String,
    pub token: String,
}

impl From<AuthSession> for SessionResponseData {
    fn from(session: AuthSession) -> Self {
        let AuthSession { profile, token } = session;

        Self {
            id: profile.id.to_string(),
            name: profile.name.as_str().to_string(),
            email: profile.email.as_str().to_string(),
            token,
        }
    }
}

/// Body returned by the profile endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileResponseData {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&UserProfile> for ProfileResponseData {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            name: profile.name.as_str().to_string(),
            email: profile.email.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::errors::NameError;

    #[test]
    fn test_token_failures_share_one_message() {
        let expired = ApiError::from(UserError::TokenExpired);
        let invalid = ApiError::from(UserError::TokenInvalid("InvalidSignature".to_string()));

        assert_eq!(expired, invalid);
        assert_eq!(expired, ApiError::Unauthorized(INVALID_TOKEN.to_string()));
    }

    #[test]
    fn test_infrastructure_detail_not_exposed() {
        let err = ApiError::from(UserError::StoreUnavailable(
            "error communicating with database: Connection refused".to_string(),
        ));

        assert_eq!(err, ApiError::InternalServerError(INTERNAL.to_string()));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(UserError::DuplicateEmail("a@x.com".to_string())),
            ApiError::BadRequest(EMAIL_TAKEN.to_string())
        );
        assert_eq!(
            ApiError::from(UserError::InvalidCredentials),
            ApiError::Unauthorized(INVALID_CREDENTIALS.to_string())
        );
        assert_eq!(
            ApiError::from(UserError::TokenMissing),
            ApiError::Unauthorized(NO_TOKEN.to_string())
        );
        assert_eq!(
            ApiError::from(UserError::UserNotFound("id".to_string())),
            ApiError::NotFound(USER_NOT_FOUND.to_string())
        );
        assert!(matches!(
            ApiError::from(UserError::InvalidName(NameError::Empty)),
            ApiError::UnprocessableEntity(_)
        ));
    }

    #[test]
    fn test_error_response_status() {
        let response = ApiError::NotFound(USER_NOT_FOUND.to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
