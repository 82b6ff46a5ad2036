use axum::http::StatusCode;
use axum::Extension;

use super::ApiSuccess;
use super::ProfileResponseData;
use crate::inbound::http::middleware::AuthenticatedUser;

/// Return the caller's own profile, as resolved by the access guard.
pub async fn get_profile(
    Extension(AuthenticatedUser(profile)): Extension<AuthenticatedUser>,
) -> ApiSuccess<ProfileResponseData> {
    ApiSuccess::new(StatusCode::OK, (&profile).into())
}
