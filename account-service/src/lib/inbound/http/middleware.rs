use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::models::UserProfile;
use crate::domain::user::ports::AccountServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Extension type carrying the resolved caller, password hash excluded.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub UserProfile);

/// Access guard for protected routes.
///
/// Missing token and rejected token both answer 401 with different messages;
/// a valid token whose user is gone answers 404. The first failing step ends
/// the request.
pub async fn authenticate<S: AccountServicePort>(
    State(state): State<AppState<S>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())
        .ok_or(UserError::TokenMissing)?
        .to_owned();

    let profile = state.account_service.authenticate(&token).await?;
    tracing::debug!(user_id = %profile.id, "Request authenticated");

    req.extensions_mut().insert(AuthenticatedUser(profile));

    Ok(next.run(req).await)
}

/// Extract the token from `Authorization: Bearer <token>`.
///
/// Any other scheme, an unreadable header, or an empty token counts as no
/// token at all.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
