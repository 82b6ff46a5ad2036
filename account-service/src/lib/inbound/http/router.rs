use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::get_profile::get_profile;
use super::handlers::login::login;
use super::handlers::register::register;
use super::middleware::authenticate as auth_middleware;
use crate::domain::user::ports::AccountServicePort;

pub struct AppState<S: AccountServicePort> {
    pub account_service: Arc<S>,
}

impl<S: AccountServicePort> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            account_service: Arc::clone(&self.account_service),
        }
    }
}

pub fn create_router<S: AccountServicePort>(account_service: Arc<S>) -> Router {
    let state = AppState { account_service };

    let public_routes = Router::new()
        .route("/api/users/register", post(register::<S>))
        .route("/api/users/login", post(login::<S>));

    let protected_routes = Router::new()
        .route("/api/users/profile", get(get_profile))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::<S>,
        ));

    // Headers are left out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use auth::TokenAuthority;
    use axum::http::header;
    use axum::http::StatusCode;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::user::service::AccountService;
    use crate::outbound::repositories::InMemoryUserRepository;

    const SECRET: &[u8] = b"router-test-secret-at-least-32-bytes!";

    fn router() -> Router {
        let service = AccountService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(TokenAuthority::new(SECRET)),
        );
        create_router(Arc::new(service))
    }

    async fn message(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        body["message"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_profile_without_header() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/api/users/profile")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(message(response).await, "not authorized, no token");
    }

    #[tokio::test]
    async fn test_profile_with_garbage_token() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/api/users/profile")
                    .header(header::AUTHORIZATION, "Bearer invalid.token.here")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(message(response).await, "not authorized, invalid token");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/api/users/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_register_body_missing_field() {
        let response = router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/users/register")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"name":"A","email":"a@x.com"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            message(response).await,
            "request body is missing or malformed"
        );
    }
}
