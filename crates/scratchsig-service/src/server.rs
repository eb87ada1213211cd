//! HTTP server for signature avatar lookups
//!
//! Provides /health, /users/{username}/avatar and /users/{username}/legacy.

use crate::types::{AvatarResponse, ErrorResponse, HealthResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use scratch_user_resolver::{normalize, LookupFailure, UserIdResolver};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

/// Shared state for the HTTP server
pub struct ServerState {
    pub resolver: UserIdResolver,
    pub started_at: DateTime<Utc>,
}

impl ServerState {
    pub fn new(resolver: UserIdResolver) -> Self {
        Self {
            resolver,
            started_at: Utc::now(),
        }
    }
}

pub type SharedState = Arc<ServerState>;

/// Create the HTTP router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/users/{username}/avatar", get(get_avatar))
        .route("/users/{username}/legacy", get(get_legacy))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(state: SharedState, port: u16) -> std::io::Result<()> {
    let router = create_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Health check endpoint
async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let uptime_secs = (Utc::now() - state.started_at).num_seconds().max(0) as u64;

    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs,
    })
}

/// Resolve a username to its user ID and avatar URL
async fn get_avatar(State(state): State<SharedState>, Path(username): Path<String>) -> Response {
    if username.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "username is required");
    }

    match state.resolver.resolve_avatar(&username).await {
        Ok(resolved) => Json(AvatarResponse {
            username: normalize(&username),
            user_id: resolved.user_id,
            avatar_url: resolved.avatar_url,
        })
        .into_response(),
        Err(LookupFailure::NotFound) => error_response(StatusCode::NOT_FOUND, "user not found"),
        Err(LookupFailure::TransientFailure) => {
            warn!(username = %username, "Avatar lookup failed");
            error_response(
                StatusCode::SERVICE_UNAVAILABLE,
                "Scratch API failure, please try again later",
            )
        }
    }
}

/// Lookup result in the legacy single-string form
async fn get_legacy(State(state): State<SharedState>, Path(username): Path<String>) -> Response {
    if username.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "username is required");
    }

    let result = state.resolver.resolve(&username).await;
    (StatusCode::OK, result.to_legacy_string()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use scratch_user_resolver::{LookupResult, MokaIdCache, UserDirectory};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    /// Fixed directory: "griffpatch" exists, "flaky" always fails
    #[derive(Default)]
    struct FixedDirectory {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl UserDirectory for FixedDirectory {
        async fn fetch_user_id(&self, username: &str) -> LookupResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match username {
                "griffpatch" => LookupResult::Found("1882674".to_string()),
                "Jane_Doe" => LookupResult::Found("42".to_string()),
                "flaky" => LookupResult::TransientFailure,
                _ => LookupResult::NotFound,
            }
        }
    }

    fn create_test_state() -> (SharedState, Arc<FixedDirectory>) {
        let directory = Arc::new(FixedDirectory::default());
        let resolver = UserIdResolver::new(directory.clone(), Arc::new(MokaIdCache::default()));
        (Arc::new(ServerState::new(resolver)), directory)
    }

    async fn send_get(router: Router, uri: &str) -> Response {
        router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (state, _) = create_test_state();
        let response = send_get(create_router(state), "/health").await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert!(json["uptime_secs"].as_u64().is_some());
    }

    #[tokio::test]
    async fn test_avatar_found() {
        let (state, _) = create_test_state();
        let response = send_get(create_router(state), "/users/Jane%20Doe/avatar").await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["username"], "Jane_Doe");
        assert_eq!(json["user_id"], "42");
        assert_eq!(
            json["avatar_url"],
            "https://cdn2.scratch.mit.edu/get_image/user/42_18x18.png"
        );
    }

    #[tokio::test]
    async fn test_avatar_served_from_cache() {
        let (state, directory) = create_test_state();
        let router = create_router(state);

        let first = send_get(router.clone(), "/users/griffpatch/avatar").await;
        let second = send_get(router, "/users/griffpatch/avatar").await;

        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(second.status(), StatusCode::OK);
        assert_eq!(directory.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_avatar_not_found() {
        let (state, _) = create_test_state();
        let response = send_get(create_router(state), "/users/ghost/avatar").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"], "user not found");
    }

    #[tokio::test]
    async fn test_avatar_transient_failure() {
        let (state, _) = create_test_state();
        let response = send_get(create_router(state), "/users/flaky/avatar").await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("try again later"));
    }

    #[tokio::test]
    async fn test_blank_username_rejected() {
        let (state, directory) = create_test_state();
        let response = send_get(create_router(state), "/users/%20/avatar").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(directory.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_legacy_endpoint() {
        let (state, _) = create_test_state();
        let router = create_router(state);

        let found = send_get(router.clone(), "/users/griffpatch/legacy").await;
        assert_eq!(found.status(), StatusCode::OK);
        assert_eq!(body_text(found).await, "1882674");

        let missing = send_get(router.clone(), "/users/ghost/legacy").await;
        assert_eq!(body_text(missing).await, "@SCRATCHSIG_USERNAME_NOT_FOUND");

        let failed = send_get(router, "/users/flaky/legacy").await;
        assert_eq!(body_text(failed).await, "@SCRATCHSIG_API_FAILURE");
    }
}
