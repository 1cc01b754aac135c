use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use super::customer;
use super::health;
use super::middleware::{logging_middleware, metrics_middleware};
use super::state::AppState;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Customer API
        .merge(customer::create_customer_router())
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::infrastructure::cache::CacheConfig;
    use crate::infrastructure::customer::InMemoryCustomerRepository;

    fn router() -> Router {
        create_router_with_state(AppState::with_repository(
            Arc::new(InMemoryCustomerRepository::new()),
            CacheConfig::default(),
        ))
    }

    async fn status_of(uri: &str) -> StatusCode {
        router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        assert_eq!(status_of("/health").await, StatusCode::OK);
        assert_eq!(status_of("/live").await, StatusCode::OK);
        assert_eq!(status_of("/ready").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_customer_routes_are_mounted() {
        assert_eq!(status_of("/customer").await, StatusCode::OK);
        assert_eq!(status_of("/customer/save/save").await, StatusCode::OK);
        assert_eq!(status_of("/customer/nobody").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        assert_eq!(status_of("/customers/a/b/c").await, StatusCode::NOT_FOUND);
    }
}
