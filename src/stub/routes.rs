use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{
    handlers,
    request_id::{make_span_with_request_id, request_id_middleware},
    StubState,
};

/// Creates the stub API router with all routes
pub fn create_router(state: StubState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/api/media",
            get(handlers::list_media).post(handlers::create_media),
        )
        .route(
            "/api/media/:id",
            put(handlers::update_media).delete(handlers::delete_media),
        )
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                // Browser clients call from another origin
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
