//! API route handlers

pub mod budget;
pub mod health;
pub mod user;

use axum::{middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::middleware::{last_modified, require_principal};
use super::state::AppState;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        // Budget endpoints
        .route(
            "/budgets",
            get(budget::list_budgets).post(budget::create_budget),
        )
        .route(
            "/budgets/:id",
            get(budget::get_budget)
                .post(budget::edit_budget)
                .delete(budget::delete_budget),
        )
        // Current user
        .route("/me", get(user::me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_principal,
        ));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(protected)
        .layer(middleware::from_fn(last_modified))
        .with_state(state)
}

/// The router with tracing and optional CORS, as served
pub fn build_app(state: AppState, enable_cors: bool) -> Router {
    let mut router = create_router(state);

    if enable_cors {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router.layer(TraceLayer::new_for_http())
}
