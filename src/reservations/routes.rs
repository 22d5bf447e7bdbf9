use super::handlers;
use axum::{
    routing::{get, post},
    Router,
};

/// Creates the reservations router
pub fn reservations_routes() -> Router {
    Router::new()
        .route(
            "/api/reservations",
            post(handlers::submit_reservation).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/reservations/policy",
            get(handlers::reservation_policy).fallback(handlers::method_not_allowed),
        )
}
