pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::profile::handlers as profiles;
use crate::state::AppState;
use crate::timeline::handlers as timeline;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Career-sheet profiles
        .route("/api/v1/profiles", post(profiles::handle_create_profile))
        .route(
            "/api/v1/profiles/:id",
            get(profiles::handle_get_profile).patch(profiles::handle_update_profile),
        )
        .route(
            "/api/v1/profiles/:id/careers",
            post(profiles::handle_add_career),
        )
        .route(
            "/api/v1/profiles/:id/careers/:index",
            put(profiles::handle_update_career).delete(profiles::handle_delete_career),
        )
        // Timeline layout
        .route(
            "/api/v1/profiles/:id/timeline",
            post(timeline::handle_profile_timeline),
        )
        .route("/api/v1/timeline/layout", post(timeline::handle_layout))
        .with_state(state)
}
