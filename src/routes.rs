// src/routes.rs

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::{comments, health, posts, profile, search},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Page routes for posts, comments, profiles and search.
/// * Static files from the configured public directory as the fallback.
/// * Global middleware (Trace, body size limit).
pub fn create_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.public_dir);

    let post_routes = Router::new()
        .route("/", get(posts::list_posts))
        .route("/post/{id}", get(posts::get_post))
        .route("/post/{id}/comment", post(comments::create_comment))
        .route(
            "/new-post",
            get(posts::new_post_form).post(posts::create_post),
        );

    let profile_routes = Router::new()
        .route("/profile/{username}", get(profile::get_profile))
        .route(
            "/edit-profile/{username}",
            get(profile::edit_profile_form).post(profile::update_bio),
        );

    Router::new()
        .merge(post_routes)
        .merge(profile_routes)
        .route("/search", get(search::search))
        .route("/health", get(health::health))
        .fallback_service(static_files)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(state.config.max_body_bytes)),
        )
        .with_state(state)
}
