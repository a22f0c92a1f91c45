//! Route table and middleware stack.

use std::any::Any;

use axum::extract::DefaultBodyLimit;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::handlers::{
    dates, details, health, incomplete, only_crud, only_get, only_get_post_delete, photos, popular, preflight, search,
    wishlist,
};
use crate::state::AppState;

/// Photo uploads carry base64 payloads inline
pub const BODY_LIMIT_BYTES: usize = 25 * 1024 * 1024;

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    ApiError::internal(details).into_response()
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/content-search",
            get(search::content_search).options(preflight).fallback(only_get),
        )
        .route(
            "/movies-search",
            get(search::movies_search).options(preflight).fallback(only_get),
        )
        .route(
            "/movie-details",
            get(details::movie_details).options(preflight).fallback(only_get),
        )
        .route(
            "/tv-details",
            get(details::tv_details).options(preflight).fallback(only_get),
        )
        .route(
            "/popular-content",
            get(popular::popular_content).options(preflight).fallback(only_get),
        )
        .route(
            "/movie-dates",
            get(dates::list_dates)
                .post(dates::create_date)
                .put(dates::update_date)
                .delete(dates::delete_date)
                .options(preflight)
                .fallback(only_crud),
        )
        .route(
            "/incomplete-dates",
            get(incomplete::incomplete_dates).options(preflight).fallback(only_get),
        )
        .route(
            "/wishlist",
            get(wishlist::list_items)
                .post(wishlist::add_item)
                .put(wishlist::update_item)
                .delete(wishlist::remove_item)
                .options(preflight)
                .fallback(only_crud),
        )
        .route(
            "/photos",
            get(photos::list_photos)
                .post(photos::upload_photos)
                .delete(photos::delete_photo)
                .options(preflight)
                .fallback(only_get_post_delete),
        )
}

/// Build the full application router: `/health` plus everything under `/api`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .nest("/api", api_routes())
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
