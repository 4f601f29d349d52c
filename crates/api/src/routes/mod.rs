pub mod health;

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::Router;

use starlet_core::upload::MAX_VIDEO_UPLOAD_BYTES;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy (auth is enforced per-handler via extractors;
/// downloads and health are public):
///
/// ```text
/// /health                         health check
///
/// /characters                     list, create (JSON or multipart)
/// /characters/{id}                get, delete (cascading)
///
/// /content-plans                  list (?character_id=), create
/// /content-plans/{id}             get
///
/// /media/generate                 legacy plan-driven image/video (POST)
/// /media/history                  media history (?character_id=&media_type=)
/// /media/upload-video             driving video upload (POST)
/// /media/generate-dreamactor      legacy motion transfer (POST)
/// /media/{plan_id}                media rows for a plan
///
/// /generate/image                 v2 direct image (POST)
/// /generate/video/prepare         v2 video phase 1 (POST)
/// /generate/video/final           v2 video phase 2 (POST)
/// /generate/video/motion          v2 motion control (POST)
///
/// /upload/image                   reference image upload (POST)
///
/// /admin/users                    list, create (admin only)
/// /admin/users/{id}               delete (admin only)
///
/// /download/images/{filename}     image as attachment (public)
/// /download/videos/{filename}     video as attachment (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    let character_routes = Router::new()
        .route(
            "/",
            get(handlers::character::list).post(handlers::character::create),
        )
        .route(
            "/{id}",
            get(handlers::character::get_by_id).delete(handlers::character::delete),
        );

    let content_plan_routes = Router::new()
        .route(
            "/",
            get(handlers::content_plan::list).post(handlers::content_plan::create),
        )
        .route("/{id}", get(handlers::content_plan::get_by_id));

    // Fixed segments are declared before the `{plan_id}` catch-all.
    let media_routes = Router::new()
        .route("/generate", post(handlers::media::generate))
        .route("/history", get(handlers::media::history))
        .route("/upload-video", post(handlers::upload::upload_video))
        .route(
            "/generate-dreamactor",
            post(handlers::media::generate_motion_transfer),
        )
        .route("/{plan_id}", get(handlers::media::list_by_plan));

    let generate_routes = Router::new()
        .route("/image", post(handlers::generate::generate_image))
        .route("/video/prepare", post(handlers::generate::prepare_video))
        .route("/video/final", post(handlers::generate::finalize_video))
        .route(
            "/video/motion",
            post(handlers::generate::generate_motion_video),
        );

    let admin_routes = Router::new()
        .route(
            "/users",
            get(handlers::admin::list_users).post(handlers::admin::create_user),
        )
        .route("/users/{id}", delete(handlers::admin::delete_user));

    let download_routes = Router::new()
        .route(
            "/images/{filename}",
            get(handlers::downloads::download_image),
        )
        .route(
            "/videos/{filename}",
            get(handlers::downloads::download_video),
        );

    Router::new()
        .merge(health::router())
        .nest("/characters", character_routes)
        .nest("/content-plans", content_plan_routes)
        .nest("/media", media_routes)
        .nest("/generate", generate_routes)
        .nest("/admin", admin_routes)
        .nest("/download", download_routes)
        .route("/upload/image", post(handlers::upload::upload_image))
        // Driving videos are the largest accepted payload; the upload
        // validators enforce the per-kind caps below this ceiling.
        .layer(DefaultBodyLimit::max(MAX_VIDEO_UPLOAD_BYTES as usize + 1024 * 1024))
}
