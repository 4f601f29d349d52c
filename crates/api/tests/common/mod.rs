//! Shared test harness: builds the full application router with all
//! middleware layers, a lazily-connected pool, and a known JWT secret.
//!
//! The pool never reaches a database -- tests in this suite only
//! exercise paths (auth rejection, upload validation, health, static
//! serving) that settle before the first query.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, StatusCode};
use axum::Router;
use jsonwebtoken::{encode, EncodingKey, Header};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use uuid::Uuid;

use starlet_api::config::ServerConfig;
use starlet_api::routes;
use starlet_api::state::AppState;
use starlet_api::supabase::SupabaseAdmin;
use starlet_core::media::MediaRoot;
use starlet_fal::FalClient;
use starlet_openrouter::OpenRouterClient;
use starlet_pipeline::{CharacterService, ContentService, GenerateService, MediaService};

/// Secret the test tokens are signed with.
pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults and the known secret.
pub fn test_config(data_dir: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        data_dir,
        supabase_url: "http://localhost:54321".to_string(),
        supabase_service_key: "service-key".to_string(),
        supabase_jwt_secret: TEST_JWT_SECRET.to_string(),
        fal_key: "test-fal-key".to_string(),
        openrouter_api_key: "test-openrouter-key".to_string(),
        openrouter_model: "moonshotai/kimi-k2".to_string(),
    }
}

/// A fresh media root under the system temp directory.
pub fn temp_media_dir() -> PathBuf {
    std::env::temp_dir().join(format!("starlet-api-test-{}", Uuid::new_v4()))
}

/// Pool that parses its URL but never connects.
pub fn lazy_pool() -> starlet_db::DbPool {
    sqlx::postgres::PgPoolOptions::new()
        .connect_lazy("postgres://localhost/unreachable")
        .expect("lazy pool creation should succeed")
}

/// Issue a valid access token for the given user id.
pub fn issue_token(user_id: Uuid) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = serde_json::json!({
        "sub": user_id,
        "email": "user@example.com",
        "aud": "authenticated",
        "exp": now + 3600,
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("token encoding should succeed")
}

/// Build the full application router against the given media root.
///
/// Mirrors the router construction in `main.rs` so tests exercise the
/// same middleware stack (CORS, request ID, timeout, panic recovery)
/// that production uses.
pub fn build_test_app(data_dir: PathBuf) -> Router {
    let config = test_config(data_dir.clone());
    let pool = lazy_pool();
    let media = MediaRoot::new(data_dir);
    media
        .init_directories()
        .expect("media directories should be creatable");

    let fal = Arc::new(FalClient::new(config.fal_key.clone()));
    let openrouter = Arc::new(OpenRouterClient::new(
        config.openrouter_api_key.clone(),
        config.openrouter_model.clone(),
    ));
    let supabase = Arc::new(SupabaseAdmin::new(
        config.supabase_url.clone(),
        config.supabase_service_key.clone(),
    ));

    let characters = Arc::new(CharacterService::new(
        pool.clone(),
        media.clone(),
        fal.clone(),
        openrouter.clone(),
    ));
    let content = Arc::new(ContentService::new(pool.clone(), openrouter.clone()));
    let legacy_media = Arc::new(MediaService::new(pool.clone(), media.clone(), fal.clone()));
    let generate = Arc::new(GenerateService::new(
        pool.clone(),
        media.clone(),
        fal.clone(),
        openrouter.clone(),
    ));

    let state = AppState {
        pool,
        config: Arc::new(config),
        media: media.clone(),
        characters,
        content,
        legacy_media,
        generate,
        supabase,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:3000".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .nest("/api", routes::api_routes())
        .nest_service("/media/images", ServeDir::new(media.images_dir()))
        .nest_service("/media/videos", ServeDir::new(media.videos_dir()))
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Collect a response body into JSON.
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    use http_body_util::BodyExt;
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Build a single-file multipart body with the given field metadata.
pub fn multipart_body(
    field_name: &str,
    filename: &str,
    content_type: &str,
    data: &[u8],
) -> (String, Vec<u8>) {
    let boundary = "starlet-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field_name}\"; \
             filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    (
        format!("multipart/form-data; boundary={boundary}"),
        body,
    )
}
