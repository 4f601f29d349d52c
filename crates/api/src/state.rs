use std::sync::Arc;

use starlet_core::media::MediaRoot;
use starlet_pipeline::{CharacterService, ContentService, GenerateService, MediaService};

use crate::config::ServerConfig;
use crate::supabase::SupabaseAdmin;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// Everything here is constructed once at process start and shared
/// read-only thereafter; cloning is cheap (inner data is behind `Arc`
/// or is already cheap to clone).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: starlet_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// On-disk media tree and path conventions.
    pub media: MediaRoot,
    /// Character creation/deletion pipeline.
    pub characters: Arc<CharacterService>,
    /// Legacy content-plan pipeline.
    pub content: Arc<ContentService>,
    /// Legacy plan-driven media pipeline.
    pub legacy_media: Arc<MediaService>,
    /// v2 generation pipeline.
    pub generate: Arc<GenerateService>,
    /// Identity provider admin client.
    pub supabase: Arc<SupabaseAdmin>,
}
