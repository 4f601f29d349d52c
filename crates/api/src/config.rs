use std::path::PathBuf;

/// Server configuration loaded from environment variables.
///
/// Connection settings have development defaults; secrets for the
/// upstream services are required and fail fast when missing.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `600` -- video
    /// synthesis blocks the request for the full upstream duration).
    pub request_timeout_secs: u64,
    /// Root of the on-disk media tree (default: `./data`).
    pub data_dir: PathBuf,
    /// Identity provider project URL (for the admin REST API).
    pub supabase_url: String,
    /// Identity provider service-role key.
    pub supabase_service_key: String,
    /// HS256 secret the identity provider signs access tokens with.
    pub supabase_jwt_secret: String,
    /// fal.ai API key.
    pub fal_key: String,
    /// OpenRouter API key.
    pub openrouter_api_key: String,
    /// OpenRouter model id (default: `moonshotai/kimi-k2`).
    pub openrouter_model: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                | Required | Default                 |
    /// |------------------------|----------|-------------------------|
    /// | `HOST`                 | no       | `0.0.0.0`               |
    /// | `PORT`                 | no       | `8000`                  |
    /// | `CORS_ORIGINS`         | no       | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS` | no       | `600`                   |
    /// | `DATA_DIR`             | no       | `./data`                |
    /// | `SUPABASE_URL`         | **yes**  | --                      |
    /// | `SUPABASE_SERVICE_KEY` | **yes**  | --                      |
    /// | `SUPABASE_JWT_SECRET`  | **yes**  | --                      |
    /// | `FAL_KEY`              | **yes**  | --                      |
    /// | `OPENROUTER_API_KEY`   | **yes**  | --                      |
    /// | `OPENROUTER_MODEL`     | no       | `moonshotai/kimi-k2`    |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing or a numeric one is
    /// malformed -- misconfiguration should fail at startup, not at the
    /// first request.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "600".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let data_dir = PathBuf::from(std::env::var("DATA_DIR").unwrap_or_else(|_| "./data".into()));

        let supabase_url =
            std::env::var("SUPABASE_URL").expect("SUPABASE_URL must be set in the environment");
        let supabase_service_key = std::env::var("SUPABASE_SERVICE_KEY")
            .expect("SUPABASE_SERVICE_KEY must be set in the environment");
        let supabase_jwt_secret = std::env::var("SUPABASE_JWT_SECRET")
            .expect("SUPABASE_JWT_SECRET must be set in the environment");

        let fal_key = std::env::var("FAL_KEY").expect("FAL_KEY must be set in the environment");

        let openrouter_api_key = std::env::var("OPENROUTER_API_KEY")
            .expect("OPENROUTER_API_KEY must be set in the environment");
        let openrouter_model =
            std::env::var("OPENROUTER_MODEL").unwrap_or_else(|_| "moonshotai/kimi-k2".into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            data_dir,
            supabase_url,
            supabase_service_key,
            supabase_jwt_secret,
            fal_key,
            openrouter_api_key,
            openrouter_model,
        }
    }
}
