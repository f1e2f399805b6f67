//! # Server Setup
//!
//! Application state, route registration, and HTTP server startup.

// region: --- Imports
use axum::http::{header, HeaderValue, Method};
use axum::routing::{delete, get, post};
use axum::{middleware, Router};
use lib_core::{create_pool, Config, DbPool};
use tower_cookies::CookieManagerLayer;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::handlers::{auth, notifications, posts, users};
use crate::middleware::{log_requests, require_auth, stamp_req};
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes.
///
/// `config` is loaded once at startup and read-only afterwards; the pool
/// is the only shared handle to the store.
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Config,
}
// endregion: --- AppState

// region: --- Server Configuration
/// Server configuration
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:5000")
    pub bind_address: String,
    /// Allowed CORS origins
    pub allowed_origins: Vec<String>,
    /// Database migrations path
    pub migrations_path: &'static str,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5000".to_string(),
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            migrations_path: "./migrations",
        }
    }
}
// endregion: --- Server Configuration

// region: --- Routes
/// Build the application router.
///
/// Everything except signup/login/logout goes through the auth
/// middleware, so handlers behind it can rely on an `AuthUser` being
/// present.
pub fn routes(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/users/profile/{username}", get(users::get_profile))
        .route("/api/users/suggested", get(users::get_suggested))
        .route("/api/users/follow/{id}", post(users::follow_unfollow))
        .route("/api/users/update", post(users::update_user))
        .route("/api/posts/create", post(posts::create_post))
        .route("/api/posts/comment/{id}", post(posts::comment_on_post))
        .route("/api/posts/like/{id}", post(posts::like_unlike_post))
        .route("/api/posts/likes/{id}", get(posts::get_liked_posts))
        .route("/api/posts/following", get(posts::get_following_posts))
        .route("/api/posts/all", get(posts::get_all_posts))
        .route("/api/posts/user/{username}", get(posts::get_user_posts))
        .route("/api/posts/{id}", delete(posts::delete_post))
        .route(
            "/api/notifications",
            get(notifications::get_notifications).delete(notifications::delete_notifications),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let public = Router::new()
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout));

    Router::new()
        .merge(protected)
        .merge(public)
        .layer(middleware::from_fn(log_requests))
        .layer(middleware::from_fn(stamp_req))
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
// endregion: --- Routes

// region: --- Server Setup
/// Initialize and start the HTTP server.
///
/// # Errors
///
/// Returns an error if configuration loading or validation fails, the
/// database cannot be opened or migrated, or the bind address is taken.
pub async fn start_server(server_config: ServerConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();

    dotenvy::dotenv().ok();

    info!("Loading configuration...");
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    // Ensure the data directory exists for a file-backed SQLite database.
    if let Some(db_path) = config.database_url.strip_prefix("sqlite:") {
        if let Some(parent) = std::path::Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
                info!("Created database directory: {:?}", parent);
            }
        }
    }

    info!("Connecting to database...");
    let pool = create_pool(&config.database_url).await?;

    info!("Running database migrations from: {}", server_config.migrations_path);
    let migrator =
        sqlx::migrate::Migrator::new(std::path::Path::new(server_config.migrations_path)).await?;
    migrator.run(&pool).await?;
    info!("Migrations complete");

    let cors = cors_layer(&server_config)?;

    let state = AppState { db: pool, config };
    let app = routes(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(&server_config.bind_address).await?;
    info!("Listening on http://{}", server_config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(server_config: &ServerConfig) -> anyhow::Result<CorsLayer> {
    let origins = server_config
        .allowed_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;

    // Credentials must be allowed for the session cookie to travel.
    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true))
}
// endregion: --- Server Setup
