use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{Method, Uri},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use preschool_shared::constants::{CHAT_PATH, FILES_MOUNT, VIDEOS_MOUNT};
use preschool_shared::protocol::{ChatRequest, ChatResponse};

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::resolver::ReplyResolver;

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<ReplyResolver>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let resolver = ReplyResolver::canned(&config.public_base_url);
        Self {
            resolver: Arc::new(resolver),
            config: Arc::new(config),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/info", get(server_info))
        .route(CHAT_PATH, post(chat))
        .nest_service(VIDEOS_MOUNT, ServeDir::new(&state.config.videos_dir))
        .nest_service(FILES_MOUNT, ServeDir::new(&state.config.files_dir))
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Create the static asset directories if they are missing so the mounts
/// serve 404s instead of failing.
pub async fn prepare_asset_dirs(config: &ServerConfig) -> Result<(), ServerError> {
    for dir in [&config.videos_dir, &config.files_dir] {
        ensure_dir(dir).await?;
    }
    Ok(())
}

async fn ensure_dir(path: &Path) -> Result<(), ServerError> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|source| ServerError::AssetDir {
            path: path.to_path_buf(),
            source,
        })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct ServerInfoResponse {
    name: String,
    version: &'static str,
    chat_path: &'static str,
    videos_mount: &'static str,
    files_mount: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn server_info(State(state): State<AppState>) -> Json<ServerInfoResponse> {
    Json(ServerInfoResponse {
        name: state.config.instance_name.clone(),
        version: env!("CARGO_PKG_VERSION"),
        chat_path: CHAT_PATH,
        videos_mount: VIDEOS_MOUNT,
        files_mount: FILES_MOUNT,
    })
}

/// Always answers 200 with one reply. The raw body is parsed by hand so a
/// malformed or missing payload falls through to the fallback reply rather
/// than an extractor rejection.
async fn chat(State(state): State<AppState>, body: Bytes) -> Json<ChatResponse> {
    let request = ChatRequest::from_json(&body).unwrap_or_else(|e| {
        debug!(error = %e, "Unreadable chat request, answering with fallback");
        ChatRequest::default()
    });

    let reply = state.resolver.resolve(request.message.as_deref());
    debug!(message_len = request.text().len(), reply = %reply, "Resolved chat reply");

    Json(ChatResponse::new(reply))
}

async fn not_found(uri: Uri) -> ServerError {
    ServerError::NotFound(uri.path().to_string())
}

pub async fn serve(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let app = build_router(state);

    info!(addr = %addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
