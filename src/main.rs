use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_cookies::CookieManagerLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod auth;
mod state;

use praisesongs_backend::config;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "praisesongs_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration / 加载配置
    let app_config = config::load_config().expect("Failed to load configuration");
    tracing::info!(
        "Server will listen on {}:{}",
        app_config.server.host,
        app_config.server.port
    );

    // Create data directory if not exists / 创建数据目录
    let data_dir = app_config.get_data_dir();
    if !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)?;
        tracing::info!("Created data directory: {:?}", data_dir);
    }

    // 读取当前语料指针，首次运行写入默认值
    let corpus_config = config::load_corpus_config(&data_dir).map_err(anyhow::Error::msg)?;
    tracing::info!("Active corpus: {}", corpus_config.active_file);

    // 上传体积上限，预留 multipart 包装开销
    let body_limit = app_config.max_upload_bytes() + 1024 * 1024;

    let state = Arc::new(AppState::new(app_config, corpus_config));

    let app = Router::new()
        .route("/api/health", get(api::server::health_check))
        .route("/api/auth/login", post(api::auth::login))
        .route("/api/auth/logout", post(api::auth::logout))
        .route("/api/auth/check", get(api::auth::check))
        .route("/api/config", get(api::config::get_config))
        .route("/api/config", post(api::config::set_config))
        .route("/api/search", post(api::search::search))
        .route("/api/songs", get(api::search::list_songs))
        .route("/api/songs/:id", get(api::search::get_song))
        .route("/api/data/:filename", get(api::corpus::serve_corpus))
        .route("/api/admin/files", get(api::corpus::list_files))
        .route("/api/admin/upload", post(api::corpus::upload_file))
        .route(
            "/api/admin/files/:filename/delete",
            post(api::corpus::delete_file),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CookieManagerLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    let bind_addr = state.config.get_bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Server running at http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
