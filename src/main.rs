mod models;
mod handlers;
mod services;
mod config;
mod errors;

use axum::{
    routing::{delete, get, post},
    Router,
    extract::DefaultBodyLimit,
};
use tower_http::limit::RequestBodyLimitLayer;
use crate::{
    services::UserStore,
    config::Config,
};
use tracing_subscriber;

// Router assembly is separate from main so tests can drive the full app.
fn app(store: UserStore, max_body_size: usize) -> Router {
    Router::new()
        // User routes
        .route("/api/users", get(handlers::list_users).post(handlers::create_user))
        .route("/api/users/:email", delete(handlers::delete_user))

        // Auth routes
        .route("/api/login", post(handlers::handle_login))

        // Request body limits from config
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_size))

        // Add state
        .with_state(store)
}

#[tokio::main]
async fn main() {
    // Initialize basic tracing subscriber
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::load().expect("Failed to load configuration");

    // Make sure the storage directory exists before the first write
    if let Some(parent) = std::path::Path::new(&config.storage.users_file).parent() {
        std::fs::create_dir_all(parent).expect("Failed to create storage directory");
    }

    // Initialize the file-backed user store
    let store = UserStore::new(
        &config.storage.users_file,
        config.storage.serialize_access,
    );

    let app = app(store, config.server.max_body_size);

    let listener = tokio::net::TcpListener::bind(
        format!("{}:{}", config.server.host, config.server.port)
    )
    .await
    .expect("Failed to bind server");

    tracing::info!(
        "Server running at http://{}:{}",
        config.server.host,
        config.server.port
    );

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Failed to start server");
}
