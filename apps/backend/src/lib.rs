pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::{Database, Store};
use crate::services::grading_client::{DeepSeekClient, Grader};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub grader: Arc<dyn Grader>,
}

/// Build the router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Essay routes
        .route("/essay/submit", post(routes::essays::submit))
        .route("/essay/user/{user_id}", get(routes::essays::list_by_user))
        .route("/essay/user/{user_id}/search", get(routes::essays::search))
        .route(
            "/essay/user/{user_id}/results",
            get(routes::essays::results_by_user),
        )
        .route("/essay/check/{essay_id}", post(routes::essays::check))
        .route(
            "/essay/{id}",
            get(routes::essays::get)
                .put(routes::essays::update)
                .delete(routes::essays::delete),
        )
        // Account routes
        .route("/user/register", post(routes::accounts::register))
        .route("/user/login", post(routes::accounts::login))
        .route(
            "/user/{id}",
            get(routes::accounts::get).put(routes::accounts::update),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url).await?;

    tracing::info!("Running migrations...");
    db.run_migrations().await?;

    let grader = DeepSeekClient::new(config.ai.clone())?;

    let state = AppState {
        store: Arc::new(db),
        grader: Arc::new(grader),
    };

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
