use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::export::Exporter;
use crate::store::Storage;

use super::api::export as export_handlers;
use super::api::tracks as track_handlers;
use super::api_doc::ApiDoc;
use super::config::{Config, ConfigError};
use super::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Track API endpoints
        .route("/api/tracks", get(track_handlers::list_tracks))
        .route("/api/tracks/{id}", get(track_handlers::get_track))
        .route("/api/tracks/{id}/stats", get(track_handlers::get_stats))
        .route(
            "/api/tracks/{id}/export/{format}",
            get(export_handlers::export_track),
        )
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config) -> Result<(), ServerError> {
    let bind_addr = config.web.bind.clone();
    let clock = config.export.clock()?;

    let state = AppState {
        storage: Arc::new(Storage::new(config.tracks.base_folder.clone())),
        exporter: Exporter::new(clock),
    };

    log::info!(
        "Serving tracks from {}",
        config.tracks.base_folder.display()
    );
    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}
