use crate::app::App;
use crate::config::Config;
use crate::db::{init_db, Database, SqliteListingStore};
use crate::geocoding::MapboxGeocoder;
use crate::media::{CloudinaryConfig, CloudinaryStore, CLOUDINARY_BASE_URL};
use crate::responses::html_error_response;
use crate::router::handle;
use anyhow::Context;
use astra::Server;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod auth;
mod clock;
mod config;
mod cookies;
mod db;
mod domain;
mod errors;
mod flash;
mod forms;
mod geocoding;
mod media;
mod middleware;
mod responses;
mod router;
mod templates;
mod workflow;


fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let config = Config::from_env()?;

    // 1. Database handle + schema
    let db = Database::new(config.database_path.clone());
    init_db(&db, &config.schema_path).context("database initialization failed")?;

    // 2. Collaborators
    let geocoder = MapboxGeocoder::new(config.map_token.clone(), config.http_timeout)
        .context("failed to build geocoding client")?;
    let media = CloudinaryStore::new(
        CloudinaryConfig {
            cloud_name: config.cloud_name.clone(),
            api_key: config.cloud_api_key.clone(),
            api_secret: config.cloud_api_secret.clone(),
            folder: config.media_folder.clone(),
            base_url: CLOUDINARY_BASE_URL.to_string(),
        },
        config.http_timeout,
    )
    .context("failed to build media client")?;
    let store = SqliteListingStore::new(db.clone());

    let app = App::new(
        db,
        Arc::new(store),
        Arc::new(geocoder),
        Arc::new(media),
        config.map_token.clone(),
        config.max_upload_bytes,
    );

    // 3. Serve
    tracing::info!(addr = %config.bind_addr, workers = config.max_workers, "starting server");

    Server::bind(&config.bind_addr)
        .max_workers(config.max_workers)
        .serve(move |req, _info| match handle(req, &app) {
            Ok(resp) => resp,
            Err(err) => html_error_response(err),
        })
        .context("server ended with error")?;

    tracing::info!("server shut down cleanly");
    Ok(())
}
