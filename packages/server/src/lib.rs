#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web backend for the Gorod Reshenii dashboard.
//!
//! Serves the `/api` endpoints (analytics, statement submission and
//! review, administrator login) and the static public directory, which
//! holds `districts.geojson`. Statements live in a [`StatementStore`];
//! the binary uses the in-memory [`MemoryStore`].

mod analytics;
pub mod config;
mod handlers;
pub mod interactive;
pub mod session;
pub mod store;
pub mod validate;

use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpResponse, HttpServer, error, middleware, web};
use gorod_api_models::ApiResponse;

pub use config::ServerConfig;
pub use session::{SESSION_COOKIE, Sessions};
pub use store::{MemoryStore, StatementStore};

/// Errors raised while configuring or running the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Reading the configuration file or binding the socket failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration file is not valid TOML for [`ServerConfig`].
    #[error("Invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),
    /// The statement store failed.
    #[error("Storage error: {0}")]
    Store(String),
}

/// Shared application state.
pub struct AppState {
    /// Statement storage.
    pub store: Arc<dyn StatementStore>,
    /// Open administrator sessions.
    pub sessions: Sessions,
    /// Settings the server started with.
    pub config: ServerConfig,
}

impl AppState {
    /// State with an empty [`MemoryStore`].
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    /// State backed by `store`.
    #[must_use]
    pub fn with_store(config: ServerConfig, store: Arc<dyn StatementStore>) -> Self {
        Self {
            store,
            sessions: Sessions::default(),
            config,
        }
    }
}

/// Malformed JSON bodies answer 400 with the error envelope.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        log::warn!("Malformed request body: {message}");
        error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(ApiResponse::error(message)),
        )
        .into()
    })
}

/// Registers the `/api` scope.
pub fn api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route(
                "/analitic/district",
                web::get().to(handlers::district_analytics),
            )
            .route("/analitic/period", web::get().to(handlers::period_analytics))
            .route(
                "/analitic/categories/{district_id}",
                web::get().to(handlers::category_analytics),
            )
            .route("/statement", web::get().to(handlers::list_statements))
            .route("/statement", web::post().to(handlers::create_statements))
            .route("/statement/{id}", web::patch().to(handlers::update_statement))
            .route("/statement/{id}", web::delete().to(handlers::delete_statement))
            .route("/auth/login", web::post().to(handlers::login)),
    );
}

/// Starts the HTTP server with `config` and an empty in-memory store.
///
/// This is a regular async function; the caller provides the runtime
/// (e.g. via `#[actix_web::main]`) and initialises logging.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    if config.admin_password.is_empty() {
        log::warn!("GOROD_ADMIN_PASSWORD is not set, administrator login is disabled");
    }
    if !config.public_dir.is_dir() {
        log::warn!(
            "Public directory {} does not exist, boundaries will not be served",
            config.public_dir.display()
        );
    }

    let bind_addr = config.bind_addr.clone();
    let port = config.port;
    let public_dir = config.public_dir.clone();
    let state = web::Data::new(AppState::new(config));

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(api)
            .service(Files::new("/", &public_dir).index_file("index.html"))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
