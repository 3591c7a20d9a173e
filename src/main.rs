mod config;
mod models;
mod routes;
mod services;
mod view;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use config::Settings;
use routes::AppState;
use services::{CookieAuthenticator, PageLoader};
use std::sync::Arc;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Gatefold SSR demo service...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // Initialize the auth gate
    info!("Auth gate initialized (session cookie: {})", settings.auth.cookie_name);

    let auth = Arc::new(CookieAuthenticator::new(
        &settings.auth.secret,
        settings.auth.cookie_name,
        settings.auth.login_path,
        settings.auth.id_token_ttl_secs,
    ));

    // Initialize the server-side page loader
    let loader = Arc::new(PageLoader::new(
        settings.upstream.base_url.clone(),
        settings.upstream.timeout_secs,
    ));

    match &settings.upstream.base_url {
        Some(base) => info!("Page loader initialized (upstream base: {})", base),
        None => info!("Page loader initialized (resolving endpoints against request host)"),
    }

    // Build application state
    let app_state = AppState { auth, loader };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
