use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;
use talent_match::config::{LoggingSettings, Settings};
use talent_match::core::Matcher;
use talent_match::routes::{self, AppState};
use talent_match::services::{AuditSink, EmbeddingCache, EmbeddingClient, TracingAuditSink};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Logging is configured from the settings, so errors here go to stderr
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging);

    info!("Starting Talent Match ranking service...");

    // Similarity backend is selected once and injected into the matcher
    let matcher = Matcher::new(settings.similarity.backend.provider())
        .with_parallel_threshold(settings.similarity.parallel_threshold);

    info!(
        "Matcher initialized with {} similarity (parallel from {} candidates)",
        matcher.similarity_backend(),
        settings.similarity.parallel_threshold
    );

    let cache = EmbeddingCache::new(settings.cache.capacity, settings.cache.ttl_secs);
    let embeddings = match EmbeddingClient::from_settings(&settings.embedding, cache) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to create embedding client: {}", e);
            return Err(std::io::Error::other(e));
        }
    };

    if settings.embedding.api_key.is_none() {
        info!("No embedding API key configured; talent match and RAG requests will be unauthenticated");
    }

    info!(
        "Embedding client initialized ({} via {}, cache: {} entries, TTL: {}s)",
        embeddings.model(),
        settings.embedding.base_url,
        settings.cache.capacity,
        settings.cache.ttl_secs
    );

    let audit: Arc<dyn AuditSink> = Arc::new(TracingAuditSink);

    // Build application state
    let app_state = AppState {
        matcher,
        defaults: settings.matching.to_config(),
        embeddings,
        audit,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);
    let json_limit = settings.server.json_limit_bytes;

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config(json_limit))
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
