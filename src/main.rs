/// Trend Service - HTTP Server
///
/// Periodically recomputes the trending hashtag ranking from recent posts
/// and serves the current top-K over a read-only endpoint.
use actix_web::{web, App, HttpResponse, HttpServer};
use sqlx::postgres::PgPoolOptions;
use std::io;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use trend_service::db::PostRepo;
use trend_service::handlers::{get_trends, TrendsHandlerState};
use trend_service::jobs::TrendRefreshJob;
use trend_service::metrics;
use trend_service::services::trending::{TrendStore, TrendingService};
use trend_service::Config;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Starting trend-service v{} ({})",
        env!("CARGO_PKG_VERSION"),
        config.app.env
    );

    let db_pool = match PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("ERROR: Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    let store = Arc::new(TrendStore::new());
    let post_repo = Arc::new(PostRepo::new(db_pool));
    let trending = Arc::new(TrendingService::new(
        post_repo,
        Arc::clone(&store),
        config.trending.clone(),
    ));

    TrendRefreshJob::new(Arc::clone(&trending), &config.trending).spawn();
    info!("Trend refresh background job started");

    let trends_state = web::Data::new(TrendsHandlerState { store });
    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    info!("Trend service listening on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(trends_state.clone())
            .route("/health", web::get().to(|| async { "OK" }))
            .route(
                "/api/v1/health/live",
                web::get().to(|| async { HttpResponse::Ok().finish() }),
            )
            .route(
                "/api/v1/health/ready",
                web::get().to(|| async { HttpResponse::Ok().finish() }),
            )
            .route("/metrics", web::get().to(metrics::serve_metrics))
            .service(get_trends)
    })
    .bind(bind_address)?
    .run()
    .await
}
