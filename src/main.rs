//! SkillSwap API server entry point.

use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, middleware, routing::get, Router};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use skillswap::adapters::auth::JwtSessionValidator;
use skillswap::adapters::http::middleware::{auth_middleware, AuthState};
use skillswap::adapters::http::rating::{rating_routes, RatingHandlers};
use skillswap::adapters::http::swap::{swap_routes, SwapHandlers};
use skillswap::adapters::postgres::{
    PostgresSwapRatingRepository, PostgresSwapRequestRepository, PostgresUserDirectory,
};
use skillswap::application::handlers::rating::{
    GetRatingHandler, ListRatingsHandler, SubmitRatingHandler,
};
use skillswap::application::handlers::swap::{
    CreateSwapHandler, DeleteSwapHandler, GetSwapHandler, ListSwapsHandler, MyRequestsHandler,
    TransitionSwapHandler, UpdateSwapHandler,
};
use skillswap::config::AppConfig;
use skillswap::ports::{SessionValidator, SwapRatingRepository, SwapRequestRepository, UserDirectory};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let swaps: Arc<dyn SwapRequestRepository> =
        Arc::new(PostgresSwapRequestRepository::new(pool.clone()));
    let ratings: Arc<dyn SwapRatingRepository> =
        Arc::new(PostgresSwapRatingRepository::new(pool.clone()));
    let users: Arc<dyn UserDirectory> = Arc::new(PostgresUserDirectory::new(pool.clone()));
    let validator: AuthState = Arc::new(JwtSessionValidator::new(&config.auth.jwt_secret));

    let swap_handlers = SwapHandlers::new(
        Arc::new(CreateSwapHandler::new(swaps.clone(), users.clone())),
        Arc::new(TransitionSwapHandler::new(swaps.clone())),
        Arc::new(GetSwapHandler::new(swaps.clone())),
        Arc::new(ListSwapsHandler::new(swaps.clone())),
        Arc::new(MyRequestsHandler::new(swaps.clone())),
        Arc::new(UpdateSwapHandler::new(swaps.clone())),
        Arc::new(DeleteSwapHandler::new(swaps.clone())),
    );
    let rating_handlers = RatingHandlers::new(
        Arc::new(SubmitRatingHandler::new(
            ratings.clone(),
            swaps.clone(),
            users.clone(),
        )),
        Arc::new(GetRatingHandler::new(ratings.clone())),
        Arc::new(ListRatingsHandler::new(ratings.clone())),
    );

    let api = swap_routes(swap_handlers)
        .merge(rating_routes(rating_handlers))
        .layer(middleware::from_fn_with_state(validator, auth_middleware));

    let app = Router::new()
        .route("/health", get(health))
        .nest("/api/swaps", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )));

    let addr = config.server.socket_addr();
    info!(%addr, "SkillSwap API listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> StatusCode {
    StatusCode::OK
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins = config.server.cors_origins_list();
    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins
            .iter()
            .filter_map(|o| o.parse::<http::HeaderValue>().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
