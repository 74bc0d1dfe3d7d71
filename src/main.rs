use std::net::SocketAddr;

use trade_calculator::api::router::create_router;
use trade_calculator::config::AppConfig;
use trade_calculator::prices::oracle::install_crypto_provider;
use trade_calculator::{db, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    install_crypto_provider();

    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    tracing::info!("Connecting to database...");
    let pool = db::init_pool(&config.database_url).await.map_err(|e| {
        tracing::error!(error = %e, "Cannot start server without database connection");
        e
    })?;
    tracing::info!("Database connected");

    if config.run_migrations {
        db::run_migrations(&pool).await?;
        tracing::info!("Migrations applied");
    }

    let environment = config.environment.clone();
    let state = AppState::build(pool, config)?;
    tracing::info!(
        sources = ?state.price_oracle.source_names(),
        rate_limit = state.config.rate_limit_max_requests,
        window_secs = state.config.rate_limit_window.as_secs(),
        "Price oracle and rate limiter ready"
    );

    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%environment, "Server listening on {addr}");
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// `RUST_LOG` filters (default `info`); `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(|| fmt::layer()))
        .init();
}
