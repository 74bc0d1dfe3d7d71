pub mod api;
pub mod calculation;
pub mod config;
pub mod db;
pub mod errors;
pub mod metrics;
pub mod models;
pub mod prices;
pub mod web3;

use std::sync::Arc;

use crate::api::rate_limit::RateLimiter;
use crate::config::AppConfig;
use crate::prices::PriceOracle;
use crate::web3::JsonRpcClient;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: AppConfig,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
    pub price_oracle: Arc<PriceOracle>,
    pub rpc: Arc<JsonRpcClient>,
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Wire collaborators from config around an existing pool.
    pub fn build(db: sqlx::PgPool, config: AppConfig) -> anyhow::Result<Self> {
        let http = prices::oracle::http_client(config.price_timeout)?;
        let rpc = Arc::new(JsonRpcClient::new(http, config.web3_provider_url.clone()));
        let price_oracle = Arc::new(PriceOracle::from_config(&config, rpc.clone())?);
        let rate_limiter = Arc::new(RateLimiter::new(
            config.rate_limit_max_requests,
            config.rate_limit_window,
        ));

        Ok(Self {
            db,
            config,
            metrics_handle: metrics::init_metrics(),
            price_oracle,
            rpc,
            rate_limiter,
        })
    }
}
