use std::env;
use std::time::Duration;

const DEFAULT_WEB3_PROVIDER_URL: &str = "http://localhost:8545";
const DEFAULT_BINANCE_API_URL: &str = "https://api.binance.com";
const DEFAULT_COINGECKO_API_URL: &str = "https://api.coingecko.com";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub run_migrations: bool,

    // Price sources
    pub web3_provider_url: String,
    pub binance_api_url: String,
    pub coingecko_api_url: String,
    pub price_timeout: Duration,

    // Rate limiting (fixed window per client IP)
    pub rate_limit_max_requests: u32,
    pub rate_limit_window: Duration,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: database_url_from_env(),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3001".into())
                .parse()?,
            environment: env::var("APP_ENV").unwrap_or_else(|_| "development".into()),
            run_migrations: env::var("RUN_MIGRATIONS")
                .unwrap_or_else(|_| "true".into())
                .parse()
                .unwrap_or(true),

            web3_provider_url: env::var("WEB3_PROVIDER_URL")
                .unwrap_or_else(|_| DEFAULT_WEB3_PROVIDER_URL.into()),
            binance_api_url: env::var("BINANCE_API_URL")
                .unwrap_or_else(|_| DEFAULT_BINANCE_API_URL.into()),
            coingecko_api_url: env::var("COINGECKO_API_URL")
                .unwrap_or_else(|_| DEFAULT_COINGECKO_API_URL.into()),
            price_timeout: Duration::from_secs(
                env::var("PRICE_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "5".into())
                    .parse()
                    .unwrap_or(5),
            ),

            rate_limit_max_requests: env::var("RATE_LIMIT_MAX_REQUESTS")
                .unwrap_or_else(|_| "100".into())
                .parse()
                .unwrap_or(100),
            rate_limit_window: Duration::from_secs(
                env::var("RATE_LIMIT_WINDOW_SECS")
                    .unwrap_or_else(|_| "900".into())
                    .parse()
                    .unwrap_or(900),
            ),
        })
    }

    /// Defaults suitable for tests and local runs; no environment is read.
    pub fn local(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            host: "127.0.0.1".into(),
            port: 0,
            environment: "test".into(),
            run_migrations: false,
            web3_provider_url: DEFAULT_WEB3_PROVIDER_URL.into(),
            binance_api_url: DEFAULT_BINANCE_API_URL.into(),
            coingecko_api_url: DEFAULT_COINGECKO_API_URL.into(),
            price_timeout: Duration::from_secs(5),
            rate_limit_max_requests: 100,
            rate_limit_window: Duration::from_secs(900),
        }
    }
}

/// `DATABASE_URL` wins; otherwise assemble one from the discrete `DB_*` variables.
fn database_url_from_env() -> String {
    if let Ok(url) = env::var("DATABASE_URL") {
        return url;
    }
    let user = env::var("DB_USER").unwrap_or_else(|_| "postgres".into());
    let password = env::var("DB_PASSWORD").unwrap_or_default();
    let host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".into());
    let port = env::var("DB_PORT").unwrap_or_else(|_| "5432".into());
    let name = env::var("DB_NAME").unwrap_or_else(|_| "trading_calculator".into());
    compose_database_url(&user, &password, &host, &port, &name)
}

fn compose_database_url(user: &str, password: &str, host: &str, port: &str, name: &str) -> String {
    if password.is_empty() {
        format!("postgres://{user}@{host}:{port}/{name}")
    } else {
        format!("postgres://{user}:{password}@{host}:{port}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_database_url() {
        assert_eq!(
            compose_database_url("postgres", "", "localhost", "5432", "trading_calculator"),
            "postgres://postgres@localhost:5432/trading_calculator"
        );
        assert_eq!(
            compose_database_url("app", "s3cret", "db", "6543", "calc"),
            "postgres://app:s3cret@db:6543/calc"
        );
    }
}
