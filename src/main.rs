use tracing_subscriber::{EnvFilter, fmt};
use tracing::info;

use eventcat::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Init logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))?;
    fmt().with_env_filter(filter).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = Config::from_env().with_args(&args);

    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "<unset>".to_string());
    info!(
        target: "eventcat",
        "eventcat starting: RUST_LOG='{}', http_port={}, db={:?}, pool_size={}, seed={}, seed_rows={}",
        rust_log, config.http_port, config.db, config.pool_size, config.seed, config.seed_rows
    );

    eventcat::server::run(config).await
}
