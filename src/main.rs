mod application;
mod config;
mod domain;
mod infrastructure;
mod presentation;
#[cfg(test)]
mod test_support;

use tracing::{error, info};

use crate::config::AppConfig;
use crate::infrastructure::AppContainer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env().inspect_err(|e| error!("Invalid configuration: {}", e))?;
    info!(
        "Starting {} {} on {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.server.bind_address()
    );

    let container = AppContainer::new(config)?;
    container.create_http_server().run().await
}
