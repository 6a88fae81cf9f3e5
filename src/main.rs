use anyhow::Result;
use std::net::SocketAddr;
use std::path::Path;
use tracing::info;

use bangla_translator::config::Config;
use bangla_translator::state::AppState;
use bangla_translator::{logging, routes};

const DEFAULT_CONFIG_PATHS: [&str; 2] = ["conf.yaml", "conf.json"];

/// `CONFIG_PATH` must exist when set; otherwise the first default path that
/// exists is used, and built-in defaults when none does.
fn load_config() -> Result<(Config, Option<String>)> {
    if let Ok(path) = std::env::var("CONFIG_PATH") {
        return Ok((Config::load(&path)?, Some(path)));
    }

    for path in DEFAULT_CONFIG_PATHS {
        if Path::new(path).exists() {
            return Ok((Config::load(path)?, Some(path.to_string())));
        }
    }

    Ok((Config::default(), None))
}

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv_path = dotenvy::dotenv().ok();
    let (config, loaded_path) = load_config()?;

    logging::init(&config.system_config)?;
    info!("Starting the application");

    if let Some(path) = dotenv_path {
        info!("Loaded environment from {}", path.display());
    }
    match loaded_path {
        Some(path) => info!("Loaded configuration from: {}", path),
        None => info!("No configuration file found, using defaults"),
    }

    let app_state = AppState::new(&config)?;
    info!(
        "API key set; provider={} model={}",
        config.llm_config.provider, config.llm_config.model
    );

    let app = routes::app(app_state);

    let host: std::net::IpAddr = config
        .system_config
        .host
        .parse()
        .map_err(|e| anyhow::anyhow!("host must be a valid IP address: {}", e))?;
    let addr = SocketAddr::from((host, config.system_config.port));
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
