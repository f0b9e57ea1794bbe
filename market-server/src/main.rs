use market_server::{Config, init_logger, server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_logger(&config.log_level, config.log_json, config.log_dir.as_deref());

    tracing::info!(
        environment = %config.environment,
        port = config.http_port,
        "Smart Market server starting..."
    );

    if let Err(e) = server::run(config).await {
        tracing::error!("Server error: {}", e);
        return Err(e);
    }
    Ok(())
}
