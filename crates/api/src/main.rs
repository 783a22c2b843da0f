use anyhow::Context;

use lifegoals_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    lifegoals_observability::init();

    let config = ApiConfig::from_env()?;
    let bind_addr = config.bind_addr;
    let app = lifegoals_api::app::build_app(config);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
