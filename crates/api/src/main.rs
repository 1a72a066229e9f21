use anyhow::Context;

use ordering_infra::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ordering_observability::init();

    let config = Config::from_env().context("invalid configuration")?;
    let addr = config.listen_addr().context("invalid listen address")?;

    let services = ordering_api::app::services::build_services(&config)
        .await
        .context("failed to initialise order storage")?;
    let app = ordering_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
