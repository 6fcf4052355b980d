use stockroom_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stockroom_observability::init();

    let config = AppConfig::load()?;
    let services = stockroom_api::app::services::build_services(&config).await?;
    let app = stockroom_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
