use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tally_observability::init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

    let app = tally_api::app::build_app();

    let listener = tokio::net::TcpListener::bind(bind_addr.as_str())
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
