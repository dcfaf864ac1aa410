use tracing_subscriber::EnvFilter;
use watchlist::{
    stub::{create_router, StubState},
    Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("watchlist=info,tower_http=debug")),
        )
        .init();

    let config = Config::from_env()?;

    let app = create_router(StubState::new());

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Stub media API listening");
    axum::serve(listener, app).await?;

    Ok(())
}
