use std::sync::Arc;

use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;
use watchlist::{
    gateway::{HttpGateway, MediaGateway},
    shell::{Page, Shell},
    Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't interleave with the table
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("watchlist=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    tracing::info!(api_url = %config.api_url, page_size = config.page_size, "Starting watchlist");

    let gateway: Arc<dyn MediaGateway> = Arc::new(HttpGateway::new(config.api_url.as_str()));
    let page = Page::new(gateway, config.page_size);
    let mut shell = Shell::new(page, config.viewport_rows);

    shell
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await
}
