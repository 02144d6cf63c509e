use std::sync::Arc;

use movie_recs_client::{
    services::providers::{HttpBackend, IpApiLocator},
    view::MemoryView,
    Config, EventRouter, Page, UiEvent,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    tracing::info!(backend = %config.backend_url, "Starting recommendation client");

    let http_client = config.http_client()?;
    let backend = Arc::new(HttpBackend::new(http_client.clone(), &config.backend_url));
    let locator = Arc::new(IpApiLocator::new(http_client, &config.geolocation_url));
    let view = Arc::new(MemoryView::new());

    let page = Page::new(backend, locator, view.clone(), config.auto_recommendations);
    let router = EventRouter::new(page);

    let loaded = router.page().load().await;
    tracing::info!(outcome = ?loaded, "Page loaded");

    // Optional search title from the command line
    if let Some(title) = std::env::args().nth(1) {
        let outcome = router.route(UiEvent::FormSubmit { title }).await;
        tracing::info!(outcome = ?outcome, "Search finished");
    }

    print!("{}", view.render_page());
    Ok(())
}
