use std::sync::Arc;

use chat_server::api;
use chat_server::app_state::AppState;
use chat_server::config::Config;
use chat_server::llm::CompletionClient;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chat_server=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    if config.llm.api_key.is_empty() {
        tracing::warn!("HF_TOKEN is not set; requests are sent without credentials");
    }
    if !config.static_dir.join("pkg").exists() {
        tracing::warn!(
            path = %config.static_dir.display(),
            "chat-ui package not found; build it with wasm-pack before opening the page"
        );
    }
    info!(model = %config.llm.model, base_url = %config.llm.base_url, "chat-server starting");

    let client = CompletionClient::new(config.llm.clone())?;
    let state = AppState::new(Arc::new(client), config.static_dir.clone());
    let app = api::router(state).layer(TraceLayer::new_for_http());

    let addr = config.bind_addr();
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
