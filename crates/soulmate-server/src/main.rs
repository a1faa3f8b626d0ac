#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod api;
mod config;
mod middleware;
mod router;

use anyhow::Context;
use api::state::AppState;
use config::{LlmConfig, ServerConfig};
use middleware::RateLimiter;
use soulmate_ai::{LlmClient, OpenAIClient};
use soulmate_core::{AppCore, paths};
use std::sync::Arc;

fn build_llm_client(config: &LlmConfig) -> Arc<dyn LlmClient> {
    let api_key = config.api_key().unwrap_or_else(|| {
        tracing::warn!(
            env = %config.api_key_env,
            "No completion API key set; chat requests will fail"
        );
        String::new()
    });

    Arc::new(
        OpenAIClient::new(api_key)
            .with_model(config.model.clone())
            .with_base_url(config.base_url.clone()),
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing logger
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,soulmate_server=debug".into()),
        )
        .with_target(false)
        .with_thread_ids(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting Soulmate server");

    let config = ServerConfig::load()?;

    let db_path = match &config.db_path {
        Some(path) => path.clone(),
        None => paths::ensure_database_path_string()
            .context("Failed to determine Soulmate database path")?,
    };
    let core = Arc::new(
        AppCore::new(&db_path, config.core.clone())
            .await
            .context("Failed to initialize app core")?,
    );

    let state = AppState {
        core,
        llm: build_llm_client(&config.llm),
        send_limiter: RateLimiter::new(config.rate_limit_per_minute),
    };

    if let Some(dir) = &config.static_dir {
        tracing::info!(dir = %dir.display(), "Serving static files");
    }
    let app = router::build_router(state, config.static_dir.as_deref());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Soulmate running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;
    Ok(())
}
