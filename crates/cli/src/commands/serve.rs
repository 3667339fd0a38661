use std::sync::Arc;

use anyhow::Result;
use curricula_http::{AppState, create_router};
use curricula_llm::LlmGateway;
use curricula_service::CurriculumService;
use curricula_storage::StorageBackend;

use super::database_url;

pub(crate) async fn run(port: u16, host: String) -> Result<()> {
    let storage = Arc::new(StorageBackend::new_postgres(&database_url()?).await?);
    tracing::info!(backend = storage.kind(), "storage ready");

    let llm = Arc::new(LlmGateway::from_env());
    let missing = llm.settings().missing();
    if !missing.is_empty() {
        tracing::warn!(?missing, "LLM settings incomplete; model endpoints will fail until set");
    }

    let state = Arc::new(AppState {
        curriculum_service: Arc::new(CurriculumService::new(storage, llm)),
    });

    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;
    tracing::info!("HTTP server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
