use crate::config::WikiConfig;
use crate::parser::{MarkdownConverter, PulldownMarkdown};
use crate::render::{AskamaRenderer, Renderer};
use crate::services::{GistPublisher, GithubGistPublisher};
use crate::storage::StorageClient;
use crate::storage::sqlite::SqliteStorageClient;
use anyhow::Context;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub mod config;
mod domain;
mod error;
mod features;
mod parser;
mod render;
mod services;
mod storage;

#[cfg(test)]
mod tests;

// collaborators are built once at startup and shared by every request
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn StorageClient>,
    pub renderer: Arc<dyn Renderer>,
    pub markdown: Arc<dyn MarkdownConverter>,
    pub gists: Arc<dyn GistPublisher>,
}

pub fn app(state: AppState) -> Router {
    features::wiki::wiki_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // determine environment variables
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,wiki_server=debug")),
        )
        .init();

    // load centralized config
    let config = WikiConfig::from_env();

    let storage = Arc::new(
        SqliteStorageClient::connect(&config.storage_endpoint, config.max_connections).await?,
    );
    let gists = GithubGistPublisher::new(&config.backup_user_agent)?;

    let state = AppState {
        storage: storage.clone(),
        renderer: Arc::new(AskamaRenderer),
        markdown: Arc::new(PulldownMarkdown),
        gists: Arc::new(gists),
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Could not start a HTTP server on {}", addr))?;
    info!(port = config.http_port, "HTTP server running");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    storage.close().await;

    Ok(())
}

async fn shutdown_signal() {
    wait_for_shutdown(tokio::signal::ctrl_c()).await
}

// resolves once `signal` fires; if the handler couldn't be installed the server keeps running
// instead of shutting down straight away
async fn wait_for_shutdown<F>(signal: F)
where
    F: std::future::Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        error!(error = %e, "could not listen for Ctrl-C, graceful shutdown disabled");
        std::future::pending::<()>().await;
    }
    info!("HTTP server shutting down");
}
