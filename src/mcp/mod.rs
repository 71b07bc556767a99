pub mod format;
pub mod server;

use std::sync::Arc;

use anyhow::Context;
use rmcp::ServiceExt;
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::streamable_http_server::{StreamableHttpServerConfig, StreamableHttpService};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use shell_mcp::config::types::ServerConfig;
use shell_mcp::core::dispatch::Dispatcher;

use crate::cli::Transport;
use server::ShellMcpServer;

/// Path the streamable HTTP endpoint is mounted on.
pub const MCP_PATH: &str = "/mcp";

/// Build the dispatcher and run the chosen transport. Blocks until it ends.
pub fn serve(transport: Transport, config: &ServerConfig) -> anyhow::Result<()> {
    let dispatcher = Arc::new(Dispatcher::from_config(config)?);
    info!(dir = %config.ui_resources_dir.display(), "ui resources directory");

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        match transport {
            Transport::Stdio => serve_stdio(dispatcher).await,
            Transport::Http { host, port } => serve_http(dispatcher, &host, port).await,
        }
    })
}

/// Serve over stdin/stdout until the peer closes the stream.
pub async fn serve_stdio(dispatcher: Arc<Dispatcher>) -> anyhow::Result<()> {
    info!("serving MCP over stdio");
    let service = ShellMcpServer::new(dispatcher)
        .serve(rmcp::transport::stdio())
        .await?;
    service.waiting().await?;
    Ok(())
}

/// Serve streamable HTTP on `host:port` until Ctrl-C.
pub async fn serve_http(dispatcher: Arc<Dispatcher>, host: &str, port: u16) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("failed to bind {host}:{port}"))?;
    info!(addr = %listener.local_addr()?, path = MCP_PATH, "serving MCP over HTTP");

    axum::serve(listener, router(dispatcher))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Stateless MCP endpoint wrapped in a permissive CORS policy.
pub fn router(dispatcher: Arc<Dispatcher>) -> axum::Router {
    let mut config = StreamableHttpServerConfig::default();
    config.stateful_mode = false;

    let service = StreamableHttpService::new(
        move || Ok(ShellMcpServer::new(Arc::clone(&dispatcher))),
        Arc::new(LocalSessionManager::default()),
        config,
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    axum::Router::new()
        .nest_service(MCP_PATH, service)
        .layer(cors)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl-C; running until killed");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn spawn_server() -> String {
        let dispatcher = Arc::new(Dispatcher::from_config(&ServerConfig::default()).unwrap());
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(dispatcher)).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn preflight_allows_any_origin() {
        let base = spawn_server().await;
        let resp = reqwest::Client::new()
            .request(reqwest::Method::OPTIONS, format!("{base}{MCP_PATH}"))
            .header("Origin", "https://host.example")
            .header("Access-Control-Request-Method", "POST")
            .header("Access-Control-Request-Headers", "content-type, mcp-session-id")
            .send()
            .await
            .unwrap();

        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers()["access-control-allow-origin"].to_str().unwrap(),
            "*"
        );
        assert_eq!(
            resp.headers()["access-control-allow-methods"].to_str().unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn other_paths_are_not_served() {
        let base = spawn_server().await;
        let resp = reqwest::Client::new()
            .get(format!("{base}/elsewhere"))
            .header("Origin", "https://host.example")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
        assert_eq!(
            resp.headers()["access-control-allow-origin"].to_str().unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn bind_conflict_is_reported() {
        let held = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = held.local_addr().unwrap().port();
        let dispatcher = Arc::new(Dispatcher::from_config(&ServerConfig::default()).unwrap());

        let err = serve_http(dispatcher, "127.0.0.1", port).await.unwrap_err();
        assert!(err.to_string().contains("failed to bind"));
    }
}
