//! HTTP server lifecycle.

use std::future::Future;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use crate::router::build_router;
use crate::state::AppState;

/// Bind a listener on `addr` (`host:port`)
pub async fn bind(addr: &str) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind HTTP server to {}", addr))
}

/// Serve the API on `listener` until `shutdown` resolves, then drain
/// in-flight requests and return.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr().context("Listener has no local address")?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server error")?;

    info!("HTTP server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use datenight_core::{ContentCatalog, MemoryStore};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_serve_until_shutdown() {
        let listener = bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = AppState::in_memory(
            Arc::new(MemoryStore::new()),
            ContentCatalog::offline(),
            vec!["user1".to_string(), "user2".to_string()],
        );

        let (tx, rx) = oneshot::channel::<()>();
        let server = tokio::spawn(serve(listener, state, async {
            let _ = rx.await;
        }));

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.contains("\"status\":\"ok\""));

        tx.send(()).unwrap();
        server.await.unwrap().unwrap();
    }
}
