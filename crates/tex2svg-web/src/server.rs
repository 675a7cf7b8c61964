use anyhow::Result;
use std::net::SocketAddr;
use tex2svg_core::ArtifactStore;
use tokio::net::{TcpListener, ToSocketAddrs};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::context::AppState;
use crate::handlers;

/// A running tex2svg server
pub struct WebServer {
    addr: SocketAddr,
    artifacts: ArtifactStore,
    shutdown_tx: Option<oneshot::Sender<()>>,
    serve_task: JoinHandle<()>,
    sweep_task: JoinHandle<()>,
}

impl WebServer {
    /// Bind `addr` and start serving in the background, returning a handle.
    ///
    /// Pass port 0 to bind a random port.
    pub async fn start(state: AppState, addr: impl ToSocketAddrs) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let artifacts = state.artifacts.clone();
        let sweep_task = spawn_sweeper(&state);
        let app = handlers::router(state);

        let serve_task = tokio::spawn(async move {
            let served = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
            if let Err(e) = served {
                error!("server error: {}", e);
            }
        });

        info!("listening on http://{}", addr);

        Ok(Self {
            addr,
            artifacts,
            shutdown_tx: Some(shutdown_tx),
            serve_task,
            sweep_task,
        })
    }

    /// Absolute URL for `path` on this server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Stop accepting requests, wait for in-flight ones, and delete every
    /// pending artifact. Returns how many artifacts were removed.
    pub async fn shutdown(mut self) -> usize {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Err(e) = (&mut self.serve_task).await {
            error!("server task failed: {}", e);
        }
        self.sweep_task.abort();

        let purged = self.artifacts.purge_all();
        info!("server stopped; removed {} pending artifact(s)", purged);
        purged
    }
}

/// Periodically release artifacts whose session has gone quiet
fn spawn_sweeper(state: &AppState) -> JoinHandle<()> {
    let artifacts = state.artifacts.clone();
    let ttl = state.session_ttl;
    let period = state.sweep_interval;

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // The first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = artifacts.sweep_expired(ttl);
            if removed > 0 {
                info!("expired {} artifact(s)", removed);
            } else {
                debug!("expiry sweep found nothing");
            }
        }
    })
}
