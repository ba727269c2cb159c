use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tracing::{error, info};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::server::AppState;

/// Binds the configured address and serves until the task is dropped.
pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.listen_addr))?;
    info!("Listening on {}", listener.local_addr()?);
    info!(directory = %cfg.directory.display(), "Serving files");

    serve(listener, cfg).await
}

/// Accepts connections on an already bound listener, one task each.
///
/// Accept errors are logged and skipped. With `max_connections` set, the loop
/// waits for a free slot before accepting again.
pub async fn serve(listener: TcpListener, cfg: &Config) -> anyhow::Result<()> {
    let app = Arc::new(AppState::new(cfg));
    let limit = cfg.max_connections.map(|n| Arc::new(Semaphore::new(n)));
    let read_timeout = cfg.read_timeout();

    loop {
        let permit = match &limit {
            Some(semaphore) => Some(Arc::clone(semaphore).acquire_owned().await?),
            None => None,
        };

        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!("Failed to accept connection: {}", e);
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let app = Arc::clone(&app);
        tokio::spawn(async move {
            let conn = Connection::new(socket, peer, app).with_read_timeout(read_timeout);
            if let Err(e) = conn.run().await {
                error!("Connection error from {}: {}", peer, e);
            }
            drop(permit);
        });
    }
}
