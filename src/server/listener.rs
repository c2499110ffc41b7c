use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::router::Router;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr)
        .await
        .with_context(|| format!("failed to bind to {}", cfg.listen_addr))?;
    info!("Listening on {}", cfg.listen_addr);

    let router = Arc::new(Router::from_config(cfg));
    match router.files().root() {
        Some(dir) => info!(directory = %dir.display(), "Serving files"),
        None => warn!("No --directory given, file routes will answer 404"),
    }

    serve(listener, router).await
}

/// Accepts connections forever, one task per connection.
///
/// A failed accept or a failed connection is logged and the loop goes on.
pub async fn serve(listener: TcpListener, router: Arc<Router>) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(error = %e, "Failed to accept connection");
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let router = Arc::clone(&router);
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, router);
            if let Err(e) = conn.run().await {
                error!("Connection error from {}: {:#}", peer, e);
            }
        });
    }
}
