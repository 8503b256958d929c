use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::config::ServerConfig;
use crate::http::connection::Connection;
use crate::router::dispatch::Dispatcher;
use crate::server::tls;

/// Accept loop: one spawned task per connection.
///
/// Connection and handshake errors are logged and confined to their task;
/// only a listener failure ends the loop.
pub async fn serve(config: &ServerConfig, dispatcher: Arc<Dispatcher>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.addr()).await?;
    info!("Listening on {}", config.addr());

    let tls_acceptor = match &config.tls {
        Some(tls_config) => Some(tls::acceptor(tls_config)?),
        None => None,
    };

    loop {
        let (socket, peer) = listener.accept().await?;
        let dispatcher = dispatcher.clone();

        match &tls_acceptor {
            Some(acceptor) => {
                let acceptor = acceptor.clone();
                tokio::spawn(async move {
                    match acceptor.accept(socket).await {
                        Ok(stream) => {
                            let mut conn = Connection::new(stream, dispatcher);
                            if let Err(e) = conn.run().await {
                                error!("Connection error from {}: {}", peer, e);
                            }
                        }
                        Err(e) => warn!("TLS handshake failed for {}: {}", peer, e),
                    }
                });
            }
            None => {
                tokio::spawn(async move {
                    let mut conn = Connection::new(socket, dispatcher);
                    if let Err(e) = conn.run().await {
                        error!("Connection error from {}: {}", peer, e);
                    }
                });
            }
        }
    }
}
