use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use hyper::server::conn::http1;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use opening_hours::{
    config::Config,
    locations::Locations,
    server::Server,
    timing::BusinessHours,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("opening_hours=info")),
        )
        .with_target(false)
        .init();

    let config = Config::from_env()?;
    info!("Starting opening-hours v{}", env!("CARGO_PKG_VERSION"));

    let locations = Arc::new(Locations::load(&config.locations_file)?);
    let server = Server::setup(locations, BusinessHours::new())
        .context("Could not build the location name sanitizer")?;

    let addr = SocketAddr::new(config.bind_addr, config.http_port);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Could not bind {}", addr))?;
    info!("Listening on http://{}", addr);

    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(err) => {
                error!("Could not accept connection: {}", err);
                continue;
            }
        };
        let io = TokioIo::new(stream);
        let server_clone = server.clone();
        tokio::spawn(async move {
            if let Err(err) = http1::Builder::new()
                .serve_connection(io, server_clone)
                .await
            {
                error!("Connection from {} failed: {}", peer, err);
            }
        });
    }
}
