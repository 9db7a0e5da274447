use backend::shared::config;
use backend::{routes, system, AppState, SalesStore};
use std::net::SocketAddr;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize("backend.log")?;

    let config = config::load_config()?;
    let fixture_path = config::resolve_fixture_path(&config);
    let store = SalesStore::from_fixture(
        &fixture_path,
        config.sales.simulate_live,
        config.sales.failure_rate,
    )?;

    if store.is_live() {
        tracing::info!("Live simulation enabled: GET /api/sales drifts the latest month");
    }

    let app = routes::configure_routes(AppState::new(store));

    let addr: SocketAddr = ([0, 0, 0, 0], config.server.port).into();

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    config.server.port
                );
            } else {
                tracing::error!("Failed to bind to port {}. Error: {}", config.server.port, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
