use std::sync::Arc;

use labsight::api::start_server;
use labsight::config::{self, ServiceConfig};
use labsight::core_state::CoreState;

#[tokio::main]
async fn main() {
    labsight::init_tracing();
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let service_config = ServiceConfig::from_env();
    tracing::info!(
        model_dir = %service_config.model_dir.display(),
        bind_addr = %service_config.bind_addr,
        max_upload_bytes = service_config.max_upload_bytes,
        "Configuration resolved"
    );

    let core = Arc::new(CoreState::from_config(&service_config));
    let core_loaded = core.model_loaded();

    let mut server = match start_server(core, service_config.bind_addr).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to start server: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        addr = %server.addr,
        model_loaded = core_loaded,
        "Listening; press Ctrl-C to stop"
    );

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {e}");
    }

    server.shutdown().await;
}
