use std::sync::Arc;

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::{AppConfig, StorageBackend};
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes;
use crate::state::ServerState;
use service::clients::{ClientGateway, ClientRegistryService, InMemoryClientGateway, SeaOrmClientGateway};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the store selected by `[registry] storage` once; every request shares it.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<ServerState> {
    let gateway: Arc<dyn ClientGateway> = match cfg.registry.storage {
        StorageBackend::Database => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            if cfg.database.run_migrations {
                migration::Migrator::up(&db, None).await?;
                info!("database migrations applied");
            }
            Arc::new(SeaOrmClientGateway::new(db))
        }
        StorageBackend::Memory => {
            warn!("registry.storage = memory; clients are lost on restart");
            Arc::new(InMemoryClientGateway::new())
        }
    };
    let clients = ClientRegistryService::new(gateway)
        .with_strict_missing_targets(cfg.registry.strict_missing_targets);
    Ok(ServerState::new(clients))
}

pub fn build_app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

/// Public entry: load config, build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();
    let cfg = AppConfig::load_and_validate()?;
    run_with_config(cfg).await
}

pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg).await?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(cfg.bind_addr()).await?;
    let addr = listener.local_addr()?;
    info!(
        %addr,
        storage = ?cfg.registry.storage,
        strict_missing_targets = cfg.registry.strict_missing_targets,
        "starting client registry"
    );
    axum::serve(listener, app).await?;
    Ok(())
}
