//! Registry entry-point: loads settings, connects both stores, and serves
//! the HTTP API until a shutdown signal arrives.

mod server;

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use registry_backend::config::AppSettings;
use registry_backend::domain::RegistrationService;
use registry_backend::inbound::http::health::HealthState;
use registry_backend::outbound::document::{DocumentStore, DocumentStoreConfig, MongoSecondaryStore};
use registry_backend::outbound::persistence::{DbPool, DieselPrimaryStore, PoolConfig};
use server::{ServerConfig, create_server, shutdown_on_signal};

fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load configuration: {err}"))?;
    if settings.secret_key().is_none() {
        warn!("REGISTRY_SECRET_KEY is not set");
    }

    let pool = DbPool::new(
        PoolConfig::new(settings.database_url()?).with_max_size(settings.max_pool_size()),
    )
    .await
    .wrap_err("failed to build primary store pool")?;
    pool.get()
        .await
        .map(drop)
        .wrap_err("primary store is unreachable")?;
    info!("connected to primary store");

    let document_store = DocumentStore::connect(
        &DocumentStoreConfig::new(settings.mongodb_uri()?)
            .with_max_pool_size(settings.max_pool_size()),
    )
    .await
    .wrap_err("failed to connect to secondary store")?;

    let registry = RegistrationService::new(
        Arc::new(DieselPrimaryStore::new(pool)),
        Arc::new(MongoSecondaryStore::new(&document_store)),
    )
    .with_request_timeout(settings.request_timeout());

    let bind_addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, settings.port()?));
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        ServerConfig::new(bind_addr, Arc::new(registry)),
    )
    .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;

    actix_web::rt::spawn(shutdown_on_signal(server.handle(), health_state));
    server.await.wrap_err("server terminated abnormally")?;

    document_store.shutdown().await;
    info!("registry stopped");
    Ok(())
}
