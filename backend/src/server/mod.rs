//! Server construction, middleware wiring, and shutdown handling.

mod config;

pub use config::ServerConfig;

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{error, info};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use registry_backend::Trace;
#[cfg(debug_assertions)]
use registry_backend::doc::ApiDoc;
use registry_backend::inbound::http::health::{HealthState, live, ready};
use registry_backend::inbound::http::state::HttpState;
use registry_backend::inbound::http::{accounts, json_config, users};

use config::{CLIENT_REQUEST_TIMEOUT, KEEP_ALIVE, SHUTDOWN_TIMEOUT};

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .wrap(Trace)
        .service(ready)
        .service(live)
        .configure(users::configure)
        .configure(accounts::configure);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct the HTTP server and mark the service ready.
///
/// Signal handling is left to [`shutdown_on_signal`] so liveness can be
/// flipped before the drain starts.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig {
        bind_addr,
        registry,
    } = config;
    let http_state = web::Data::new(HttpState::new(registry));
    #[cfg(feature = "metrics")]
    let prometheus = build_metrics()?;

    let server = HttpServer::new(move || {
        let app = build_app(server_health_state.clone(), http_state.clone());

        #[cfg(feature = "metrics")]
        let app = app.wrap(prometheus.clone());

        app
    })
    .client_request_timeout(CLIENT_REQUEST_TIMEOUT)
    .keep_alive(KEEP_ALIVE)
    .shutdown_timeout(SHUTDOWN_TIMEOUT.as_secs())
    .disable_signals()
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "registry listening");
    health_state.mark_ready();
    Ok(server)
}

#[cfg(feature = "metrics")]
fn build_metrics() -> std::io::Result<actix_web_prom::PrometheusMetrics> {
    actix_web_prom::PrometheusMetricsBuilder::new("registry")
        .endpoint("/metrics")
        .build()
        .map_err(|err| std::io::Error::other(format!("configure Prometheus metrics: {err}")))
}

/// Wait for SIGINT or SIGTERM, fail both probes, then drain gracefully.
pub async fn shutdown_on_signal(handle: ServerHandle, health_state: web::Data<HealthState>) {
    wait_for_signal().await;
    info!("shutdown signal received; draining");
    begin_drain(&health_state);
    handle.stop(true).await;
}

fn begin_drain(health_state: &HealthState) {
    health_state.mark_not_ready();
    health_state.mark_unhealthy();
}

/// Resolve when Ctrl-C arrives; a failed handler registration never resolves.
async fn ctrl_c_or_pending<F>(ctrl_c: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(error) = ctrl_c.await {
        error!(%error, "Ctrl-C handler unavailable");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut terminate) => {
            tokio::select! {
                () = ctrl_c_or_pending(tokio::signal::ctrl_c()) => {}
                _ = terminate.recv() => {}
            }
        }
        Err(error) => {
            tracing::warn!(%error, "SIGTERM handler unavailable; waiting for Ctrl-C only");
            ctrl_c_or_pending(tokio::signal::ctrl_c()).await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    ctrl_c_or_pending(tokio::signal::ctrl_c()).await;
}
