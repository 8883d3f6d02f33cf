use std::sync::Arc;

use almanac_app::app::api::routes;
use almanac_app::service_handler::EventServiceHandler;
use almanac_core::config::load_config;
use almanac_service::{EventService, NotificationDispatcher, TracingDispatcher};
use almanac_store::open_store;
use salvo::conn::TcpListener;
use salvo::cors::{AllowHeaders, AllowMethods, AllowOrigin, Cors};
use salvo::logging::Logger;
use salvo::{Listener, Router, Service};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting Almanac calendar server");

    let config = load_config()?;

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let store = open_store(&config.storage).await?;
    let dispatcher: Arc<dyn NotificationDispatcher> = Arc::new(TracingDispatcher);
    let service = Arc::new(EventService::new(store, dispatcher, &config.calendar));

    tracing::info!(backend = ?config.storage.backend, "Event store ready");

    let bind_addr = config.server.bind_addr();
    let acceptor = TcpListener::new(bind_addr.clone()).bind().await;

    let router = Router::new()
        .hoop(Logger::new())
        .hoop(EventServiceHandler { service })
        .push(routes());

    let cors = Cors::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(AllowMethods::any())
        .allow_headers(AllowHeaders::any())
        .into_handler();

    tracing::info!(origin = %config.server.origin(), "Server listening on {bind_addr}");

    salvo::Server::new(acceptor)
        .serve(Service::new(router).hoop(cors))
        .await;

    Ok(())
}
