use crate::cli::ServeArgs;
use crate::infra::{
    seed_catalog, seed_home_page, AppState, InMemoryHomePageStore, InMemoryPageCatalog,
};
use crate::routes::with_home_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Local;
use hypha_public::config::AppConfig;
use hypha_public::error::AppError;
use hypha_public::public::home::HomePageService;
use hypha_public::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = Arc::new(InMemoryPageCatalog::with_pages(seed_catalog(
        Local::now().date_naive(),
    )));
    let store = Arc::new(InMemoryHomePageStore::with_page(seed_home_page()));
    let home_service = Arc::new(HomePageService::new(
        store,
        catalog,
        config.home.related_limit,
    ));

    let app = with_home_routes(home_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        related_limit = config.home.related_limit,
        "public site ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
