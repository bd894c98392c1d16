use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryProfileRepository, InMemoryRosterRepository, InMemoryStaffRequestRepository,
};
use crate::routes::with_portal_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use graduate_corps::config::AppConfig;
use graduate_corps::error::AppError;
use graduate_corps::telemetry;
use graduate_corps::workflows::registration::service::RegistrationService;
use graduate_corps::workflows::roster::ingest::RosterIngestion;
use graduate_corps::workflows::staffing::service::StaffingService;
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

    let roster_repository = Arc::new(InMemoryRosterRepository::default());
    let profile_repository = Arc::new(InMemoryProfileRepository::default());
    let request_repository = Arc::new(InMemoryStaffRequestRepository::default());

    let ingestion = Arc::new(RosterIngestion::new(roster_repository.clone()));
    let staffing = Arc::new(StaffingService::new(request_repository));
    let registration = Arc::new(RegistrationService::new(
        roster_repository,
        profile_repository,
        staffing.clone(),
    ));

    let app = with_portal_routes(ingestion, registration, staffing)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "graduate corps portal ready");

    axum::serve(listener, app).await?;
    Ok(())
}
