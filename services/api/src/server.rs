use crate::cli::ServeArgs;
use crate::infra::{load_from_config, AppState, InMemoryResultRepository};
use crate::routes::with_career_test_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use career_compass::config::AppConfig;
use career_compass::error::AppError;
use career_compass::telemetry;
use career_compass::workflows::career_test::CareerTestService;
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

    let (questions, engine) = load_from_config(&config.career)?;
    let results = Arc::new(InMemoryResultRepository::default());
    let service = Arc::new(CareerTestService::new(
        Arc::new(questions),
        results,
        Arc::new(engine),
    ));

    let app = with_career_test_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        max_matches = config.career.max_matches,
        "career compass service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
