use crate::cli::ServeArgs;
use crate::infra::{load_finder, AppState};
use crate::routes::with_finder_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use uni_finder::config::AppConfig;
use uni_finder::error::AppError;
use uni_finder::telemetry;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    args.tables.apply(&mut config);

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let finder = Arc::new(load_finder(&config)?);
    let app = with_finder_routes(finder)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        weights = %config.data.weights_csv.display(),
        universities = %config.data.universities_csv.display(),
        "university finder ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
