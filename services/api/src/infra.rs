use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use uni_finder::config::AppConfig;
use uni_finder::error::AppError;
use uni_finder::finder::UniversityFinder;
use uni_finder::tables::ReferenceTables;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loads both reference tables named by `config` into a ready engine.
pub(crate) fn load_finder(config: &AppConfig) -> Result<UniversityFinder, AppError> {
    let tables =
        ReferenceTables::from_paths(&config.data.weights_csv, &config.data.universities_csv)?;
    Ok(UniversityFinder::new(tables, config.tiers))
}
