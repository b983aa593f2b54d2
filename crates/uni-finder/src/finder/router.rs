use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CountrySelection, ProfileInput, RecommendationSummary, UniversityFinder};
use crate::error::AppError;

pub const NO_MATCHES_MESSAGE: &str = "No universities match the selected countries.";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecommendationRequest {
    /// Country labels to score; empty or containing "All" means every country.
    #[serde(default)]
    pub countries: Vec<String>,
    pub profile: ProfileInput,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResponse {
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub summary: RecommendationSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CountriesResponse {
    pub countries: Vec<String>,
}

/// Router builder exposing the country list and the recommendation endpoint.
pub fn finder_router(finder: Arc<UniversityFinder>) -> Router {
    Router::new()
        .route("/api/v1/countries", get(countries_handler))
        .route("/api/v1/recommendations", post(recommendation_handler))
        .with_state(finder)
}

pub(crate) async fn countries_handler(
    State(finder): State<Arc<UniversityFinder>>,
) -> Json<CountriesResponse> {
    let countries = finder
        .tables()
        .countries()
        .map(|country| country.label().to_string())
        .collect();
    Json(CountriesResponse { countries })
}

pub(crate) async fn recommendation_handler(
    State(finder): State<Arc<UniversityFinder>>,
    Json(request): Json<RecommendationRequest>,
) -> Result<Json<RecommendationResponse>, AppError> {
    request.profile.validate()?;

    let selection = CountrySelection::from_labels(&request.countries);
    let recommendation = finder.recommend(&request.profile, &selection);
    let message = recommendation.is_empty().then_some(NO_MATCHES_MESSAGE);

    Ok(Json(RecommendationResponse {
        generated_at: Utc::now(),
        summary: recommendation.summary(),
        message,
    }))
}
