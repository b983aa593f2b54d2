use super::domain::{round1, CountryId, UniversityRecord};
use super::scorer::CountryScore;
use serde::Serialize;
use std::collections::HashMap;

/// A university joined to the applicant's score for its country.
///
/// Positive `gap` means the applicant sits below the requirement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapEntry {
    pub country: CountryId,
    pub university_name: String,
    pub rank: Option<u32>,
    pub required_threshold: f64,
    pub applicant_score: f64,
    pub gap: f64,
}

/// Joins scores onto the threshold table and orders the result by gap, largest first.
///
/// Universities without a scored country or without a numeric threshold are
/// dropped. Equal gaps keep their table order.
pub fn analyze_gaps(scores: &[CountryScore], universities: &[UniversityRecord]) -> Vec<GapEntry> {
    let mut score_by_country: HashMap<&CountryId, f64> = HashMap::with_capacity(scores.len());
    for score in scores {
        score_by_country
            .entry(&score.country)
            .or_insert(score.total_score);
    }

    let mut entries: Vec<GapEntry> = universities
        .iter()
        .filter_map(|university| {
            let applicant_score = *score_by_country.get(&university.country)?;
            let required_threshold = university.required_threshold?;
            Some(GapEntry {
                country: university.country.clone(),
                university_name: university.name.clone(),
                rank: university.rank,
                required_threshold,
                applicant_score,
                gap: round1(required_threshold - applicant_score),
            })
        })
        .collect();

    entries.sort_by(|a, b| b.gap.total_cmp(&a.gap));
    entries
}
