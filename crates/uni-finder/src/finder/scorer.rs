use super::domain::{round1, CountryId, CountryWeightRecord, DimensionGroup};
use super::profile::NormalizedProfile;
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// Weighted profile score for one reference country.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryScore {
    pub country: CountryId,
    pub total_score: f64,
    pub academic_pct: f64,
    pub activity_pct: f64,
    pub recommendation_pct: f64,
}

/// Which reference countries take part in scoring.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CountrySelection {
    #[default]
    All,
    Only(HashSet<CountryId>),
}

impl CountrySelection {
    /// An omitted list, or one containing `All`, selects every country.
    /// Labels that name no country are dropped, so a list of only blank
    /// labels selects nothing.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut labels = labels.into_iter().peekable();
        if labels.peek().is_none() {
            return Self::All;
        }

        let mut selected = HashSet::new();
        for label in labels {
            let label = label.as_ref();
            if label.trim().eq_ignore_ascii_case("all") {
                return Self::All;
            }
            if let Some(country) = CountryId::parse(label) {
                selected.insert(country);
            }
        }
        Self::Only(selected)
    }

    pub fn includes(&self, country: &CountryId) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected.contains(country),
        }
    }
}

/// Combines the profile vector with one country's weights.
pub fn score_country(profile: &NormalizedProfile, record: &CountryWeightRecord) -> CountryScore {
    let raw = |group: DimensionGroup| -> f64 {
        group
            .dimensions()
            .map(|dimension| profile.get(dimension) * record.weights.get(dimension))
            .sum()
    };
    let pct = |raw: f64, group: DimensionGroup| -> f64 {
        let denominator = record.weights.group_sum(group);
        let denominator = if denominator == 0.0 { 1.0 } else { denominator };
        round1(raw / denominator * 100.0)
    };

    let raw_academic = raw(DimensionGroup::Academic);
    let raw_activity = raw(DimensionGroup::Activity);
    let raw_recommendation = raw(DimensionGroup::Recommendation);

    CountryScore {
        country: record.country.clone(),
        total_score: round1((raw_academic + raw_activity + raw_recommendation) * 100.0),
        academic_pct: pct(raw_academic, DimensionGroup::Academic),
        activity_pct: pct(raw_activity, DimensionGroup::Activity),
        recommendation_pct: pct(raw_recommendation, DimensionGroup::Recommendation),
    }
}

/// Scores every selected record, in table order.
pub fn score_countries(
    profile: &NormalizedProfile,
    records: &[CountryWeightRecord],
    selection: &CountrySelection,
) -> Vec<CountryScore> {
    if let CountrySelection::Only(selected) = selection {
        for country in selected {
            if !records.iter().any(|record| &record.country == country) {
                debug!(country = %country, "selected country has no reference weights");
            }
        }
    }

    records
        .iter()
        .filter(|record| selection.includes(&record.country))
        .map(|record| score_country(profile, record))
        .collect()
}

/// Country breakdown ordered by total score, highest first; ties keep table order.
pub fn breakdown(scores: &[CountryScore]) -> Vec<CountryScore> {
    let mut ordered = scores.to_vec();
    ordered.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finder::domain::{Dimension, DimensionMap};
    use crate::finder::profile::ProfileInput;

    fn record(country: &str, weights: DimensionMap) -> CountryWeightRecord {
        CountryWeightRecord {
            country: CountryId::parse(country).expect("valid country"),
            weights,
        }
    }

    fn half_profile() -> NormalizedProfile {
        ProfileInput {
            class_9: 50.0,
            class_10: 50.0,
            class_11: 50.0,
            class_12: 50.0,
            sat: 800.0,
            ap_scores: vec![2.5],
            co_curricular: 1.5,
            extra_curricular: 1.5,
            internships: 1.0,
            community_service: true,
            research_project: false,
            lors: 1.5,
        }
        .normalize()
    }

    #[test]
    fn half_profile_with_uniform_weights_scores_fifty_percent_per_group() {
        let score = score_country(&half_profile(), &record("USA", DimensionMap::uniform(1.0)));
        assert_eq!(score.academic_pct, 50.0);
        assert_eq!(score.activity_pct, 50.0);
        assert_eq!(score.recommendation_pct, 50.0);
        assert_eq!(score.total_score, 600.0);
    }

    #[test]
    fn half_profile_with_weights_summing_to_one_totals_fifty() {
        let weights = DimensionMap::uniform(1.0 / Dimension::COUNT as f64);
        let score = score_country(&half_profile(), &record("USA", weights));
        assert_eq!(score.total_score, 50.0);
        assert_eq!(score.academic_pct, 50.0);
    }

    #[test]
    fn scoring_is_deterministic() {
        let mut weights = DimensionMap::uniform(0.07);
        weights.set(Dimension::Sat, 0.13);
        weights.set(Dimension::Lor, 0.03);
        let record = record("Canada", weights);
        let profile = half_profile();

        let first = score_country(&profile, &record);
        for _ in 0..10 {
            let again = score_country(&profile, &record);
            assert_eq!(again, first);
            assert_eq!(again.total_score.to_bits(), first.total_score.to_bits());
        }
    }

    #[test]
    fn zero_weight_group_yields_zero_percent() {
        let mut weights = DimensionMap::uniform(0.1);
        for dimension in DimensionGroup::Activity.dimensions() {
            weights.set(dimension, 0.0);
        }
        weights.set(Dimension::Lor, 0.0);

        let score = score_country(&half_profile(), &record("Germany", weights));
        assert_eq!(score.activity_pct, 0.0);
        assert_eq!(score.recommendation_pct, 0.0);
        assert_eq!(score.academic_pct, 50.0);
    }

    #[test]
    fn selection_filters_records() {
        let records = vec![
            record("USA", DimensionMap::uniform(0.1)),
            record("UK", DimensionMap::uniform(0.05)),
            record("Canada", DimensionMap::uniform(0.02)),
        ];
        let selection = CountrySelection::from_labels(["uk", " canada "]);
        let scores = score_countries(&half_profile(), &records, &selection);
        let labels: Vec<_> = scores.iter().map(|score| score.country.label()).collect();
        assert_eq!(labels, vec!["UK", "Canada"]);
    }

    #[test]
    fn all_or_omitted_selection_scores_everything() {
        assert_eq!(CountrySelection::from_labels(["UK", "All"]), CountrySelection::All);
        assert_eq!(
            CountrySelection::from_labels(Vec::<String>::new()),
            CountrySelection::All
        );
    }

    #[test]
    fn blank_only_selection_scores_nothing() {
        let selection = CountrySelection::from_labels([" ", "nan"]);
        assert_eq!(selection, CountrySelection::Only(HashSet::new()));

        let records = vec![record("USA", DimensionMap::uniform(0.1))];
        assert!(score_countries(&half_profile(), &records, &selection).is_empty());
    }

    #[test]
    fn breakdown_orders_by_total_descending() {
        let records = vec![
            record("Ireland", DimensionMap::uniform(0.02)),
            record("USA", DimensionMap::uniform(0.1)),
            record("UK", DimensionMap::uniform(0.05)),
        ];
        let scores = score_countries(&half_profile(), &records, &CountrySelection::All);
        let ordered = breakdown(&scores);
        let labels: Vec<_> = ordered.iter().map(|score| score.country.label()).collect();
        assert_eq!(labels, vec!["USA", "UK", "Ireland"]);
    }
}
