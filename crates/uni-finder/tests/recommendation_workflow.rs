use std::io::Cursor;
use uni_finder::finder::{
    CountrySelection, ProfileInput, RankedUniversity, Tier, TierWindows, UniversityFinder,
};
use uni_finder::tables::ReferenceTables;

const WEIGHTS_CSV: &str = include_str!("../../../data/country_weights.csv");
const UNIVERSITIES_CSV: &str = include_str!("../../../data/universities.csv");

fn sample_finder() -> UniversityFinder {
    let tables = ReferenceTables::from_readers(
        Cursor::new(WEIGHTS_CSV),
        Cursor::new(UNIVERSITIES_CSV),
    )
    .expect("sample tables load");
    UniversityFinder::new(tables, TierWindows::default())
}

fn maxed_profile() -> ProfileInput {
    ProfileInput {
        class_9: 100.0,
        class_10: 100.0,
        class_11: 100.0,
        class_12: 100.0,
        sat: 1600.0,
        ap_scores: vec![5.0, 5.0],
        co_curricular: 3.0,
        extra_curricular: 3.0,
        internships: 2.0,
        community_service: true,
        research_project: true,
        lors: 3.0,
    }
}

fn typical_profile() -> ProfileInput {
    ProfileInput {
        class_9: 88.0,
        class_10: 91.0,
        class_11: 84.0,
        class_12: 89.0,
        sat: 1390.0,
        ap_scores: vec![4.0, 5.0, 3.0],
        co_curricular: 2.0,
        extra_curricular: 1.0,
        internships: 1.0,
        community_service: true,
        research_project: false,
        lors: 2.0,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn names(rows: &[RankedUniversity]) -> Vec<&str> {
    rows.iter().map(|row| row.university_name.as_str()).collect()
}

#[test]
fn sample_tables_flag_unusable_rows() {
    let finder = sample_finder();
    let tables = finder.tables();
    assert_eq!(tables.weights().len(), 5);
    assert_eq!(tables.universities().len(), 40);
    assert_eq!(
        tables
            .universities()
            .iter()
            .filter(|university| university.required_threshold.is_none())
            .count(),
        1
    );
}

#[test]
fn maxed_profile_anchors_on_the_closest_requirement() {
    let finder = sample_finder();
    let recommendation = finder.recommend(&maxed_profile(), &CountrySelection::All);

    assert!(recommendation
        .country_scores()
        .iter()
        .all(|score| score.total_score == 100.0));
    assert_eq!(recommendation.universities().len(), 38);
    assert!(recommendation
        .universities()
        .iter()
        .all(|row| row.gap <= 0.0));

    assert_eq!(recommendation.anchor_index(), Some(0));
    let anchor = recommendation.anchor().expect("anchor present");
    assert_eq!(anchor.university_name, "Massachusetts Institute of Technology");
    assert_eq!(anchor.gap, -1.5);

    assert!(recommendation.band(Tier::Ambitious).is_empty());
    assert_eq!(
        names(recommendation.band(Tier::Target)),
        vec!["Massachusetts Institute of Technology"]
    );
    assert_eq!(
        names(recommendation.band(Tier::Safe)),
        vec![
            "University of Oxford",
            "University of Cambridge",
            "Stanford University",
            "Harvard University",
            "Imperial College London",
            "California Institute of Technology",
        ]
    );
}

#[test]
fn empty_profile_anchors_on_the_lowest_requirement() {
    let finder = sample_finder();
    let recommendation = finder.recommend(&ProfileInput::default(), &CountrySelection::All);

    assert!(recommendation
        .country_scores()
        .iter()
        .all(|score| score.total_score == 0.0));
    assert_eq!(recommendation.anchor_index(), Some(37));
    let anchor = recommendation.anchor().expect("anchor present");
    assert_eq!(anchor.university_name, "University of Arizona");

    let bands = recommendation.bands().expect("bands present");
    assert_eq!(bands.target, 32..38);
    assert_eq!(bands.ambitious, 26..32);
    assert!(bands.safe.is_empty());
}

#[test]
fn typical_profile_tiers_are_disjoint_and_anchored() {
    let finder = sample_finder();
    let profile = typical_profile();
    profile.validate().expect("profile in domain");
    let recommendation = finder.recommend(&profile, &CountrySelection::All);

    let rows = recommendation.universities();
    assert!(rows.windows(2).all(|pair| pair[0].gap >= pair[1].gap));
    for row in rows {
        assert_eq!(round1(row.required_threshold - row.applicant_score), row.gap);
    }

    let anchor_index = recommendation.anchor_index().expect("anchor present");
    let anchor = &rows[anchor_index];
    if rows.iter().any(|row| row.gap > 0.0) {
        assert!(anchor.gap > 0.0);
        assert!(rows
            .iter()
            .filter(|row| row.gap > 0.0)
            .all(|row| row.gap >= anchor.gap));
    }

    let target = recommendation.band(Tier::Target);
    assert_eq!(target.last(), Some(anchor));
    assert!(target.len() <= 6);
    assert!(recommendation.band(Tier::Ambitious).len() <= 6);
    assert!(recommendation.band(Tier::Safe).len() <= 6);

    let tiered: usize = Tier::ordered()
        .into_iter()
        .map(|tier| recommendation.band(tier).len())
        .sum();
    assert_eq!(recommendation.tiered().count(), tiered);
    for tier in Tier::ordered() {
        assert!(recommendation
            .band(tier)
            .iter()
            .all(|row| row.tier == Some(tier)));
    }
}

#[test]
fn selection_limits_scored_countries() {
    let finder = sample_finder();
    let selection = CountrySelection::from_labels(["uk", "Germany"]);
    let recommendation = finder.recommend(&typical_profile(), &selection);

    let countries: Vec<_> = recommendation
        .country_scores()
        .iter()
        .map(|score| score.country.label())
        .collect();
    assert_eq!(countries.len(), 2);
    assert!(countries.contains(&"UK") && countries.contains(&"Germany"));
    assert!(recommendation
        .universities()
        .iter()
        .all(|row| matches!(row.country.label(), "UK" | "Germany")));
    assert_eq!(recommendation.universities().len(), 14);
}

#[test]
fn countries_without_weights_never_surface() {
    let finder = sample_finder();
    for profile in [maxed_profile(), typical_profile(), ProfileInput::default()] {
        let recommendation = finder.recommend(&profile, &CountrySelection::All);
        assert!(recommendation
            .universities()
            .iter()
            .all(|row| row.country.label() != "Singapore"));
        assert!(recommendation
            .universities()
            .iter()
            .all(|row| row.university_name != "Royal Conservatoire Trust"));
    }
}

#[test]
fn unmatched_selection_returns_empty_recommendation() {
    let finder = sample_finder();
    let selection = CountrySelection::from_labels(["Singapore"]);
    let recommendation = finder.recommend(&typical_profile(), &selection);

    assert!(recommendation.is_empty());
    assert!(recommendation.country_scores().is_empty());
    assert!(recommendation.anchor().is_none());
}

#[test]
fn half_profile_against_balanced_weights_scores_fifty() {
    let weights = "Country,Class 9,Class 10,Class 11,Class 12,SAT,AP,CC,EC,Internship,Community,Research,LOR\n\
Testland,1,1,1,1,1,1,1,1,1,1,1,1\n";
    let universities = "Country,University,QS Ranking,Required Profile Score\n\
Testland,Test University,1,60.0\n";
    let tables = ReferenceTables::from_readers(Cursor::new(weights), Cursor::new(universities))
        .expect("tables load");
    let finder = UniversityFinder::new(tables, TierWindows::default());

    let profile = ProfileInput {
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
    };
    let recommendation = finder.recommend(&profile, &CountrySelection::All);

    let score = &recommendation.country_scores()[0];
    assert_eq!(score.academic_pct, 50.0);
    assert_eq!(score.activity_pct, 50.0);
    assert_eq!(score.recommendation_pct, 50.0);

    // Unit weights are not normalized, so the total is the raw sum scaled by 100.
    assert_eq!(score.total_score, 600.0);

    let balanced = "Country,Class 9,Class 10,Class 11,Class 12,SAT,AP,CC,EC,Internship,Community,Research,LOR\n\
Testland,0.0833333333333333,0.0833333333333333,0.0833333333333333,0.0833333333333333,0.0833333333333333,0.0833333333333333,0.0833333333333333,0.0833333333333333,0.0833333333333333,0.0833333333333333,0.0833333333333333,0.0833333333333333\n";
    let tables = ReferenceTables::from_readers(Cursor::new(balanced), Cursor::new(universities))
        .expect("tables load");
    let finder = UniversityFinder::new(tables, TierWindows::default());
    let recommendation = finder.recommend(&profile, &CountrySelection::All);

    assert_eq!(recommendation.country_scores()[0].total_score, 50.0);
    let only = &recommendation.universities()[0];
    assert_eq!(only.gap, 10.0);
    assert!(only.is_anchor);
    assert_eq!(only.tier, Some(Tier::Target));
}
