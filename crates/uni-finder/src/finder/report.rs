use super::domain::CountryId;
use super::gap::GapEntry;
use super::scorer::CountryScore;
use super::tiers::{partition, select_anchor, Tier, TierBands, TierWindows};
use serde::Serialize;

/// One row of the gap analysis with its tier, if it landed in a band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedUniversity {
    pub country: CountryId,
    pub university_name: String,
    pub rank: Option<u32>,
    pub required_threshold: f64,
    pub applicant_score: f64,
    pub gap: f64,
    pub tier: Option<Tier>,
    pub is_anchor: bool,
}

impl RankedUniversity {
    fn from_entry(entry: GapEntry, tier: Option<Tier>, is_anchor: bool) -> Self {
        Self {
            country: entry.country,
            university_name: entry.university_name,
            rank: entry.rank,
            required_threshold: entry.required_threshold,
            applicant_score: entry.applicant_score,
            gap: entry.gap,
            tier,
            is_anchor,
        }
    }
}

/// Result of one evaluation: country breakdown, gap-sorted universities, and bands.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    country_scores: Vec<CountryScore>,
    universities: Vec<RankedUniversity>,
    bands: Option<TierBands>,
}

impl Recommendation {
    pub(crate) fn assemble(
        country_scores: Vec<CountryScore>,
        entries: Vec<GapEntry>,
        windows: &TierWindows,
    ) -> Self {
        let bands =
            select_anchor(&entries).map(|anchor| partition(entries.len(), anchor, windows));

        let universities = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                let tier = bands.as_ref().and_then(|bands| bands.tier_of(index));
                let is_anchor = bands.as_ref().is_some_and(|bands| bands.anchor == index);
                RankedUniversity::from_entry(entry, tier, is_anchor)
            })
            .collect();

        Self {
            country_scores,
            universities,
            bands,
        }
    }

    /// No university survived the join; there is nothing to tier.
    pub fn is_empty(&self) -> bool {
        self.universities.is_empty()
    }

    /// Country scores, highest total first.
    pub fn country_scores(&self) -> &[CountryScore] {
        &self.country_scores
    }

    /// Every joined university, largest gap first.
    pub fn universities(&self) -> &[RankedUniversity] {
        &self.universities
    }

    pub fn bands(&self) -> Option<&TierBands> {
        self.bands.as_ref()
    }

    pub fn anchor_index(&self) -> Option<usize> {
        self.bands.as_ref().map(|bands| bands.anchor)
    }

    pub fn anchor(&self) -> Option<&RankedUniversity> {
        self.anchor_index()
            .and_then(|index| self.universities.get(index))
    }

    pub fn band(&self, tier: Tier) -> &[RankedUniversity] {
        match &self.bands {
            Some(bands) => &self.universities[bands.range(tier)],
            None => &[],
        }
    }

    /// Universities that landed in some band, in gap order.
    pub fn tiered(&self) -> impl Iterator<Item = &RankedUniversity> {
        self.universities
            .iter()
            .filter(|university| university.tier.is_some())
    }

    pub fn summary(&self) -> RecommendationSummary {
        RecommendationSummary {
            country_scores: self.country_scores.clone(),
            gap_analysis: self.universities.clone(),
            anchor: self.anchor_index(),
            ambitious: self.band(Tier::Ambitious).to_vec(),
            target: self.band(Tier::Target).to_vec(),
            safe: self.band(Tier::Safe).to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationSummary {
    pub country_scores: Vec<CountryScore>,
    pub gap_analysis: Vec<RankedUniversity>,
    pub anchor: Option<usize>,
    pub ambitious: Vec<RankedUniversity>,
    pub target: Vec<RankedUniversity>,
    pub safe: Vec<RankedUniversity>,
}
