//! Scoring, gap analysis, and tiering.
//!
//! Data flows one way: [`ProfileInput::normalize`] produces the profile
//! vector, [`score_countries`] weighs it per reference country,
//! [`analyze_gaps`] joins the scores onto the university table, and the
//! gap-sorted list is banded around an anchor by [`partition`].

pub mod domain;
mod gap;
mod profile;
mod report;
pub mod router;
mod scorer;
mod tiers;

pub use domain::{
    CountryId, CountryWeightRecord, Dimension, DimensionGroup, DimensionMap, UniversityRecord,
};
pub use gap::{analyze_gaps, GapEntry};
pub use profile::{NormalizedProfile, ProfileError, ProfileInput, SAT_MAX, SAT_MIN};
pub use report::{RankedUniversity, Recommendation, RecommendationSummary};
pub use router::finder_router;
pub use scorer::{breakdown, score_countries, score_country, CountryScore, CountrySelection};
pub use tiers::{partition, select_anchor, Tier, TierBands, TierWindows};

use crate::tables::ReferenceTables;
use tracing::debug;

/// Runs the whole pipeline for one applicant against one table snapshot.
pub fn recommend(
    profile: &NormalizedProfile,
    tables: &ReferenceTables,
    selection: &CountrySelection,
    windows: &TierWindows,
) -> Recommendation {
    let scores = score_countries(profile, tables.weights(), selection);
    let entries = analyze_gaps(&scores, tables.universities());
    let recommendation = Recommendation::assemble(breakdown(&scores), entries, windows);

    debug!(
        countries = scores.len(),
        universities = recommendation.universities().len(),
        anchor = ?recommendation.anchor_index(),
        "recommendation assembled"
    );

    recommendation
}

/// Holds a table snapshot and band configuration; safe to share across threads.
#[derive(Debug, Clone)]
pub struct UniversityFinder {
    tables: ReferenceTables,
    windows: TierWindows,
}

impl UniversityFinder {
    pub fn new(tables: ReferenceTables, windows: TierWindows) -> Self {
        Self { tables, windows }
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    pub fn windows(&self) -> &TierWindows {
        &self.windows
    }

    /// Normalizes `profile` and runs [`recommend`]. Validation is the caller's job.
    pub fn recommend(&self, profile: &ProfileInput, selection: &CountrySelection) -> Recommendation {
        recommend(&profile.normalize(), &self.tables, selection, &self.windows)
    }
}
