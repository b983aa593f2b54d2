use super::domain::{Dimension, DimensionMap};
use serde::{Deserialize, Serialize};

pub const PERCENT_MAX: f64 = 100.0;
pub const SAT_MIN: f64 = 400.0;
pub const SAT_MAX: f64 = 1600.0;
pub const AP_SCORE_MAX: f64 = 5.0;
pub const AP_TESTS_MAX: usize = 5;
pub const CO_CURRICULAR_MAX: f64 = 3.0;
pub const EXTRA_CURRICULAR_MAX: f64 = 3.0;
pub const INTERNSHIPS_MAX: f64 = 2.0;
pub const LORS_MAX: f64 = 3.0;

/// Raw applicant entries as collected from the form or CLI.
///
/// Counters are real-valued so callers may pass averaged or partial counts;
/// form collection normally supplies whole numbers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProfileInput {
    pub class_9: f64,
    pub class_10: f64,
    pub class_11: f64,
    pub class_12: f64,
    pub sat: f64,
    #[serde(default)]
    pub ap_scores: Vec<f64>,
    #[serde(default)]
    pub co_curricular: f64,
    #[serde(default)]
    pub extra_curricular: f64,
    #[serde(default)]
    pub internships: f64,
    #[serde(default)]
    pub community_service: bool,
    #[serde(default)]
    pub research_project: bool,
    #[serde(default)]
    pub lors: f64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("at most {max} AP scores may be supplied (got {count})")]
    TooManyApScores { count: usize, max: usize },
}

impl ProfileInput {
    /// Checks every raw field against its declared domain.
    pub fn validate(&self) -> Result<(), ProfileError> {
        check_range("class_9", self.class_9, 0.0, PERCENT_MAX)?;
        check_range("class_10", self.class_10, 0.0, PERCENT_MAX)?;
        check_range("class_11", self.class_11, 0.0, PERCENT_MAX)?;
        check_range("class_12", self.class_12, 0.0, PERCENT_MAX)?;
        check_range("sat", self.sat, SAT_MIN, SAT_MAX)?;

        if self.ap_scores.len() > AP_TESTS_MAX {
            return Err(ProfileError::TooManyApScores {
                count: self.ap_scores.len(),
                max: AP_TESTS_MAX,
            });
        }
        for score in &self.ap_scores {
            check_range("ap_scores", *score, 0.0, AP_SCORE_MAX)?;
        }

        check_range("co_curricular", self.co_curricular, 0.0, CO_CURRICULAR_MAX)?;
        check_range(
            "extra_curricular",
            self.extra_curricular,
            0.0,
            EXTRA_CURRICULAR_MAX,
        )?;
        check_range("internships", self.internships, 0.0, INTERNSHIPS_MAX)?;
        check_range("lors", self.lors, 0.0, LORS_MAX)?;
        Ok(())
    }

    /// Scales every raw field into `[0, 1]`. Inputs are assumed to be in domain.
    pub fn normalize(&self) -> NormalizedProfile {
        let ap_average = if self.ap_scores.is_empty() {
            0.0
        } else {
            self.ap_scores.iter().sum::<f64>() / (self.ap_scores.len() as f64 * AP_SCORE_MAX)
        };

        let values = DimensionMap::from_fn(|dimension| match dimension {
            Dimension::Class9 => self.class_9 / PERCENT_MAX,
            Dimension::Class10 => self.class_10 / PERCENT_MAX,
            Dimension::Class11 => self.class_11 / PERCENT_MAX,
            Dimension::Class12 => self.class_12 / PERCENT_MAX,
            Dimension::Sat => self.sat / SAT_MAX,
            Dimension::Ap => ap_average,
            Dimension::CoCurricular => self.co_curricular / CO_CURRICULAR_MAX,
            Dimension::ExtraCurricular => self.extra_curricular / EXTRA_CURRICULAR_MAX,
            Dimension::Internship => self.internships / INTERNSHIPS_MAX,
            Dimension::CommunityService => flag(self.community_service),
            Dimension::Research => flag(self.research_project),
            Dimension::Lor => self.lors / LORS_MAX,
        });

        NormalizedProfile(values)
    }
}

fn flag(set: bool) -> f64 {
    if set {
        1.0
    } else {
        0.0
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ProfileError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ProfileError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

/// Applicant profile vector; every dimension lies in `[0, 1]` for in-domain input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NormalizedProfile(DimensionMap);

impl NormalizedProfile {
    pub fn new(values: DimensionMap) -> Self {
        Self(values)
    }

    pub fn get(&self, dimension: Dimension) -> f64 {
        self.0.get(dimension)
    }

    pub fn values(&self) -> &DimensionMap {
        &self.0
    }
}
