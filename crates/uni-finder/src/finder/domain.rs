use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Profile dimensions shared by the applicant vector and every country's weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Class9,
    Class10,
    Class11,
    Class12,
    Sat,
    Ap,
    CoCurricular,
    ExtraCurricular,
    Internship,
    CommunityService,
    Research,
    Lor,
}

impl Dimension {
    pub const COUNT: usize = 12;

    pub const fn ordered() -> [Dimension; Self::COUNT] {
        [
            Self::Class9,
            Self::Class10,
            Self::Class11,
            Self::Class12,
            Self::Sat,
            Self::Ap,
            Self::CoCurricular,
            Self::ExtraCurricular,
            Self::Internship,
            Self::CommunityService,
            Self::Research,
            Self::Lor,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Class9 => "Class 9",
            Self::Class10 => "Class 10",
            Self::Class11 => "Class 11",
            Self::Class12 => "Class 12",
            Self::Sat => "SAT",
            Self::Ap => "AP",
            Self::CoCurricular => "CC",
            Self::ExtraCurricular => "EC",
            Self::Internship => "Internship",
            Self::CommunityService => "Community",
            Self::Research => "Research",
            Self::Lor => "LOR",
        }
    }

    pub const fn group(self) -> DimensionGroup {
        match self {
            Self::Class9 | Self::Class10 | Self::Class11 | Self::Class12 | Self::Sat | Self::Ap => {
                DimensionGroup::Academic
            }
            Self::CoCurricular
            | Self::ExtraCurricular
            | Self::Internship
            | Self::CommunityService
            | Self::Research => DimensionGroup::Activity,
            Self::Lor => DimensionGroup::Recommendation,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionGroup {
    Academic,
    Activity,
    Recommendation,
}

impl DimensionGroup {
    pub const fn ordered() -> [DimensionGroup; 3] {
        [Self::Academic, Self::Activity, Self::Recommendation]
    }

    pub fn dimensions(self) -> impl Iterator<Item = Dimension> {
        Dimension::ordered()
            .into_iter()
            .filter(move |dimension| dimension.group() == self)
    }
}

/// Fixed-shape mapping from every [`Dimension`] to a value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DimensionMap([f64; Dimension::COUNT]);

impl DimensionMap {
    pub fn from_fn(mut value: impl FnMut(Dimension) -> f64) -> Self {
        let mut values = [0.0; Dimension::COUNT];
        for dimension in Dimension::ordered() {
            values[dimension.index()] = value(dimension);
        }
        Self(values)
    }

    pub fn uniform(value: f64) -> Self {
        Self([value; Dimension::COUNT])
    }

    pub fn get(&self, dimension: Dimension) -> f64 {
        self.0[dimension.index()]
    }

    pub fn set(&mut self, dimension: Dimension, value: f64) {
        self.0[dimension.index()] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, f64)> + '_ {
        Dimension::ordered()
            .into_iter()
            .map(move |dimension| (dimension, self.get(dimension)))
    }

    pub fn group_sum(&self, group: DimensionGroup) -> f64 {
        group.dimensions().map(|dimension| self.get(dimension)).sum()
    }
}

impl Serialize for DimensionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(Dimension::COUNT))?;
        for (dimension, value) in self.iter() {
            map.serialize_entry(&dimension, &value)?;
        }
        map.end()
    }
}

/// Country identifier: a display label plus a case-folded key used for matching.
#[derive(Debug, Clone, Eq)]
pub struct CountryId {
    label: String,
    key: String,
}

impl CountryId {
    /// Returns `None` for blank input and for the `nan` placeholder spreadsheets emit.
    pub fn parse(raw: &str) -> Option<Self> {
        let cleaned = raw.replace(['\u{feff}', '\u{200b}'], "");
        let label = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
        if label.is_empty() || label.eq_ignore_ascii_case("nan") {
            return None;
        }
        let key = label.to_lowercase();
        Some(Self { label, key })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl PartialEq for CountryId {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Hash for CountryId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for CountryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl Serialize for CountryId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label)
    }
}

/// One row of the reference weight table.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryWeightRecord {
    pub country: CountryId,
    pub weights: DimensionMap,
}

/// One row of the university threshold table.
///
/// `required_threshold` is `None` when the source cell did not parse as a number;
/// such universities never reach the gap list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UniversityRecord {
    pub country: CountryId,
    pub name: String,
    pub rank: Option<u32>,
    pub required_threshold: Option<f64>,
}

/// Rounds half away from zero to one decimal place. Never returns `-0.0`.
pub(crate) fn round1(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_partition_all_dimensions() {
        let academic = DimensionGroup::Academic.dimensions().count();
        let activity = DimensionGroup::Activity.dimensions().count();
        let recommendation = DimensionGroup::Recommendation.dimensions().count();
        assert_eq!((academic, activity, recommendation), (6, 5, 1));
        assert_eq!(academic + activity + recommendation, Dimension::COUNT);
    }

    #[test]
    fn country_ids_match_case_and_spacing_insensitively() {
        let canonical = CountryId::parse("United Kingdom").expect("valid");
        let messy = CountryId::parse("  united   KINGDOM\u{feff} ").expect("valid");
        assert_eq!(canonical, messy);
        assert_eq!(messy.label(), "united KINGDOM");
        assert_eq!(messy.key(), "united kingdom");
    }

    #[test]
    fn country_ids_reject_blank_and_nan() {
        assert!(CountryId::parse("   ").is_none());
        assert!(CountryId::parse("NaN").is_none());
    }

    #[test]
    fn dimension_map_group_sums() {
        let mut weights = DimensionMap::uniform(1.0);
        weights.set(Dimension::Lor, 4.0);
        assert_eq!(weights.group_sum(DimensionGroup::Academic), 6.0);
        assert_eq!(weights.group_sum(DimensionGroup::Activity), 5.0);
        assert_eq!(weights.group_sum(DimensionGroup::Recommendation), 4.0);
    }

    #[test]
    fn round1_rounds_half_away_from_zero() {
        assert_eq!(round1(10.25), 10.3);
        assert_eq!(round1(-2.35), -2.4);
        assert_eq!(round1(49.99999999), 50.0);
    }

    #[test]
    fn round1_normalizes_negative_zero() {
        assert!(round1(-0.04).is_sign_positive());
    }
}
