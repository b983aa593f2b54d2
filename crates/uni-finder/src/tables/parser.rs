use crate::finder::domain::{CountryId, Dimension, DimensionMap, UniversityRecord};
use crate::finder::CountryWeightRecord;
use serde::{Deserialize, Deserializer};
use std::io::Read;
use tracing::warn;

const COUNTRY_COLUMN: &str = "Country";
const UNIVERSITY_COLUMNS: [&str; 3] = [COUNTRY_COLUMN, "University", "Required Profile Score"];

#[derive(Debug)]
pub(crate) enum RowError {
    Csv(csv::Error),
    MissingColumn(&'static str),
}

impl From<csv::Error> for RowError {
    fn from(source: csv::Error) -> Self {
        RowError::Csv(source)
    }
}

pub(crate) fn parse_weight_rows<R: Read>(reader: R) -> Result<Vec<CountryWeightRecord>, RowError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    require_column(&headers, COUNTRY_COLUMN, |header| header == COUNTRY_COLUMN)?;
    for dimension in Dimension::ordered() {
        require_column(&headers, dimension.label(), |header| {
            header == dimension.label() || weight_header_alias(dimension) == Some(header)
        })?;
    }

    let mut records = Vec::new();
    for (line, row) in csv_reader.deserialize::<WeightRow>().enumerate() {
        let row = row?;
        let Some(country) = row.country.as_deref().and_then(CountryId::parse) else {
            continue;
        };

        let weights = DimensionMap::from_fn(|dimension| {
            coerce_weight(&country, dimension, row.cell(dimension), line + 2)
        });
        records.push(CountryWeightRecord { country, weights });
    }

    Ok(records)
}

pub(crate) fn parse_university_rows<R: Read>(
    reader: R,
) -> Result<Vec<UniversityRecord>, RowError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for column in UNIVERSITY_COLUMNS {
        require_column(&headers, column, |header| header == column)?;
    }

    let mut records = Vec::new();

    for (line, row) in csv_reader.deserialize::<UniversityRow>().enumerate() {
        let row = row?;
        let Some(country) = row.country.as_deref().and_then(CountryId::parse) else {
            warn!(line = line + 2, "skipping university row without a country");
            continue;
        };
        let name = row.university.unwrap_or_default();

        let required_threshold = row.required.as_deref().and_then(parse_number);
        if required_threshold.is_none() {
            warn!(
                line = line + 2,
                university = %name,
                value = row.required.as_deref().unwrap_or(""),
                "required profile score is not numeric; university will be excluded"
            );
        }

        let rank = row
            .rank
            .as_deref()
            .and_then(parse_number)
            .filter(|rank| *rank >= 1.0 && *rank <= u32::MAX as f64)
            .map(|rank| rank.round() as u32);

        records.push(UniversityRecord {
            country,
            name,
            rank,
            required_threshold,
        });
    }

    Ok(records)
}

fn require_column(
    headers: &csv::StringRecord,
    column: &'static str,
    matches: impl Fn(&str) -> bool,
) -> Result<(), RowError> {
    if headers.iter().any(matches) {
        Ok(())
    } else {
        Err(RowError::MissingColumn(column))
    }
}

/// Annotated header spellings used by the published weight sheet.
fn weight_header_alias(dimension: Dimension) -> Option<&'static str> {
    match dimension {
        Dimension::CoCurricular => Some("CC (Max 3)"),
        Dimension::ExtraCurricular => Some("EC (Max 3)"),
        Dimension::Internship => Some("Internship (Max 2)"),
        _ => None,
    }
}

fn coerce_weight(country: &CountryId, dimension: Dimension, cell: Option<&str>, line: usize) -> f64 {
    let Some(raw) = cell else {
        warn!(
            line,
            country = %country,
            dimension = dimension.label(),
            "weight cell is empty; using 0"
        );
        return 0.0;
    };
    match parse_number(raw) {
        Some(value) if value >= 0.0 => value,
        _ => {
            warn!(
                line,
                country = %country,
                dimension = dimension.label(),
                value = raw,
                "weight is not a non-negative number; using 0"
            );
            0.0
        }
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[derive(Debug, Deserialize)]
struct WeightRow {
    #[serde(rename = "Country", default, deserialize_with = "empty_string_as_none")]
    country: Option<String>,
    #[serde(rename = "Class 9", default, deserialize_with = "empty_string_as_none")]
    class_9: Option<String>,
    #[serde(rename = "Class 10", default, deserialize_with = "empty_string_as_none")]
    class_10: Option<String>,
    #[serde(rename = "Class 11", default, deserialize_with = "empty_string_as_none")]
    class_11: Option<String>,
    #[serde(rename = "Class 12", default, deserialize_with = "empty_string_as_none")]
    class_12: Option<String>,
    #[serde(rename = "SAT", default, deserialize_with = "empty_string_as_none")]
    sat: Option<String>,
    #[serde(rename = "AP", default, deserialize_with = "empty_string_as_none")]
    ap: Option<String>,
    #[serde(
        rename = "CC",
        alias = "CC (Max 3)",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    co_curricular: Option<String>,
    #[serde(
        rename = "EC",
        alias = "EC (Max 3)",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    extra_curricular: Option<String>,
    #[serde(
        rename = "Internship",
        alias = "Internship (Max 2)",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    internship: Option<String>,
    #[serde(rename = "Community", default, deserialize_with = "empty_string_as_none")]
    community: Option<String>,
    #[serde(rename = "Research", default, deserialize_with = "empty_string_as_none")]
    research: Option<String>,
    #[serde(rename = "LOR", default, deserialize_with = "empty_string_as_none")]
    lor: Option<String>,
}

impl WeightRow {
    fn cell(&self, dimension: Dimension) -> Option<&str> {
        match dimension {
            Dimension::Class9 => self.class_9.as_deref(),
            Dimension::Class10 => self.class_10.as_deref(),
            Dimension::Class11 => self.class_11.as_deref(),
            Dimension::Class12 => self.class_12.as_deref(),
            Dimension::Sat => self.sat.as_deref(),
            Dimension::Ap => self.ap.as_deref(),
            Dimension::CoCurricular => self.co_curricular.as_deref(),
            Dimension::ExtraCurricular => self.extra_curricular.as_deref(),
            Dimension::Internship => self.internship.as_deref(),
            Dimension::CommunityService => self.community.as_deref(),
            Dimension::Research => self.research.as_deref(),
            Dimension::Lor => self.lor.as_deref(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UniversityRow {
    #[serde(rename = "Country", default, deserialize_with = "empty_string_as_none")]
    country: Option<String>,
    #[serde(rename = "University", default, deserialize_with = "empty_string_as_none")]
    university: Option<String>,
    #[serde(rename = "QS Ranking", default, deserialize_with = "empty_string_as_none")]
    rank: Option<String>,
    #[serde(
        rename = "Required Profile Score",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    required: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
