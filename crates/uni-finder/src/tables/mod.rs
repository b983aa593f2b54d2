//! CSV loaders for the reference weight table and the university threshold table.

mod parser;

use crate::finder::domain::{CountryId, CountryWeightRecord, UniversityRecord};
use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug)]
pub enum TableLoadError {
    Io { path: PathBuf, source: std::io::Error },
    Csv { table: TableKind, source: csv::Error },
    MissingColumn { table: TableKind, column: &'static str },
    EmptyWeights,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Weights,
    Universities,
}

impl TableKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Weights => "country weight table",
            Self::Universities => "university table",
        }
    }
}

impl std::fmt::Display for TableLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableLoadError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            TableLoadError::Csv { table, source } => {
                write!(f, "invalid {} CSV data: {}", table.label(), source)
            }
            TableLoadError::MissingColumn { table, column } => {
                write!(f, "{} is missing the `{}` column", table.label(), column)
            }
            TableLoadError::EmptyWeights => {
                write!(f, "country weight table contains no usable rows")
            }
        }
    }
}

impl std::error::Error for TableLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TableLoadError::Io { source, .. } => Some(source),
            TableLoadError::Csv { source, .. } => Some(source),
            TableLoadError::MissingColumn { .. } | TableLoadError::EmptyWeights => None,
        }
    }
}

/// Immutable snapshot of both tables for one or more evaluations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceTables {
    weights: Vec<CountryWeightRecord>,
    universities: Vec<UniversityRecord>,
}

impl ReferenceTables {
    /// Builds a snapshot from already-parsed records. Duplicate countries keep
    /// their first record.
    pub fn new(weights: Vec<CountryWeightRecord>, universities: Vec<UniversityRecord>) -> Self {
        Self {
            weights: dedupe_first_wins(weights),
            universities,
        }
    }

    pub fn from_paths<P, Q>(weights: P, universities: Q) -> Result<Self, TableLoadError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let weights_file = open(weights.as_ref())?;
        let universities_file = open(universities.as_ref())?;
        Self::from_readers(weights_file, universities_file)
    }

    pub fn from_readers<R, S>(weights: R, universities: S) -> Result<Self, TableLoadError>
    where
        R: Read,
        S: Read,
    {
        let weights = load_weights(weights)?;
        if weights.is_empty() {
            return Err(TableLoadError::EmptyWeights);
        }
        let universities = load_universities(universities)?;

        let tables = Self::new(weights, universities);
        info!(
            countries = tables.weights.len(),
            universities = tables.universities.len(),
            "reference tables loaded"
        );
        Ok(tables)
    }

    pub fn weights(&self) -> &[CountryWeightRecord] {
        &self.weights
    }

    pub fn universities(&self) -> &[UniversityRecord] {
        &self.universities
    }

    /// Reference countries in table order.
    pub fn countries(&self) -> impl Iterator<Item = &CountryId> {
        self.weights.iter().map(|record| &record.country)
    }
}

/// Parses the reference weight table. Every dimension needs a column; empty,
/// non-numeric or negative cells become 0.
pub fn load_weights<R: Read>(reader: R) -> Result<Vec<CountryWeightRecord>, TableLoadError> {
    parser::parse_weight_rows(reader).map_err(|error| row_error(TableKind::Weights, error))
}

/// Parses the university table. Non-numeric thresholds are kept as `None`.
pub fn load_universities<R: Read>(reader: R) -> Result<Vec<UniversityRecord>, TableLoadError> {
    parser::parse_university_rows(reader)
        .map_err(|error| row_error(TableKind::Universities, error))
}

fn row_error(table: TableKind, error: parser::RowError) -> TableLoadError {
    match error {
        parser::RowError::Csv(source) => TableLoadError::Csv { table, source },
        parser::RowError::MissingColumn(column) => TableLoadError::MissingColumn { table, column },
    }
}

fn open(path: &Path) -> Result<std::fs::File, TableLoadError> {
    std::fs::File::open(path).map_err(|source| TableLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn dedupe_first_wins(records: Vec<CountryWeightRecord>) -> Vec<CountryWeightRecord> {
    let mut seen: HashSet<CountryId> = HashSet::new();
    records
        .into_iter()
        .filter(|record| {
            if seen.insert(record.country.clone()) {
                true
            } else {
                warn!(country = %record.country, "duplicate country weights ignored");
                false
            }
        })
        .collect()
}
