use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::{
    consts::consts::{EMAIL_COLUMN, NAME_COLUMN},
    model::student::StudentRecord,
};

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Cannot open roster file {0}: {1}")]
    UnableToOpen(PathBuf, std::io::Error),

    #[error("Roster is missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("Malformed roster: {0}")]
    Malformed(#[from] csv::Error),
}

/// Registered students, loaded once at startup and never mutated afterwards.
///
/// Records keep the order of the source file, lookups return the first match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    records: Vec<StudentRecord>,
}

impl Roster {
    pub fn from_records(records: Vec<StudentRecord>) -> Self {
        Self { records }
    }

    /// Loads a CSV roster with a header row. `name` and `email` columns are required,
    /// `course` is optional and any other column is ignored.
    pub fn load(path: &Path) -> Result<Self, RosterError> {
        let file = File::open(path).map_err(|e| RosterError::UnableToOpen(path.to_owned(), e))?;

        let roster = Self::from_reader(file)?;

        log::info!(
            "Loaded {} student(s) from {}",
            roster.len(),
            path.display()
        );

        if roster.is_empty() {
            log::warn!("Roster {} has no students, every request will be rejected", path.display());
        }

        Ok(roster)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RosterError> {
        let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

        let headers = csv_reader.headers()?.clone();

        for required in [NAME_COLUMN, EMAIL_COLUMN] {
            if !headers.iter().any(|header| header == required) {
                return Err(RosterError::MissingColumn(required));
            }
        }

        let mut records = Vec::new();

        for (index, row) in csv_reader.deserialize::<StudentRecord>().enumerate() {
            let record = row?;

            // Blank identity cells can never be matched, keep them out of the roster
            if record.name.is_empty() || record.email.is_empty() {
                log::warn!(
                    "Skipping roster row {}: name and email must both be present",
                    index + 1
                );
                continue;
            }

            records.push(record);
        }

        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StudentRecord> {
        self.records.iter()
    }
}
