//! Passenger manifest import.
//!
//! A manifest is a CSV file with one passenger group per row:
//!
//! ```text
//! type,adults,boys,girls,gender
//! family,2,1,2,
//! couple,2,,,
//! men,4,,,male
//! ```

mod parser;

use crate::allocation::{GroupValidationError, PassengerGroup};
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum ManifestImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidGroup {
        line: u64,
        source: GroupValidationError,
    },
}

impl std::fmt::Display for ManifestImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManifestImportError::Io(err) => write!(f, "failed to read passenger manifest: {}", err),
            ManifestImportError::Csv(err) => write!(f, "invalid passenger manifest CSV: {}", err),
            ManifestImportError::InvalidGroup { line, source } => {
                write!(f, "invalid passenger group on line {}: {}", line, source)
            }
        }
    }
}

impl std::error::Error for ManifestImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ManifestImportError::Io(err) => Some(err),
            ManifestImportError::Csv(err) => Some(err),
            ManifestImportError::InvalidGroup { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for ManifestImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ManifestImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct ManifestImporter;

impl ManifestImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<PassengerGroup>, ManifestImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Groups come back in file order, which is the order the allocator sees.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<PassengerGroup>, ManifestImportError> {
        parser::parse_records(reader)?
            .into_iter()
            .map(|record| {
                PassengerGroup::try_from(record.group).map_err(|source| {
                    ManifestImportError::InvalidGroup {
                        line: record.line,
                        source,
                    }
                })
            })
            .collect()
    }
}
