// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for parameter validation and intensity table lookups.

use std::path::PathBuf;

use crate::options::OptionGroup;

/// Result type alias for estimation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`].
///
/// Validation errors mean the caller supplied a bad parameter and should
/// re-prompt. Configuration errors mean the intensity table is incomplete
/// or could not be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Configuration,
}

/// Errors that can occur while validating input or resolving the table.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Gross floor area is not a finite positive number.
    #[error("gross floor area must be a positive number, got {0}")]
    InvalidFloorArea(f64),

    /// Gross floor area is so large that the energy overflows.
    #[error("gross floor area {0} is too large to estimate")]
    FloorAreaTooLarge(f64),

    /// Improvement percentage is not a number.
    #[error("improvement percentage must be a number, got {0}")]
    InvalidImprovement(f64),

    /// A selection is not part of its option list and the list has no default.
    #[error("'{value}' is not a {group} option")]
    UnknownOption { group: OptionGroup, value: String },

    /// Coordinates could not be parsed or are out of range.
    #[error("invalid coordinates: {0}")]
    InvalidCoordinates(String),

    /// The requested standard/era has no intensity profile.
    #[error("no intensity profile for standard '{0}'")]
    MissingStandard(String),

    /// A standard lacks the base intensity of a category.
    #[error("standard '{standard}' has no base intensity for '{category}'")]
    MissingIntensity { standard: String, category: String },

    /// The table document is structurally inconsistent.
    #[error("invalid intensity table: {0}")]
    InvalidTable(String),

    /// The table file could not be read.
    #[error("failed to read intensity table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The table document is not valid JSON for the expected schema.
    #[error("malformed intensity table: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns whether this is a validation or a configuration failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidFloorArea(_)
            | Error::FloorAreaTooLarge(_)
            | Error::InvalidImprovement(_)
            | Error::UnknownOption { .. }
            | Error::InvalidCoordinates(_) => ErrorKind::Validation,
            Error::MissingStandard(_)
            | Error::MissingIntensity { .. }
            | Error::InvalidTable(_)
            | Error::Io { .. }
            | Error::Json(_) => ErrorKind::Configuration,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_validation_errors() {
        assert!(Error::InvalidFloorArea(0.0).is_validation());
        assert!(Error::FloorAreaTooLarge(f64::MAX).is_validation());
        let unknown = Error::UnknownOption {
            group: OptionGroup::Wall,
            value: "300mm".to_string(),
        };
        assert_eq!(unknown.kind(), ErrorKind::Validation);
        assert_eq!(unknown.to_string(), "'300mm' is not a Wall option");
    }

    #[test]
    fn classifies_configuration_errors() {
        assert!(Error::MissingStandard("TEK10".to_string()).is_configuration());
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(Error::from(err).is_configuration());
    }
}
