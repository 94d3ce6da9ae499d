// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Carbontrace error types

use std::path::PathBuf;
use thiserror::Error;

/// Result type for assessment operations
pub type FootprintResult<T> = Result<T, FootprintError>;

/// Top-level error for the assessment pipeline.
///
/// Only [`FootprintError::InputEmpty`] can occur per request. Every other
/// variant is raised while building a [`crate::FootprintContext`] and is
/// fatal at startup.
#[derive(Debug, Error)]
pub enum FootprintError {
    /// Submitted text was blank or whitespace-only
    #[error("Please enter some activities.")]
    InputEmpty,

    /// Lexicon could not be built
    #[error("Lexicon error: {0}")]
    Lexicon(#[from] LexiconError),

    /// Reference data could not be loaded
    #[error("Reference data error: {0}")]
    FactorTable(#[from] FactorTableError),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Report could not be rendered
    #[error("Report error: {0}")]
    Report(String),
}

impl From<serde_json::Error> for FootprintError {
    fn from(e: serde_json::Error) -> Self {
        FootprintError::Report(e.to_string())
    }
}

impl From<csv::Error> for FootprintError {
    fn from(e: csv::Error) -> Self {
        FootprintError::Report(e.to_string())
    }
}

/// Errors raised while building a lexicon
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LexiconError {
    /// A phrase contained no word characters
    #[error("phrase for activity '{activity}' is empty")]
    EmptyPhrase { activity: String },

    /// A phrase was registered twice
    #[error("duplicate phrase '{phrase}' (already mapped to '{existing}')")]
    DuplicatePhrase { phrase: String, existing: String },

    /// A canonical activity name was blank
    #[error("phrase '{phrase}' maps to an empty activity")]
    EmptyActivity { phrase: String },
}

/// Errors raised while loading the emission-factor reference table
#[derive(Debug, Error)]
pub enum FactorTableError {
    /// The file could not be opened
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV stream was malformed
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A required column header was absent
    #[error("missing required column '{0}'")]
    MissingColumn(String),

    /// A factor cell could not be used
    #[error("row {row}: invalid emission factor '{value}' for '{activity}'")]
    InvalidFactor {
        row: usize,
        activity: String,
        value: String,
    },

    /// A row had a blank activity name
    #[error("row {row}: activity name is empty")]
    EmptyActivity { row: usize },

    /// The table contained no data rows
    #[error("reference table has no rows")]
    Empty,
}

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML was invalid
    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// No emission-factor file was configured
    #[error("no emission factor file configured (set factors_path or pass --factors)")]
    MissingFactorsPath,
}
