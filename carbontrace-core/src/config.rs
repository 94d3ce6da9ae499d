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

//! Configuration for carbontrace
//!
//! Loaded from TOML. Every field has a default, so an empty file is valid:
//!
//! ```toml
//! factors_path = "data/emission_factors.csv"
//!
//! [lexicon]
//! include_builtin = true
//!
//! [[lexicon.extra]]
//! phrase = "scooter"
//! activity = "scooter travel"
//!
//! [report]
//! precision = 2
//! ```

use crate::error::{ConfigError, LexiconError};
use crate::lexicon::{Lexicon, LexiconEntry};
use crate::report::DEFAULT_PRECISION;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FootprintConfig {
    /// CSV file with emission factors
    pub factors_path: Option<PathBuf>,

    /// Phrase table settings
    pub lexicon: LexiconConfig,

    /// Output settings
    pub report: ReportConfig,
}

/// Phrase table settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    /// Start from the built-in English table
    pub include_builtin: bool,

    /// Additional phrases, appended after the built-in table
    pub extra: Vec<LexiconEntry>,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            include_builtin: true,
            extra: Vec::new(),
        }
    }
}

impl LexiconConfig {
    /// Build the lexicon these settings describe
    pub fn build(&self) -> Result<Lexicon, LexiconError> {
        let base = if self.include_builtin {
            Lexicon::builtin()
        } else {
            Lexicon::default()
        };
        base.with_entries(self.extra.iter().cloned())
    }
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Decimals in human-readable totals
    pub precision: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}

impl FootprintConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load a TOML file. Relative `factors_path` values resolve against the
    /// file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&raw)?;

        if let (Some(factors), Some(dir)) = (&config.factors_path, path.parent()) {
            if factors.is_relative() {
                config.factors_path = Some(dir.join(factors));
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = FootprintConfig::from_toml_str("").unwrap();
        assert_eq!(config, FootprintConfig::default());
        assert!(config.lexicon.include_builtin);
        assert_eq!(config.report.precision, 2);
        assert!(config.factors_path.is_none());
    }

    #[test]
    fn test_full_config() {
        let config = FootprintConfig::from_toml_str(
            r#"
            factors_path = "/srv/factors.csv"

            [lexicon]
            include_builtin = false

            [[lexicon.extra]]
            phrase = "scooter"
            activity = "scooter travel"

            [report]
            precision = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.factors_path, Some(PathBuf::from("/srv/factors.csv")));
        assert_eq!(config.report.precision, 3);

        let lexicon = config.lexicon.build().unwrap();
        assert_eq!(lexicon.len(), 1);
        assert_eq!(lexicon.lookup("Scooter"), Some("scooter travel"));
    }

    #[test]
    fn test_extra_phrases_extend_builtin() {
        let config = LexiconConfig {
            include_builtin: true,
            extra: vec![LexiconEntry::new("tram", "metro travel")],
        };
        let lexicon = config.build().unwrap();
        assert_eq!(lexicon.lookup("tram"), Some("metro travel"));
        assert_eq!(lexicon.lookup("drove"), Some("driving"));
    }

    #[test]
    fn test_extra_phrase_collision_is_error() {
        let config = LexiconConfig {
            include_builtin: true,
            extra: vec![LexiconEntry::new("bus", "minibus travel")],
        };
        assert!(matches!(
            config.build(),
            Err(LexiconError::DuplicatePhrase { .. })
        ));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            FootprintConfig::from_toml_str("factors_path = ["),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_resolves_relative_factors_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("carbontrace.toml");
        std::fs::write(&path, "factors_path = \"factors.csv\"\n").unwrap();

        let config = FootprintConfig::load(&path).unwrap();
        assert_eq!(config.factors_path, Some(dir.path().join("factors.csv")));
    }
}
