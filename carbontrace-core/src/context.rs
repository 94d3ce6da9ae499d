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

//! Process-wide assessment context.
//!
//! Built once at startup from a lexicon and a factor table, then shared
//! read-only by every request. Holds no interior mutability.

use crate::config::FootprintConfig;
use crate::emissions::{calculate_emissions, EmissionResult};
use crate::error::{ConfigError, FootprintError, FootprintResult};
use crate::factors::EmissionFactorTable;
use crate::lexicon::Lexicon;
use crate::pairer::{parse_activities, ParsedActivity};
use crate::recognizer::PhraseRecognizer;
use crate::report::FootprintReport;
use std::path::Path;
use tracing::{debug, info};

/// Immutable lexicon, recognizer and reference table
#[derive(Debug, Clone)]
pub struct FootprintContext {
    lexicon: Lexicon,
    recognizer: PhraseRecognizer,
    factors: EmissionFactorTable,
}

impl FootprintContext {
    pub fn new(lexicon: Lexicon, factors: EmissionFactorTable) -> Self {
        let recognizer = PhraseRecognizer::new(&lexicon);
        info!(
            phrases = recognizer.phrase_count(),
            factors = factors.len(),
            "assessment context ready"
        );
        Self {
            lexicon,
            recognizer,
            factors,
        }
    }

    /// Build from configuration, loading the factor table from `factors_path`.
    ///
    /// `factors_override` wins over the configured path. Fails when no path is
    /// available or the table cannot be loaded.
    pub fn from_config(
        config: &FootprintConfig,
        factors_override: Option<&Path>,
    ) -> FootprintResult<Self> {
        let lexicon = config.lexicon.build()?;
        let path = factors_override
            .or(config.factors_path.as_deref())
            .ok_or(ConfigError::MissingFactorsPath)?;
        let factors = EmissionFactorTable::from_csv_path(path)?;
        Ok(Self::new(lexicon, factors))
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn recognizer(&self) -> &PhraseRecognizer {
        &self.recognizer
    }

    pub fn factors(&self) -> &EmissionFactorTable {
        &self.factors
    }

    /// Ordered activity-quantity pairs found in `text`
    pub fn parse_activities(&self, text: &str) -> Vec<ParsedActivity> {
        parse_activities(&self.recognizer, text)
    }

    /// Price `parsed` against this context's factor table
    pub fn calculate_emissions(&self, parsed: &[ParsedActivity]) -> (Vec<EmissionResult>, f64) {
        calculate_emissions(parsed, &self.factors)
    }

    /// Validate, parse and price one submission
    pub fn assess(&self, text: &str) -> FootprintResult<FootprintReport> {
        if text.trim().is_empty() {
            return Err(FootprintError::InputEmpty);
        }

        let parsed = self.parse_activities(text);
        let (results, total) = self.calculate_emissions(&parsed);
        debug!(pairs = parsed.len(), total, "assessment complete");

        Ok(FootprintReport::new(parsed, results, total))
    }
}
