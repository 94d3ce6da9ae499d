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

//! Emission-factor reference table
//!
//! Rows of `(activity, kg CO2 per unit)` loaded once at startup from CSV.
//! Lookups are exact and case-insensitive on the whole activity name; when the
//! source repeats an activity the first row wins.

use crate::error::FactorTableError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Header of the activity column
pub const ACTIVITY_COLUMN: &str = "Activity";

/// Accepted headers for the factor column
pub const FACTOR_COLUMNS: &[&str] = &[
    "CO2 Emission Factor (per unit)",
    "CO2 Emission Factor (kg CO2/unit)",
    "CO₂ Emission Factor (kg CO₂/unit)",
];

/// One reference row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionFactorRow {
    pub activity: String,
    /// kg CO2 per unit of activity
    pub factor: f64,
}

impl EmissionFactorRow {
    pub fn new(activity: impl Into<String>, factor: f64) -> Self {
        Self {
            activity: activity.into(),
            factor,
        }
    }
}

/// Read-only emission-factor table
#[derive(Debug, Clone, Default)]
pub struct EmissionFactorTable {
    rows: Vec<EmissionFactorRow>,
    index: HashMap<String, usize>,
}

impl EmissionFactorTable {
    /// Build a table from rows already in memory
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = EmissionFactorRow>,
    {
        let rows: Vec<EmissionFactorRow> = rows.into_iter().collect();
        let mut index = HashMap::with_capacity(rows.len());

        for (i, row) in rows.iter().enumerate() {
            let key = row.activity.to_lowercase();
            if index.contains_key(&key) {
                warn!(activity = %row.activity, row = i + 1, "duplicate activity, keeping first row");
                continue;
            }
            index.insert(key, i);
        }

        Self { rows, index }
    }

    /// Load a CSV file
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, FactorTableError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| FactorTableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(file)?;
        info!(path = %path.display(), rows = table.len(), "loaded emission factors");
        Ok(table)
    }

    /// Load CSV from any reader. Requires an `Activity` column and one of
    /// [`FACTOR_COLUMNS`]; other columns are ignored.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, FactorTableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let activity_col = find_column(&headers, &[ACTIVITY_COLUMN])
            .ok_or_else(|| FactorTableError::MissingColumn(ACTIVITY_COLUMN.to_string()))?;
        let factor_col = find_column(&headers, FACTOR_COLUMNS)
            .ok_or_else(|| FactorTableError::MissingColumn(FACTOR_COLUMNS[0].to_string()))?;

        let mut rows = Vec::new();
        for (i, record) in csv_reader.records().enumerate() {
            let record = record?;
            let row = i + 1;

            let activity = record.get(activity_col).unwrap_or_default();
            if activity.is_empty() {
                return Err(FactorTableError::EmptyActivity { row });
            }

            let raw = record.get(factor_col).unwrap_or_default();
            let factor = raw
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .ok_or_else(|| FactorTableError::InvalidFactor {
                    row,
                    activity: activity.to_string(),
                    value: raw.to_string(),
                })?;

            rows.push(EmissionFactorRow::new(activity, factor));
        }

        if rows.is_empty() {
            return Err(FactorTableError::Empty);
        }
        Ok(Self::from_rows(rows))
    }

    /// Factor of the first row whose activity equals `activity`, ignoring case
    pub fn factor_for(&self, activity: &str) -> Option<f64> {
        self.index
            .get(&activity.to_lowercase())
            .map(|&i| self.rows[i].factor)
    }

    /// Rows in source order, duplicates included
    pub fn rows(&self) -> &[EmissionFactorRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn find_column(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    headers.iter().position(|header| {
        names
            .iter()
            .any(|name| header.trim().eq_ignore_ascii_case(name))
    })
}
