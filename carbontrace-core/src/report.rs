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

//! Report shaping for display and export.
//!
//! No business logic lives here: the report only rearranges parsed pairs and
//! emission results into JSON, CSV, a display map and chart points.

use crate::emissions::{calculate_emissions, EmissionResult, FactorLookup};
use crate::error::{FootprintError, FootprintResult};
use crate::pairer::ParsedActivity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;

/// CSV header for exported results
pub const CSV_HEADER: [&str; 3] = ["activity", "quantity", "emissions"];

/// Default number of decimals in human-readable output
pub const DEFAULT_PRECISION: usize = 2;

/// Everything one assessment produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootprintReport {
    pub parsed: Vec<ParsedActivity>,
    pub results: Vec<EmissionResult>,
    /// kg CO2
    pub total_emissions: f64,
}

/// One bar of an activity-vs-emissions chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub activity: String,
    pub emissions: f64,
}

impl FootprintReport {
    pub fn new(
        parsed: Vec<ParsedActivity>,
        results: Vec<EmissionResult>,
        total_emissions: f64,
    ) -> Self {
        Self {
            parsed,
            results,
            total_emissions,
        }
    }

    /// Price `parsed` against `factors` and wrap the outcome
    pub fn from_parsed<F>(parsed: Vec<ParsedActivity>, factors: &F) -> Self
    where
        F: FactorLookup + ?Sized,
    {
        let (results, total) = calculate_emissions(&parsed, factors);
        Self::new(parsed, results, total)
    }

    /// True when nothing was recognized
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn to_json_pretty(&self) -> FootprintResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write `activity,quantity,emissions` rows. The header is always written.
    pub fn write_csv<W: Write>(&self, writer: W) -> FootprintResult<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        csv_writer.write_record(CSV_HEADER)?;
        for result in &self.results {
            csv_writer.serialize(result)?;
        }
        csv_writer
            .flush()
            .map_err(|e| FootprintError::Report(e.to_string()))
    }

    pub fn to_csv_string(&self) -> FootprintResult<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        String::from_utf8(buf).map_err(|e| FootprintError::Report(e.to_string()))
    }

    /// Emissions per activity, repeated activities summed
    pub fn display_map(&self) -> BTreeMap<String, f64> {
        let mut map = BTreeMap::new();
        for result in &self.results {
            *map.entry(result.activity.clone()).or_insert(0.0) += result.emissions;
        }
        map
    }

    /// Bars in result order
    pub fn chart_series(&self) -> Vec<ChartPoint> {
        self.results
            .iter()
            .map(|r| ChartPoint {
                activity: r.activity.clone(),
                emissions: r.emissions,
            })
            .collect()
    }

    pub fn summary_line(&self, precision: usize) -> String {
        format!(
            "Your total emissions: {:.*} kg CO2",
            precision, self.total_emissions
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> FootprintReport {
        FootprintReport::new(
            vec![
                ParsedActivity::new("driving", 50.0),
                ParsedActivity::new("cycling", 15.0),
                ParsedActivity::new("driving", 10.0),
            ],
            vec![
                EmissionResult {
                    activity: "driving".to_string(),
                    quantity: 50.0,
                    emissions: 10.0,
                },
                EmissionResult {
                    activity: "cycling".to_string(),
                    quantity: 15.0,
                    emissions: 0.0,
                },
                EmissionResult {
                    activity: "driving".to_string(),
                    quantity: 10.0,
                    emissions: 2.0,
                },
            ],
            12.0,
        )
    }

    #[test]
    fn test_csv_export() {
        let csv = report().to_csv_string().unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "activity,quantity,emissions");
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("driving,50"));
        assert!(lines[2].starts_with("cycling,15"));
    }

    #[test]
    fn test_csv_header_for_empty_report() {
        let empty = FootprintReport::new(Vec::new(), Vec::new(), 0.0);
        assert_eq!(empty.to_csv_string().unwrap(), "activity,quantity,emissions\n");
        assert!(empty.is_empty());
    }

    #[test]
    fn test_json_shape() {
        let json: serde_json::Value =
            serde_json::from_str(&report().to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["parsed"][0]["activity"], "driving");
        assert_eq!(json["results"][2]["emissions"], 2.0);
        assert_eq!(json["total_emissions"], 12.0);
    }

    #[test]
    fn test_display_map_sums_repeats() {
        let map = report().display_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map["driving"], 12.0);
        assert_eq!(map["cycling"], 0.0);
    }

    #[test]
    fn test_chart_series_keeps_order() {
        let series = report().chart_series();
        let names: Vec<_> = series.iter().map(|p| p.activity.as_str()).collect();
        assert_eq!(names, vec!["driving", "cycling", "driving"]);
    }

    #[test]
    fn test_summary_line() {
        assert_eq!(
            report().summary_line(DEFAULT_PRECISION),
            "Your total emissions: 12.00 kg CO2"
        );
        assert_eq!(report().summary_line(0), "Your total emissions: 12 kg CO2");
    }
}
