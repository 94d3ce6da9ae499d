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

//! Emission calculation

use crate::factors::EmissionFactorTable;
use crate::pairer::ParsedActivity;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Source of emission factors keyed by canonical activity
pub trait FactorLookup {
    /// kg CO2 per unit, or `None` when the activity is unknown
    fn factor_for(&self, activity: &str) -> Option<f64>;
}

impl FactorLookup for EmissionFactorTable {
    fn factor_for(&self, activity: &str) -> Option<f64> {
        EmissionFactorTable::factor_for(self, activity)
    }
}

/// Emissions attributed to one parsed activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionResult {
    pub activity: String,
    pub quantity: f64,
    /// kg CO2
    pub emissions: f64,
}

/// Price every parsed activity and sum the total.
///
/// Unknown activities get a factor of zero and stay in the output. Results
/// keep the input order.
pub fn calculate_emissions<F>(parsed: &[ParsedActivity], factors: &F) -> (Vec<EmissionResult>, f64)
where
    F: FactorLookup + ?Sized,
{
    let mut results = Vec::with_capacity(parsed.len());
    let mut total = 0.0;

    for entry in parsed {
        let factor = factors.factor_for(&entry.activity).unwrap_or_else(|| {
            debug!(activity = %entry.activity, "no emission factor, using 0");
            0.0
        });
        let emissions = entry.quantity * factor;
        total += emissions;

        results.push(EmissionResult {
            activity: entry.activity.clone(),
            quantity: entry.quantity,
            emissions,
        });
    }

    (results, total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factors::EmissionFactorRow;

    fn table() -> EmissionFactorTable {
        EmissionFactorTable::from_rows([
            EmissionFactorRow::new("Driving", 0.2),
            EmissionFactorRow::new("electricity usage", 0.5),
        ])
    }

    #[test]
    fn test_multiplies_and_sums() {
        let parsed = vec![
            ParsedActivity::new("driving", 50.0),
            ParsedActivity::new("electricity usage", 100.0),
        ];
        let (results, total) = calculate_emissions(&parsed, &table());
        assert_eq!(results.len(), 2);
        assert!((results[0].emissions - 10.0).abs() < 1e-9);
        assert!((results[1].emissions - 50.0).abs() < 1e-9);
        assert!((total - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_unmapped_activity_is_zero_and_kept() {
        let parsed = vec![
            ParsedActivity::new("teleporting", 3.0),
            ParsedActivity::new("driving", 1.0),
        ];
        let (results, total) = calculate_emissions(&parsed, &table());
        assert_eq!(
            results[0],
            EmissionResult {
                activity: "teleporting".to_string(),
                quantity: 3.0,
                emissions: 0.0,
            }
        );
        assert!((total - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_lookup_ignores_case() {
        let upper = calculate_emissions(&[ParsedActivity::new("Driving", 10.0)], &table());
        let lower = calculate_emissions(&[ParsedActivity::new("driving", 10.0)], &table());
        assert!((upper.0[0].emissions - 2.0).abs() < 1e-9);
        assert_eq!(upper.0[0].emissions, lower.0[0].emissions);
        assert_eq!(upper.1, lower.1);
    }

    #[test]
    fn test_empty_input() {
        let (results, total) = calculate_emissions(&[], &table());
        assert!(results.is_empty());
        assert_eq!(total, 0.0);
    }

    #[test]
    fn test_mixed_case_row_prices_any_casing() {
        let table = EmissionFactorTable::from_rows([EmissionFactorRow::new("Bus Travel", 0.1)]);
        let parsed = vec![
            ParsedActivity::new("Bus Travel", 10.0),
            ParsedActivity::new("bus travel", 10.0),
            ParsedActivity::new("BUS TRAVEL", 10.0),
        ];
        let (results, total) = calculate_emissions(&parsed, &table);
        for result in &results {
            assert!((result.emissions - 1.0).abs() < 1e-9, "{result:?}");
        }
        assert!((total - 3.0).abs() < 1e-9);
    }
}
