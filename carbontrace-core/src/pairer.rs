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

//! Activity-quantity pairing.
//!
//! Pairing is positional within a clause: the first recognized activity takes
//! the first quantity, the second takes the second, and so on. Leftover
//! activities or quantities are dropped. Nothing crosses a clause boundary.

use crate::quantity::extract_quantities;
use crate::recognizer::PhraseRecognizer;
use crate::segmenter::segment;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A recognized activity with its quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedActivity {
    /// Canonical activity name
    pub activity: String,
    /// Magnitude with its unit discarded
    pub quantity: f64,
}

impl ParsedActivity {
    pub fn new(activity: impl Into<String>, quantity: f64) -> Self {
        Self {
            activity: activity.into(),
            quantity,
        }
    }
}

/// Zip one clause's activities and quantities in order
pub fn pair_clause(activities: Vec<String>, quantities: Vec<f64>) -> Vec<ParsedActivity> {
    activities
        .into_iter()
        .zip(quantities)
        .map(|(activity, quantity)| ParsedActivity { activity, quantity })
        .collect()
}

/// Parse a whole text into ordered activity-quantity pairs
pub fn parse_activities(recognizer: &PhraseRecognizer, text: &str) -> Vec<ParsedActivity> {
    let mut parsed = Vec::new();

    for clause in segment(text) {
        let activities = recognizer.recognize(clause);
        if activities.is_empty() {
            continue;
        }
        let quantities = extract_quantities(clause);

        if activities.len() != quantities.len() {
            debug!(
                clause,
                activities = activities.len(),
                quantities = quantities.len(),
                "unbalanced clause, extra items dropped"
            );
        }
        parsed.extend(pair_clause(activities, quantities));
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Lexicon;

    fn parse(text: &str) -> Vec<ParsedActivity> {
        parse_activities(&PhraseRecognizer::new(&Lexicon::builtin()), text)
    }

    #[test]
    fn test_drive_and_electricity() {
        assert_eq!(
            parse("I drove my car for 50 km and used electricity for 100 kWh"),
            vec![
                ParsedActivity::new("driving", 50.0),
                ParsedActivity::new("electricity usage", 100.0),
            ]
        );
    }

    #[test]
    fn test_bike_and_electricity() {
        assert_eq!(
            parse("I rode my bike for 15 kilometers and used electricity for 200 kWh"),
            vec![
                ParsedActivity::new("cycling", 15.0),
                ParsedActivity::new("electricity usage", 200.0),
            ]
        );
    }

    #[test]
    fn test_extra_quantity_dropped() {
        assert_eq!(parse("I drove 10 20"), vec![ParsedActivity::new("driving", 10.0)]);
    }

    #[test]
    fn test_extra_activity_dropped() {
        assert_eq!(
            parse("took the bus and train for 12 km"),
            vec![ParsedActivity::new("train travel", 12.0)]
        );
        assert_eq!(
            parse("took the bus, then a train for 12 km"),
            vec![ParsedActivity::new("bus travel", 12.0)]
        );
    }

    #[test]
    fn test_positional_not_proximity() {
        assert_eq!(
            parse("ran the heater 5 hours, shower 3 times"),
            vec![
                ParsedActivity::new("heating usage", 5.0),
                ParsedActivity::new("shower usage", 3.0),
            ]
        );
        // "10" sits next to "shower" but pairs with the first activity.
        assert_eq!(
            parse("the heater was off, the shower ran 10 minutes"),
            vec![ParsedActivity::new("heating usage", 10.0)]
        );
    }

    #[test]
    fn test_quantities_never_cross_clauses() {
        assert!(parse("I drove a lot and 40 km were covered").is_empty());
        assert!(parse("I drove far. It was 40 km").is_empty());
    }

    #[test]
    fn test_sentences_keep_order() {
        assert_eq!(
            parse("Took a flight of 800 km. Then went walking for 3 km!"),
            vec![
                ParsedActivity::new("air travel", 800.0),
                ParsedActivity::new("walking", 3.0),
            ]
        );
    }

    #[test]
    fn test_blank_text() {
        assert!(parse("").is_empty());
        assert!(parse("   \n ").is_empty());
    }
}
