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

//! Quantity extraction

use once_cell::sync::Lazy;
use regex::Regex;

static QUANTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[0-9]+(?:\.[0-9]+)?\b").expect("quantity pattern is valid"));

/// Decimal numbers in `clause`, in order of appearance. Units are ignored.
pub fn extract_quantities(clause: &str) -> Vec<f64> {
    QUANTITY
        .find_iter(clause)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_and_decimals() {
        assert_eq!(
            extract_quantities("drove 50 km, used 2.5 kWh and 0.75 m3"),
            vec![50.0, 2.5, 0.75]
        );
    }

    #[test]
    fn test_numbers_glued_to_words_are_skipped() {
        assert!(extract_quantities("drove 50km in car2go").is_empty());
        assert_eq!(extract_quantities("(12) items; 7!"), vec![12.0, 7.0]);
    }

    #[test]
    fn test_no_digits() {
        assert!(extract_quantities("I took the bus").is_empty());
    }

    #[test]
    fn test_trailing_period_is_not_decimal() {
        assert_eq!(extract_quantities("I walked 3."), vec![3.0]);
    }
}
