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

//! Carbontrace Core
//!
//! Turns free-form descriptions of everyday activities into activity-quantity
//! pairs and prices them against an emission-factor table:
//!
//! ```text
//! text ──► segmenter ──► clauses ──┬─► recognizer ──┐
//!                                  └─► quantities ──┴─► pairer ──► ParsedActivity[]
//!                                                                        │
//!                          FootprintReport ◄── emissions ◄── factor table ┘
//! ```
//!
//! A [`FootprintContext`] bundles the lexicon, the compiled recognizer and the
//! factor table. Build it once at startup and share it read-only.
//!
//! # Example
//!
//! ```rust
//! use carbontrace_core::{EmissionFactorRow, EmissionFactorTable, FootprintContext, Lexicon};
//!
//! let factors = EmissionFactorTable::from_rows([
//!     EmissionFactorRow::new("driving", 0.192),
//!     EmissionFactorRow::new("electricity usage", 0.475),
//! ]);
//! let ctx = FootprintContext::new(Lexicon::builtin(), factors);
//!
//! let report = ctx
//!     .assess("I drove my car for 50 km and used electricity for 100 kWh")
//!     .unwrap();
//! assert_eq!(report.parsed.len(), 2);
//! assert_eq!(report.parsed[0].activity, "driving");
//! ```

pub mod config;
pub mod context;
pub mod emissions;
pub mod error;
pub mod factors;
pub mod lexicon;
pub mod pairer;
pub mod quantity;
pub mod recognizer;
pub mod report;
pub mod segmenter;

// Re-exports
pub use config::{FootprintConfig, LexiconConfig, ReportConfig};
pub use context::FootprintContext;
pub use emissions::{calculate_emissions, EmissionResult, FactorLookup};
pub use error::{ConfigError, FactorTableError, FootprintError, FootprintResult, LexiconError};
pub use factors::{EmissionFactorRow, EmissionFactorTable};
pub use lexicon::{Lexicon, LexiconEntry, BUILTIN_LEXICON};
pub use pairer::{pair_clause, parse_activities, ParsedActivity};
pub use quantity::extract_quantities;
pub use recognizer::{PhraseMatch, PhraseRecognizer};
pub use report::{ChartPoint, FootprintReport};
pub use segmenter::{clauses, segment, sentences, Sentences};
