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

//! Activity lexicon
//!
//! Maps surface phrases ("drove", "washing machine") to canonical activity
//! names ("driving", "washing machine usage"). Several phrases may share one
//! activity. Phrases are compared on their normalized form: lowercased word
//! tokens joined by a single space.

use crate::error::LexiconError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::error;

/// Built-in English phrase table, `(phrase, canonical activity)`.
pub const BUILTIN_LEXICON: &[(&str, &str)] = &[
    // Travel and transport
    ("flight", "air travel"),
    ("fly", "air travel"),
    ("electric car", "electric vehicle travel"),
    ("ev", "electric vehicle travel"),
    ("train", "train travel"),
    ("rail", "train travel"),
    ("metro", "metro travel"),
    ("drive", "driving"),
    ("drove", "driving"),
    ("car", "driving"),
    ("bus", "bus travel"),
    ("coach", "bus travel"),
    ("cycle", "cycling"),
    ("bicycle", "cycling"),
    ("bike", "cycling"),
    ("walk", "walking"),
    ("walking", "walking"),
    // Energy consumption
    ("electricity", "electricity usage"),
    ("power consumption", "electricity usage"),
    ("energy consumption", "electricity usage"),
    ("ac", "air conditioner"),
    ("air conditioner", "air conditioner"),
    ("heater", "heating usage"),
    ("heating", "heating usage"),
    ("fan", "fan usage"),
    ("cooling", "fan usage"),
    // Cooking and appliances
    ("gas stove", "gas stove usage"),
    ("oven", "oven usage"),
    ("microwave", "microwave usage"),
    ("toaster", "toaster usage"),
    ("cooking", "cooking gas usage"),
    ("stove", "cooking gas usage"),
    // Water usage
    ("water", "water usage"),
    ("shower", "shower usage"),
    ("bath", "bath usage"),
    ("washing machine", "washing machine usage"),
    ("laundry", "laundry usage"),
    ("wash", "laundry usage"),
    // Waste management
    ("plastic", "plastic waste management"),
    ("recycling", "recycling"),
    ("trash", "trash disposal"),
    ("waste", "trash disposal"),
    ("compost", "composting"),
    ("organic waste", "organic waste management"),
    // Miscellaneous
    ("light", "lighting usage"),
    ("bulb", "lighting usage"),
    ("charging", "device charging"),
    ("charge", "device charging"),
    ("phone", "device charging"),
    ("laptop", "device charging"),
    ("desktop", "computer usage"),
    ("computer", "computer usage"),
    ("printer", "printer usage"),
];

/// A single phrase -> activity mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    /// Surface phrase as written in the table
    pub phrase: String,
    /// Canonical activity the phrase normalizes to
    pub activity: String,
}

impl LexiconEntry {
    pub fn new(phrase: impl Into<String>, activity: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
            activity: activity.into(),
        }
    }
}

/// Immutable phrase table, indexed by normalized phrase
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: Vec<LexiconEntry>,
    index: HashMap<String, usize>,
}

impl Lexicon {
    /// The built-in English table
    pub fn builtin() -> Self {
        Self::from_entries(
            BUILTIN_LEXICON
                .iter()
                .map(|(phrase, activity)| LexiconEntry::new(*phrase, *activity)),
        )
        .unwrap_or_else(|err| {
            error!(error = %err, "built-in lexicon is invalid, no phrases will match");
            Self::default()
        })
    }

    /// Build a lexicon, rejecting empty and duplicate phrases
    pub fn from_entries<I>(entries: I) -> Result<Self, LexiconError>
    where
        I: IntoIterator<Item = LexiconEntry>,
    {
        Self::default().with_entries(entries)
    }

    /// Extend this lexicon with more entries
    pub fn with_entries<I>(mut self, entries: I) -> Result<Self, LexiconError>
    where
        I: IntoIterator<Item = LexiconEntry>,
    {
        for entry in entries {
            self.insert(entry)?;
        }
        Ok(self)
    }

    fn insert(&mut self, entry: LexiconEntry) -> Result<(), LexiconError> {
        let key = normalize_phrase(&entry.phrase);
        if key.is_empty() {
            return Err(LexiconError::EmptyPhrase {
                activity: entry.activity,
            });
        }
        let activity = entry.activity.trim();
        if activity.is_empty() {
            return Err(LexiconError::EmptyActivity {
                phrase: entry.phrase,
            });
        }
        if let Some(&existing) = self.index.get(&key) {
            return Err(LexiconError::DuplicatePhrase {
                phrase: entry.phrase,
                existing: self.entries[existing].activity.clone(),
            });
        }

        self.index.insert(key, self.entries.len());
        self.entries.push(LexiconEntry {
            phrase: entry.phrase.trim().to_string(),
            activity: activity.to_string(),
        });
        Ok(())
    }

    /// Case-insensitive exact phrase lookup
    pub fn lookup(&self, phrase: &str) -> Option<&str> {
        self.index
            .get(&normalize_phrase(phrase))
            .map(|&i| self.entries[i].activity.as_str())
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct canonical activities, first-seen order
    pub fn activities(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for entry in &self.entries {
            if !seen.contains(&entry.activity.as_str()) {
                seen.push(entry.activity.as_str());
            }
        }
        seen
    }
}

/// A word token with its byte span in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

/// Split text into maximal runs of alphanumeric characters
pub(crate) fn word_tokens(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = None;

    for (i, ch) in text.char_indices() {
        match (ch.is_alphanumeric(), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                tokens.push(Token {
                    text: &text[s..i],
                    start: s,
                    end: i,
                });
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        tokens.push(Token {
            text: &text[s..],
            start: s,
            end: text.len(),
        });
    }

    tokens
}

/// Lowercased word tokens joined by single spaces
pub(crate) fn normalize_phrase(phrase: &str) -> String {
    word_tokens(phrase)
        .iter()
        .map(|t| t.text.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}
