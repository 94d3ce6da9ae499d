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

//! Phrase recognition over a clause.
//!
//! Phrases are compiled into lowercased token sequences and bucketed by their
//! first token. Each bucket is ordered longest-first, so at any token
//! position the most specific phrase wins and consumes its tokens:
//! "electric car" is recognized as one phrase, never as "car".

use crate::lexicon::{normalize_phrase, word_tokens, Lexicon};
use std::collections::HashMap;
use tracing::trace;

#[derive(Debug, Clone)]
struct CompiledPhrase {
    tokens: Vec<String>,
    phrase: String,
    activity: String,
}

/// A single non-overlapping phrase occurrence
#[derive(Debug, Clone, PartialEq)]
pub struct PhraseMatch {
    /// Lexicon phrase that matched
    pub phrase: String,
    /// Canonical activity
    pub activity: String,
    /// Index of the first matched token
    pub token_index: usize,
    /// Byte offset of the match in the clause
    pub start: usize,
    /// Byte offset one past the match
    pub end: usize,
}

/// Longest-first, token-aligned phrase matcher built from a [`Lexicon`]
#[derive(Debug, Clone)]
pub struct PhraseRecognizer {
    phrases: Vec<CompiledPhrase>,
    by_first_token: HashMap<String, Vec<usize>>,
}

impl PhraseRecognizer {
    pub fn new(lexicon: &Lexicon) -> Self {
        let mut phrases: Vec<CompiledPhrase> = lexicon
            .entries()
            .iter()
            .map(|entry| CompiledPhrase {
                tokens: normalize_phrase(&entry.phrase)
                    .split(' ')
                    .map(str::to_string)
                    .collect(),
                phrase: entry.phrase.clone(),
                activity: entry.activity.clone(),
            })
            .collect();

        phrases.sort_by(|a, b| {
            b.tokens
                .len()
                .cmp(&a.tokens.len())
                .then_with(|| a.tokens.cmp(&b.tokens))
        });

        let mut by_first_token: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, phrase) in phrases.iter().enumerate() {
            by_first_token
                .entry(phrase.tokens[0].clone())
                .or_default()
                .push(i);
        }

        Self {
            phrases,
            by_first_token,
        }
    }

    /// Number of compiled phrases
    pub fn phrase_count(&self) -> usize {
        self.phrases.len()
    }

    /// Phrases in match-priority order (longest first)
    pub fn priority_order(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(|p| p.phrase.as_str())
    }

    /// All non-overlapping phrase occurrences, left to right
    pub fn matches(&self, clause: &str) -> Vec<PhraseMatch> {
        let tokens = word_tokens(clause);
        let lowered: Vec<String> = tokens.iter().map(|t| t.text.to_lowercase()).collect();

        let mut found = Vec::new();
        let mut i = 0;
        while i < lowered.len() {
            let hit = self.by_first_token.get(&lowered[i]).and_then(|candidates| {
                candidates
                    .iter()
                    .map(|&c| &self.phrases[c])
                    .find(|p| lowered[i..].starts_with(&p.tokens))
            });

            match hit {
                Some(phrase) => {
                    let last = i + phrase.tokens.len() - 1;
                    found.push(PhraseMatch {
                        phrase: phrase.phrase.clone(),
                        activity: phrase.activity.clone(),
                        token_index: i,
                        start: tokens[i].start,
                        end: tokens[last].end,
                    });
                    i = last + 1;
                }
                None => i += 1,
            }
        }

        trace!(clause, matches = found.len(), "phrase scan");
        found
    }

    /// Canonical activities in order of first appearance, deduplicated
    pub fn recognize(&self, clause: &str) -> Vec<String> {
        let mut activities: Vec<String> = Vec::new();
        for m in self.matches(clause) {
            if !activities.contains(&m.activity) {
                activities.push(m.activity);
            }
        }
        activities
    }
}
