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

//! Rule-based sentence and clause segmentation.
//!
//! A sentence ends at a run of `.`, `!` or `?` followed by whitespace or end
//! of text, or at a line break. Sentences are then split into clauses on the
//! conjunction "and" surrounded by whitespace.

use once_cell::sync::Lazy;
use regex::Regex;

static CLAUSE_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+and\s+").expect("clause pattern is valid"));

/// Lazy iterator over the sentences of a text
#[derive(Debug, Clone)]
pub struct Sentences<'a> {
    text: &'a str,
    pos: usize,
}

/// Iterate the trimmed, non-empty sentences of `text`
pub fn sentences(text: &str) -> Sentences<'_> {
    Sentences { text, pos: 0 }
}

impl<'a> Iterator for Sentences<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while self.pos < self.text.len() {
            let rest = &self.text[self.pos..];
            let end = sentence_end(rest);
            self.pos += end;

            let sentence = rest[..end].trim();
            if !sentence.is_empty() {
                return Some(sentence);
            }
        }
        None
    }
}

/// Byte length of the first sentence in `rest` (always > 0 for non-empty input)
fn sentence_end(rest: &str) -> usize {
    let mut chars = rest.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        if ch == '\n' {
            return i + ch.len_utf8();
        }
        if is_terminator(ch) {
            let mut end = i + ch.len_utf8();
            while let Some(&(j, next)) = chars.peek() {
                if !is_terminator(next) {
                    break;
                }
                end = j + next.len_utf8();
                chars.next();
            }
            match chars.peek() {
                None => return end,
                Some(&(_, next)) if next.is_whitespace() => return end,
                _ => {}
            }
        }
    }

    rest.len()
}

fn is_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

/// Split one sentence into coordinated clauses
pub fn clauses(sentence: &str) -> impl Iterator<Item = &str> + '_ {
    CLAUSE_SPLIT
        .split(sentence)
        .map(str::trim)
        .filter(|clause| !clause.is_empty())
}

/// Every clause of every sentence, in text order
pub fn segment(text: &str) -> impl Iterator<Item = &str> + '_ {
    sentences(text).flat_map(clauses)
}
