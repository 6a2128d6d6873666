//! # Search Filter
//!
//! Typo-tolerant filtering of the board. A list matches when the query is
//! close enough to its title, or to the title or description of any of its
//! cards. Hits are whole lists, ranked best first.
//!
//! ## Scoring
//!
//! Every field gets a score between 0.0 (perfect) and 1.0 (unrelated):
//!
//! - 0.0 when the query occurs in the field, ignoring case
//! - otherwise `1 - jaro_winkler` against the closest run of words in the
//!   field that has as many words as the query
//!
//! A field matches when its score is at or below the threshold. A list's
//! score is that of its best matching field. Ties keep board order.

use crate::model::{CardId, List};
use strsim::jaro_winkler;

pub const DEFAULT_THRESHOLD: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    ListTitle,
    CardTitle(CardId),
    CardDescription(CardId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldMatch {
    pub field: SearchField,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub list: List,
    /// Position of the list on the board.
    pub ref_index: usize,
    pub score: f64,
    pub matches: Vec<FieldMatch>,
}

#[derive(Debug, Clone)]
pub struct SearchFilter {
    query: String,
    threshold: f64,
    match_all_when_empty: bool,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self {
            query: String::new(),
            threshold: DEFAULT_THRESHOLD,
            match_all_when_empty: false,
        }
    }
}

impl SearchFilter {
    pub fn new(threshold: f64, match_all_when_empty: bool) -> Self {
        Self {
            query: String::new(),
            threshold: threshold.clamp(0.0, 1.0),
            match_all_when_empty,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: f64) {
        self.threshold = threshold.clamp(0.0, 1.0);
    }

    /// Filter and rank `lists` against the current query.
    pub fn search(&self, lists: &[List]) -> Vec<SearchHit> {
        let query = self.query.trim().to_lowercase();
        if query.is_empty() {
            if !self.match_all_when_empty {
                return Vec::new();
            }
            return lists
                .iter()
                .enumerate()
                .map(|(ref_index, list)| SearchHit {
                    list: list.clone(),
                    ref_index,
                    score: 0.0,
                    matches: Vec::new(),
                })
                .collect();
        }

        let mut hits: Vec<SearchHit> = lists
            .iter()
            .enumerate()
            .filter_map(|(ref_index, list)| self.match_list(ref_index, list, &query))
            .collect();

        // Stable sort keeps board order for equal scores.
        hits.sort_by(|a, b| a.score.total_cmp(&b.score));
        hits
    }

    fn match_list(&self, ref_index: usize, list: &List, query: &str) -> Option<SearchHit> {
        let mut fields = vec![(SearchField::ListTitle, list.title.as_str())];
        for card in &list.cards {
            fields.push((SearchField::CardTitle(card.id), card.title.as_str()));
            fields.push((SearchField::CardDescription(card.id), card.description.as_str()));
        }

        let matches: Vec<FieldMatch> = fields
            .into_iter()
            .map(|(field, text)| FieldMatch {
                field,
                score: field_score(text, query),
            })
            .filter(|m| m.score <= self.threshold)
            .collect();

        let score = matches.iter().map(|m| m.score).reduce(f64::min)?;
        Some(SearchHit {
            list: list.clone(),
            ref_index,
            score,
            matches,
        })
    }
}

/// Distance between a field and an already-lowercased query.
fn field_score(text: &str, query: &str) -> f64 {
    let text = text.to_lowercase();
    if text.is_empty() {
        return 1.0;
    }
    if text.contains(query) {
        return 0.0;
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    let span = query.split_whitespace().count().max(1);
    if words.len() <= span {
        return 1.0 - jaro_winkler(&text, query);
    }

    words
        .windows(span)
        .map(|window| 1.0 - jaro_winkler(&window.join(" "), query))
        .fold(1.0, f64::min)
}
