//! Immutable frequency-weighted name corpora
//!
//! A [`Corpus`] is built once from raw `(name, weight)` pairs handed over by
//! an external data loader and never mutated afterwards. Duplicate names
//! (compared case-insensitively) have their weights summed at build time, so
//! each name appears exactly once with its total weight. Entries are kept
//! sorted by descending weight, which makes percentile tiers, top-K sets,
//! and most-common listings cheap slices.
//!
//! ## Examples
//!
//! ```rust
//! use moniker::corpus::{Corpus, NameRole};
//!
//! let corpus = Corpus::build(
//!     NameRole::First,
//!     [("JOHN", 50.0), ("ARIA", 1.0)],
//! ).unwrap();
//! assert_eq!(corpus.len(), 2);
//! assert_eq!(corpus.most_common(1)[0].name, "JOHN");
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;

use log::debug;

use crate::{MonikerError, MonikerResult};

/// Which slot of a full name a corpus feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameRole {
    First,
    Last,
    Nickname,
}

impl fmt::Display for NameRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NameRole::First => "first",
            NameRole::Last => "last",
            NameRole::Nickname => "nickname",
        };
        write!(f, "{s}")
    }
}

/// A single name with its frequency weight.
#[derive(Debug, Clone, PartialEq)]
pub struct NameEntry {
    pub name: String,
    pub weight: f64,
}

/// An immutable, weight-sorted name list for one role.
#[derive(Debug, Clone)]
pub struct Corpus {
    role: NameRole,
    entries: Vec<NameEntry>,
    total_weight: f64,
}

impl Corpus {
    /// Build a corpus from raw `(name, weight)` pairs.
    ///
    /// Duplicate names are merged case-insensitively, summing their weights;
    /// the display casing of the first occurrence wins. Zero-weight entries
    /// are kept (they still belong to tiers) but can never win a weighted
    /// draw. Negative or non-finite weights are rejected.
    pub fn build<I, S>(role: NameRole, raw: I) -> MonikerResult<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut merged: HashMap<String, usize> = HashMap::new();
        let mut entries: Vec<NameEntry> = vec![];
        for (name, weight) in raw {
            let name = name.into();
            if !weight.is_finite() || weight < 0.0 {
                return Err(MonikerError::InvalidCorpus(role, weight, name));
            }
            let key = name.to_lowercase();
            match merged.get(&key) {
                Some(&i) => entries[i].weight += weight,
                None => {
                    merged.insert(key, entries.len());
                    entries.push(NameEntry { name, weight });
                }
            }
        }
        entries.sort_by(|a, b| {
            b.weight
                .partial_cmp(&a.weight)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });
        let total_weight = entries.iter().map(|e| e.weight).sum();
        debug!(
            "built {role} corpus: {} unique names, total weight {total_weight}",
            entries.len()
        );
        Ok(Self {
            role,
            entries,
            total_weight,
        })
    }

    pub fn role(&self) -> NameRole {
        self.role
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by descending weight.
    pub fn entries(&self) -> &[NameEntry] {
        &self.entries
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// The `limit` most frequent entries.
    pub fn most_common(&self, limit: usize) -> &[NameEntry] {
        &self.entries[..limit.min(self.entries.len())]
    }

    /// The names of the `k` most frequent entries, for membership tests.
    pub fn top_names(&self, k: usize) -> HashSet<&str> {
        self.most_common(k).iter().map(|e| e.name.as_str()).collect()
    }
}
