//! Weighted draws over a corpus
//!
//! Draw probability for an entry is `weight / total_weight`. Zero-weight
//! entries can never win. All draw functions take the RNG explicitly so that
//! callers (and tests) can seed it.

use std::collections::HashSet;

use rand::prelude::*;

use crate::corpus::{Corpus, NameEntry};
use crate::{MonikerError, MonikerResult};

/// When an exclusion set would leave fewer candidates than this, the
/// exclusion is dropped and the draw falls back to the full corpus.
pub const MIN_EXCLUSION_CANDIDATES: usize = 3;

/// Draw one name with probability proportional to its weight.
pub fn draw<'a, R: Rng + ?Sized>(corpus: &'a Corpus, rng: &mut R) -> MonikerResult<&'a str> {
    draw_where(corpus, |_| true, rng)
}

/// Draw one name from the entries satisfying `keep`, weighted by frequency.
///
/// Strict: if no positive-weight entry satisfies the predicate, this is an
/// [`MonikerError::EmptyCorpus`] — there is no fallback. Used by the binary
/// uniqueness policy, where the top-K guarantee must be absolute.
pub fn draw_where<'a, R, F>(corpus: &'a Corpus, keep: F, rng: &mut R) -> MonikerResult<&'a str>
where
    R: Rng + ?Sized,
    F: Fn(&NameEntry) -> bool,
{
    let candidates: Vec<&NameEntry> = corpus
        .entries()
        .iter()
        .filter(|e| e.weight > 0.0 && keep(e))
        .collect();
    pick_weighted(&candidates, |e| e.weight, rng)
        .ok_or(MonikerError::EmptyCorpus(corpus.role()))
}

/// Draw one name, preferring entries outside `excluded`.
///
/// Lenient: if fewer than [`MIN_EXCLUSION_CANDIDATES`] candidates remain
/// after exclusion, the exclusion is ignored entirely so small corpora keep
/// producing output.
pub fn draw_excluding<'a, R: Rng + ?Sized>(
    corpus: &'a Corpus,
    excluded: &HashSet<String>,
    rng: &mut R,
) -> MonikerResult<&'a str> {
    let remaining = corpus
        .entries()
        .iter()
        .filter(|e| e.weight > 0.0 && !excluded.contains(&e.name))
        .count();
    if remaining < MIN_EXCLUSION_CANDIDATES {
        return draw(corpus, rng);
    }
    draw_where(corpus, |e| !excluded.contains(&e.name), rng)
}

/// Pick from `candidates` with probability proportional to `weight_of`.
/// Returns `None` if the candidate list is empty or carries no weight.
pub(crate) fn pick_weighted<'a, R, W>(
    candidates: &[&'a NameEntry],
    weight_of: W,
    rng: &mut R,
) -> Option<&'a str>
where
    R: Rng + ?Sized,
    W: Fn(&NameEntry) -> f64,
{
    let total: f64 = candidates.iter().map(|e| weight_of(e)).sum();
    if candidates.is_empty() || total <= 0.0 {
        return None;
    }
    let mut x = rng.random_range(0.0..total);
    for e in candidates {
        x -= weight_of(e);
        if x < 0.0 {
            return Some(e.name.as_str());
        }
    }
    // float accumulation can leave x at ~0; take the last weighted candidate
    candidates
        .iter()
        .rev()
        .find(|e| weight_of(e) > 0.0)
        .map(|e| e.name.as_str())
}
