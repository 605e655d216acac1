//! Percentile tiers over a weight-sorted corpus
//!
//! The corpus is split into five frequency tiers: tier 1 holds the top 10%
//! most frequent names and tier 5 the bottom 10%. Generation picks a tier
//! from a fixed categorical distribution skewed toward the rare end, then
//! draws within the tier using inverted log-scaled weights so the least
//! frequent names of the tier are favored. A first name drawn from tier 1
//! forces the paired last name into tier 4 or 5, so a very common first
//! name is never paired with a common last name on this path.

use std::ops::Range;

use rand::prelude::*;

use crate::corpus::{Corpus, NameEntry};
use crate::sampler::pick_weighted;
use crate::{MonikerError, MonikerResult};

pub const TIER_COUNT: usize = 5;

/// Fractional `[start, end)` boundaries of each tier within the sorted corpus.
const TIER_BOUNDS: [(f64, f64); TIER_COUNT] = [
    (0.0, 0.1),
    (0.1, 0.3),
    (0.3, 0.6),
    (0.6, 0.9),
    (0.9, 1.0),
];

/// Per-tier selection probability, tier 1 first.
const TIER_WEIGHTS: [f64; TIER_COUNT] = [0.05, 0.10, 0.20, 0.30, 0.35];

/// Keeps the inverted weight finite for zero-frequency entries.
const INVERT_EPSILON: f64 = 0.001;

/// Start of the bottom-40% fallback range, as a fraction of the corpus.
const FALLBACK_START: f64 = 0.6;

/// Index range of `tier` (1-based) for a corpus of `len` sorted entries.
///
/// Boundaries truncate like the percentile math they mirror, so for 100
/// entries tier 1 is exactly ranks 0..10 and tier 5 ranks 90..100.
pub fn tier_range(len: usize, tier: usize) -> Range<usize> {
    assert!((1..=TIER_COUNT).contains(&tier), "tier out of range: {tier}");
    let (lo, hi) = TIER_BOUNDS[tier - 1];
    let start = (len as f64 * lo) as usize;
    let end = if tier == TIER_COUNT {
        len
    } else {
        (len as f64 * hi) as usize
    };
    start..end
}

/// The slice of `corpus` belonging to `tier` (1-based).
pub fn tier_slice(corpus: &Corpus, tier: usize) -> &[NameEntry] {
    &corpus.entries()[tier_range(corpus.len(), tier)]
}

/// Pick a tier from the fixed categorical distribution.
pub fn pick_tier<R: Rng + ?Sized>(rng: &mut R) -> usize {
    let mut x = rng.random_range(0.0..1.0);
    for (i, w) in TIER_WEIGHTS.iter().enumerate() {
        x -= w;
        if x < 0.0 {
            return i + 1;
        }
    }
    TIER_COUNT
}

/// Pick the tier for the side paired with a first name from `first_tier`.
///
/// Correlation rule: a tier-1 (very common) first name forces the pair into
/// tier 4 or 5; otherwise the pair tier is sampled independently.
pub fn paired_tier<R: Rng + ?Sized>(first_tier: usize, rng: &mut R) -> usize {
    if first_tier == 1 {
        *[4, 5].choose(rng).unwrap_or(&5)
    } else {
        pick_tier(rng)
    }
}

/// Sampling weight for an entry of original frequency `f` within a tier.
/// Monotonically decreasing in `f`, so rarer names are favored.
pub(crate) fn inverted_weight(f: f64) -> f64 {
    (1.0 / (f + INVERT_EPSILON) + 1.0).ln()
}

/// Draw a name from `tier` of `corpus` with inverted log-scaled weights.
///
/// If the tier is empty (small corpora), falls back to a uniform draw from
/// the bottom 40% of the sorted corpus.
pub fn draw_from_tier<'a, R: Rng + ?Sized>(
    corpus: &'a Corpus,
    tier: usize,
    rng: &mut R,
) -> MonikerResult<&'a str> {
    let slice = tier_slice(corpus, tier);
    if slice.is_empty() {
        let start = (corpus.len() as f64 * FALLBACK_START) as usize;
        return corpus.entries()[start..]
            .choose(rng)
            .map(|e| e.name.as_str())
            .ok_or(MonikerError::EmptyCorpus(corpus.role()));
    }
    let candidates: Vec<&NameEntry> = slice.iter().collect();
    pick_weighted(&candidates, |e| inverted_weight(e.weight), rng)
        .ok_or(MonikerError::EmptyCorpus(corpus.role()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::corpus::NameRole;

    /// 100 distinct names with strictly descending weights: rank i is NM{i:02}.
    fn corpus_100() -> Corpus {
        let raw: Vec<(String, f64)> = (0..100)
            .map(|i| (format!("NM{i:02}"), (1000 - i * 10) as f64))
            .collect();
        Corpus::build(NameRole::First, raw).unwrap()
    }

    #[test]
    fn test_tier_boundaries_at_100() {
        assert_eq!(tier_range(100, 1), 0..10);
        assert_eq!(tier_range(100, 2), 10..30);
        assert_eq!(tier_range(100, 3), 30..60);
        assert_eq!(tier_range(100, 4), 60..90);
        assert_eq!(tier_range(100, 5), 90..100);
    }

    #[test]
    fn test_tier_slices_hold_expected_ranks() {
        let c = corpus_100();
        let t1 = tier_slice(&c, 1);
        assert_eq!(t1.len(), 10);
        assert_eq!(t1[0].name, "NM00");
        assert_eq!(t1[9].name, "NM09");
        let t5 = tier_slice(&c, 5);
        assert_eq!(t5[0].name, "NM90");
        assert_eq!(t5[9].name, "NM99");
    }

    #[test]
    fn test_tiers_cover_corpus_without_overlap() {
        let len = 73;
        let mut covered = 0;
        for t in 1..=TIER_COUNT {
            let r = tier_range(len, t);
            assert_eq!(r.start, covered);
            covered = r.end;
        }
        assert_eq!(covered, len);
    }

    #[test]
    fn test_pick_tier_skews_rare() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut counts = [0usize; TIER_COUNT];
        let n = 50_000;
        for _ in 0..n {
            counts[pick_tier(&mut rng) - 1] += 1;
        }
        for (i, w) in TIER_WEIGHTS.iter().enumerate() {
            let freq = counts[i] as f64 / n as f64;
            assert!((freq - w).abs() < 0.01, "tier {}: {freq} vs {w}", i + 1);
        }
    }

    #[test]
    fn test_paired_tier_forces_uncommon_for_tier_one() {
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..1000 {
            let t = paired_tier(1, &mut rng);
            assert!(t == 4 || t == 5, "got tier {t}");
        }
    }

    #[test]
    fn test_inverted_weight_monotonically_decreasing() {
        let mut prev = inverted_weight(0.0);
        for f in [0.5, 1.0, 10.0, 100.0, 10_000.0] {
            let w = inverted_weight(f);
            assert!(w < prev && w > 0.0);
            prev = w;
        }
    }

    #[test]
    fn test_draw_from_tier_stays_in_tier() {
        let c = corpus_100();
        let mut rng = StdRng::seed_from_u64(13);
        for _ in 0..500 {
            let name = draw_from_tier(&c, 5, &mut rng).unwrap();
            let rank: usize = name[2..].parse().unwrap();
            assert!((90..100).contains(&rank), "{name} outside tier 5");
        }
    }

    #[test]
    fn test_empty_tier_falls_back_to_bottom_forty_percent() {
        // 3 entries: tier 1 is 0..0, empty; fallback range is [1, 3)
        let c = Corpus::build(
            NameRole::Last,
            [("TOP", 9.0), ("MID", 5.0), ("LOW", 1.0)],
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(14);
        for _ in 0..200 {
            let name = draw_from_tier(&c, 1, &mut rng).unwrap();
            assert!(name == "MID" || name == "LOW", "got {name}");
        }
    }
}
