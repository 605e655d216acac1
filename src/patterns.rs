//! Pattern tables and corpus indexing for funny-name generation
//!
//! Two regex tables drive the funny style: silly sound patterns ("oo",
//! double letters, "oodle", ...) and crude bathroom-humor patterns. A
//! [`PatternIndex`] is built once per corpus at engine construction: every
//! name is tested case-insensitively against every pattern and the matching
//! corpus indices are stored per pattern id. Membership is non-exclusive.
//!
//! Separately, two fixed innuendo name lists are intersected directly with
//! the loaded corpora; when both intersections are non-empty, generation can
//! combine them uniformly, bypassing frequency weights.

use std::collections::HashSet;

use rand::prelude::*;
use regex::{Regex, RegexBuilder};

use crate::corpus::Corpus;
use crate::{MonikerError, MonikerResult};

/// Silly sound patterns, id first. Matched case-insensitively.
pub const SILLY_SOUND_PATTERNS: &[(&str, &str)] = &[
    ("oo", r"oo"),
    ("ee", r"ee"),
    ("bb", r"bb"),
    ("dd", r"dd"),
    ("pp", r"pp"),
    ("tt", r"tt"),
    ("gg", r"gg"),
    ("oy", r"oy"),
    ("oob", r"oob"),
    ("ub", r"ub"),
    ("ump", r"ump"),
    ("oot", r"oot"),
    ("onk", r"onk"),
    ("izz", r"izz"),
    ("uzz", r"uzz"),
    ("ick", r"ick"),
    ("ank", r"ank"),
    ("ink", r"ink"),
    ("unk", r"unk"),
    ("zz", r"zz"),
    ("oodle", r"oodle"),
    ("oogle", r"oogle"),
];

/// Crude / bathroom-humor patterns.
pub const CRUDE_PATTERNS: &[(&str, &str)] = &[
    ("butt", r"but|butt"),
    ("poo", r"poo"),
    ("pee", r"pee"),
    ("doo", r"doo"),
    ("wee", r"wee"),
    ("toot", r"toot"),
    ("peep", r"peep"),
    ("boob", r"b[o0]{2}b"),
    ("dick", r"dick"),
    ("cock", r"cock"),
    ("puff", r"puff"),
    ("long", r"long"),
    ("big", r"big"),
    ("horn", r"horn"),
    ("wang", r"wang"),
    ("wank", r"wank"),
    ("hump", r"hump"),
    ("dump", r"dump"),
    ("hole", r"hole"),
    ("junk", r"junk"),
    ("rear", r"rear"),
    ("tush", r"tush"),
    ("bottom", r"bottom"),
    ("squeeze", r"squeeze"),
    ("lick", r"lick"),
];

/// First names that land a joke when paired with the right surname.
pub const INNUENDO_FIRST_NAMES: &[&str] = &[
    "HARRY", "SEYMOUR", "DICK", "WILLIE", "MIKE", "PETER", "RANDY", "BEN",
    "HUGH", "ANITA", "LUKE", "JUSTIN", "DREW", "WOODY", "PHIL", "CHUCK",
    "IMA", "ROCCO", "ROD", "CHESTER",
];

/// Surnames for the same purpose.
pub const INNUENDO_LAST_NAMES: &[&str] = &[
    "BUTT", "BUTTS", "BOOTY", "BOTTOM", "SEAMAN", "SAMPLE", "HYMAN",
    "DIXON", "JOHNSON", "DYCK", "BALLS", "WEINER", "LONGFELLOW", "COX",
    "HANCOCK", "COCKBURN", "CUMMINGS", "PETERS", "KUNTZ", "BEAVER", "BUST",
    "HOOKER", "LOINS", "SMALL", "PITTS", "WOOD",
];

/// Precomputed pattern-to-names index over one corpus.
#[derive(Debug)]
pub struct PatternIndex {
    patterns: Vec<(String, Regex)>,
    /// Corpus entry indices matching each pattern, parallel to `patterns`.
    subsets: Vec<Vec<usize>>,
}

impl PatternIndex {
    /// Test every corpus name against every pattern and record the matches.
    pub fn build(corpus: &Corpus, table: &[(&str, &str)]) -> MonikerResult<Self> {
        let mut patterns = Vec::with_capacity(table.len());
        for &(id, pat) in table {
            let re = RegexBuilder::new(pat)
                .case_insensitive(true)
                .build()
                .map_err(|err| MonikerError::InvalidPattern(pat.to_string(), err))?;
            patterns.push((id.to_string(), re));
        }
        let subsets = patterns
            .iter()
            .map(|(_, re)| {
                corpus
                    .entries()
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| re.is_match(&e.name))
                    .map(|(i, _)| i)
                    .collect()
            })
            .collect();
        Ok(Self { patterns, subsets })
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Corpus indices matching pattern `p`.
    pub fn subset(&self, p: usize) -> &[usize] {
        &self.subsets[p]
    }

    /// Does pattern `p` match `name`?
    pub fn is_match(&self, p: usize, name: &str) -> bool {
        self.patterns[p].1.is_match(name)
    }

    /// Pattern positions in random scan order.
    pub fn shuffled_order<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.patterns.len()).collect();
        order.shuffle(rng);
        order
    }

    /// Number of distinct corpus entries matched by any pattern.
    pub fn unique_match_count(&self) -> usize {
        let all: HashSet<usize> = self.subsets.iter().flatten().copied().collect();
        all.len()
    }
}

/// Corpus names present in a fixed name list, compared case-insensitively.
pub fn intersect_names<'a>(corpus: &'a Corpus, fixed: &[&str]) -> Vec<&'a str> {
    corpus
        .entries()
        .iter()
        .filter(|e| fixed.iter().any(|f| f.eq_ignore_ascii_case(&e.name)))
        .map(|e| e.name.as_str())
        .collect()
}
