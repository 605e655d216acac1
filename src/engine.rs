//! The name generation engine
//!
//! A [`NameEngine`] owns one immutable corpus per role plus, for the funny
//! style, the precomputed pattern indexes. Everything after construction is
//! a pure read, so a shared engine can serve draws from multiple threads.
//!
//! ## Examples
//!
//! ```rust
//! use moniker::corpus::{Corpus, NameRole};
//! use moniker::engine::NameEngine;
//! use moniker::style::{GenerateOptions, GeneratorStyle};
//!
//! let first = Corpus::build(NameRole::First, [("JOHN", 50.0), ("ARIA", 1.0)]).unwrap();
//! let last = Corpus::build(NameRole::Last, [("SMITH", 50.0), ("ZANETTI", 1.0)]).unwrap();
//! let engine = NameEngine::new(GeneratorStyle::Census, first, last, None).unwrap();
//! let name = engine.generate_one(&GenerateOptions::default()).unwrap();
//! assert_eq!(name.split_whitespace().count(), 2);
//! ```

use std::collections::HashSet;

use log::{debug, warn};
use rand::prelude::*;

use crate::MonikerResult;
use crate::corpus::{Corpus, NameEntry, NameRole};
use crate::format;
use crate::patterns::{
    CRUDE_PATTERNS, INNUENDO_FIRST_NAMES, INNUENDO_LAST_NAMES, PatternIndex,
    SILLY_SOUND_PATTERNS, intersect_names,
};
use crate::sampler;
use crate::style::{GenerateOptions, GeneratorStyle, UniquenessPolicy};
use crate::tiers;

/// Total dedup retry budget for a batch, per requested name.
const BATCH_ATTEMPTS_PER_NAME: usize = 10;

/// One generated name, before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedName {
    pub first: String,
    pub last: String,
    pub nickname: Option<String>,
}

impl GeneratedName {
    /// The final display string.
    pub fn render(&self) -> String {
        format::full_name(&self.first, &self.last, self.nickname.as_deref())
    }
}

/// Result of a batch generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub names: Vec<String>,
    /// How many of the returned names were padded in without deduplication
    /// because the retry budget ran out. Zero when every name is unique.
    pub shortfall: usize,
}

/// Distinct first/last names available to one funny category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComboCount {
    pub first_names: usize,
    pub last_names: usize,
}

impl ComboCount {
    pub fn combinations(&self) -> usize {
        self.first_names * self.last_names
    }
}

/// How many funny combinations the loaded corpora can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombinationStats {
    pub silly: ComboCount,
    pub crude: ComboCount,
    pub innuendo: ComboCount,
}

impl CombinationStats {
    pub fn total(&self) -> usize {
        self.silly.combinations() + self.crude.combinations() + self.innuendo.combinations()
    }
}

struct FunnyIndexes {
    silly_first: PatternIndex,
    silly_last: PatternIndex,
    crude_first: PatternIndex,
    crude_last: PatternIndex,
    innuendo_first: Vec<String>,
    innuendo_last: Vec<String>,
}

/// Parameterized name generator over immutable corpora.
pub struct NameEngine {
    style: GeneratorStyle,
    first: Corpus,
    last: Corpus,
    nicknames: Option<Corpus>,
    funny: Option<FunnyIndexes>,
}

impl NameEngine {
    /// Build an engine. For [`GeneratorStyle::Funny`] this also builds the
    /// four pattern indexes and the innuendo intersections up front.
    pub fn new(
        style: GeneratorStyle,
        first: Corpus,
        last: Corpus,
        nicknames: Option<Corpus>,
    ) -> MonikerResult<Self> {
        debug_assert_eq!(first.role(), NameRole::First);
        debug_assert_eq!(last.role(), NameRole::Last);
        let funny = match style {
            GeneratorStyle::Funny => Some(FunnyIndexes {
                silly_first: PatternIndex::build(&first, SILLY_SOUND_PATTERNS)?,
                silly_last: PatternIndex::build(&last, SILLY_SOUND_PATTERNS)?,
                crude_first: PatternIndex::build(&first, CRUDE_PATTERNS)?,
                crude_last: PatternIndex::build(&last, CRUDE_PATTERNS)?,
                innuendo_first: intersect_names(&first, INNUENDO_FIRST_NAMES)
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
                innuendo_last: intersect_names(&last, INNUENDO_LAST_NAMES)
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            }),
            _ => None,
        };
        debug!(
            "{style:?} engine ready: {} first, {} last, {} nicknames",
            first.len(),
            last.len(),
            nicknames.as_ref().map_or(0, Corpus::len)
        );
        Ok(Self {
            style,
            first,
            last,
            nicknames,
            funny,
        })
    }

    pub fn style(&self) -> GeneratorStyle {
        self.style
    }

    /// Generate one formatted name using the process RNG.
    pub fn generate_one(&self, opts: &GenerateOptions) -> MonikerResult<String> {
        self.generate_one_with(&mut rand::rng(), opts)
    }

    /// Generate one formatted name with an explicit RNG.
    pub fn generate_one_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        opts: &GenerateOptions,
    ) -> MonikerResult<String> {
        Ok(self.pick_parts(rng, opts, None)?.render())
    }

    /// Generate `count` names, deduplicating first/last names across the
    /// batch on a best-effort basis (see [`Batch::shortfall`]).
    pub fn generate_many(&self, count: usize, opts: &GenerateOptions) -> MonikerResult<Batch> {
        self.generate_many_with(&mut rand::rng(), count, opts)
    }

    /// [`Self::generate_many`] with an explicit RNG.
    ///
    /// Retries duplicate draws up to `10 * count` attempts across the whole
    /// batch; if the budget runs out first, the remainder is padded with
    /// ordinary non-deduplicated draws and a warning is logged. Never fails
    /// for lack of diversity.
    pub fn generate_many_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        count: usize,
        opts: &GenerateOptions,
    ) -> MonikerResult<Batch> {
        let mut names = Vec::with_capacity(count);
        let mut used_first: HashSet<String> = HashSet::new();
        let mut used_last: HashSet<String> = HashSet::new();
        let mut used_nicknames: HashSet<String> = HashSet::new();
        let budget = count * BATCH_ATTEMPTS_PER_NAME;
        let mut attempts = 0;
        while names.len() < count && attempts < budget {
            attempts += 1;
            let parts = self.pick_parts(rng, opts, Some(&used_nicknames))?;
            if used_first.contains(&parts.first) || used_last.contains(&parts.last) {
                continue;
            }
            used_first.insert(parts.first.clone());
            used_last.insert(parts.last.clone());
            if let Some(nick) = &parts.nickname {
                used_nicknames.insert(nick.clone());
            }
            names.push(parts.render());
        }
        let shortfall = count - names.len();
        if shortfall > 0 {
            warn!(
                "only {} of {count} names were unique after {attempts} attempts; \
                 padding {shortfall} without deduplication",
                names.len()
            );
            for _ in 0..shortfall {
                names.push(self.generate_one_with(rng, opts)?);
            }
        }
        Ok(Batch { names, shortfall })
    }

    /// The `limit` most frequent entries for a role. Empty when the engine
    /// has no corpus for that role.
    pub fn most_common(&self, role: NameRole, limit: usize) -> &[NameEntry] {
        match role {
            NameRole::First => self.first.most_common(limit),
            NameRole::Last => self.last.most_common(limit),
            NameRole::Nickname => match &self.nicknames {
                Some(c) => c.most_common(limit),
                None => &[],
            },
        }
    }

    /// Nicknames containing `query`, case-insensitively, most frequent first.
    pub fn search_nicknames(&self, query: &str) -> Vec<&NameEntry> {
        let query = query.to_lowercase();
        self.nicknames
            .as_ref()
            .map(|c| {
                c.entries()
                    .iter()
                    .filter(|e| e.name.to_lowercase().contains(&query))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Nicknames of at least `min_length` chars, most frequent first.
    pub fn notable_nicknames(&self, min_length: usize, limit: usize) -> Vec<&NameEntry> {
        self.nicknames
            .as_ref()
            .map(|c| {
                c.entries()
                    .iter()
                    .filter(|e| e.name.chars().count() >= min_length)
                    .take(limit)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Funny-style combination counts. `None` for other styles.
    pub fn possible_combinations(&self) -> Option<CombinationStats> {
        let funny = self.funny.as_ref()?;
        Some(CombinationStats {
            silly: ComboCount {
                first_names: funny.silly_first.unique_match_count(),
                last_names: funny.silly_last.unique_match_count(),
            },
            crude: ComboCount {
                first_names: funny.crude_first.unique_match_count(),
                last_names: funny.crude_last.unique_match_count(),
            },
            innuendo: ComboCount {
                first_names: funny.innuendo_first.len(),
                last_names: funny.innuendo_last.len(),
            },
        })
    }

    fn pick_parts<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        opts: &GenerateOptions,
        used_nicknames: Option<&HashSet<String>>,
    ) -> MonikerResult<GeneratedName> {
        let (first, last) = match &self.funny {
            Some(funny) => self.pick_funny(funny, rng)?,
            None => self.pick_plain(rng, opts.uniqueness)?,
        };
        let nickname = self.pick_nickname(rng, opts, used_nicknames)?;
        Ok(GeneratedName {
            first: first.to_string(),
            last: last.to_string(),
            nickname,
        })
    }

    fn pick_plain<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        policy: UniquenessPolicy,
    ) -> MonikerResult<(&str, &str)> {
        match policy {
            UniquenessPolicy::None => {
                Ok((sampler::draw(&self.first, rng)?, sampler::draw(&self.last, rng)?))
            }
            UniquenessPolicy::BinaryTopK { top_k } => {
                let first = sampler::draw(&self.first, rng)?;
                let last = if self.first.top_names(top_k).contains(first) {
                    let top_last = self.last.top_names(top_k);
                    sampler::draw_where(
                        &self.last,
                        |e| !top_last.contains(e.name.as_str()),
                        rng,
                    )?
                } else {
                    sampler::draw(&self.last, rng)?
                };
                Ok((first, last))
            }
            UniquenessPolicy::Tiered => {
                let first_tier = tiers::pick_tier(rng);
                let first = tiers::draw_from_tier(&self.first, first_tier, rng)?;
                let last_tier = tiers::paired_tier(first_tier, rng);
                let last = tiers::draw_from_tier(&self.last, last_tier, rng)?;
                Ok((first, last))
            }
        }
    }

    /// Funny generation: fair coin flip between silly-sound and crude modes.
    fn pick_funny<'a, R: Rng + ?Sized>(
        &'a self,
        funny: &'a FunnyIndexes,
        rng: &mut R,
    ) -> MonikerResult<(&'a str, &'a str)> {
        if rng.random_bool(0.5) {
            self.pick_silly(funny, rng)
        } else {
            self.pick_crude(funny, rng)
        }
    }

    /// Scan patterns in shuffled order; prefer a last name whose pattern
    /// also matches the chosen first name, for phonetic consistency.
    fn pick_silly<'a, R: Rng + ?Sized>(
        &'a self,
        funny: &'a FunnyIndexes,
        rng: &mut R,
    ) -> MonikerResult<(&'a str, &'a str)> {
        let order = funny.silly_first.shuffled_order(rng);
        let first = match self.subset_pick(&self.first, &funny.silly_first, &order, rng) {
            Some(name) => name,
            None => sampler::draw(&self.first, rng)?,
        };
        let matching = order.iter().copied().find(|&p| {
            funny.silly_last.is_match(p, first) && !funny.silly_last.subset(p).is_empty()
        });
        let last = match matching {
            Some(p) => self.pick_from_subset(&self.last, &funny.silly_last, p, rng),
            None => self.subset_pick(&self.last, &funny.silly_last, &order, rng),
        };
        let last = match last {
            Some(name) => name,
            None => sampler::draw(&self.last, rng)?,
        };
        Ok((first, last))
    }

    /// Crude mode: known innuendo combinations first, then pattern scan.
    fn pick_crude<'a, R: Rng + ?Sized>(
        &'a self,
        funny: &'a FunnyIndexes,
        rng: &mut R,
    ) -> MonikerResult<(&'a str, &'a str)> {
        if let (Some(first), Some(last)) = (
            funny.innuendo_first.choose(rng),
            funny.innuendo_last.choose(rng),
        ) {
            return Ok((first.as_str(), last.as_str()));
        }
        let order = funny.crude_first.shuffled_order(rng);
        let first = match self.subset_pick(&self.first, &funny.crude_first, &order, rng) {
            Some(name) => name,
            None => sampler::draw(&self.first, rng)?,
        };
        let last = match self.subset_pick(&self.last, &funny.crude_last, &order, rng) {
            Some(name) => name,
            None => sampler::draw(&self.last, rng)?,
        };
        Ok((first, last))
    }

    /// Uniform pick from the first non-empty pattern subset in scan order.
    fn subset_pick<'a, R: Rng + ?Sized>(
        &self,
        corpus: &'a Corpus,
        index: &PatternIndex,
        order: &[usize],
        rng: &mut R,
    ) -> Option<&'a str> {
        order
            .iter()
            .copied()
            .find(|&p| !index.subset(p).is_empty())
            .and_then(|p| self.pick_from_subset(corpus, index, p, rng))
    }

    /// Uniform pick from one pattern's subset.
    fn pick_from_subset<'a, R: Rng + ?Sized>(
        &self,
        corpus: &'a Corpus,
        index: &PatternIndex,
        p: usize,
        rng: &mut R,
    ) -> Option<&'a str> {
        index
            .subset(p)
            .choose(rng)
            .map(|&i| corpus.entries()[i].name.as_str())
    }

    fn pick_nickname<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        opts: &GenerateOptions,
        used: Option<&HashSet<String>>,
    ) -> MonikerResult<Option<String>> {
        let Some(nicks) = &self.nicknames else {
            return Ok(None);
        };
        // a loaded-but-empty nickname corpus skips the nickname, it is not an error
        if !opts.use_nickname || nicks.is_empty() || nicks.total_weight() <= 0.0 {
            return Ok(None);
        }
        let p = opts
            .nickname_probability
            .unwrap_or_else(|| self.style.default_nickname_probability());
        if rng.random_range(0.0..1.0) >= p {
            return Ok(None);
        }
        let name = match used {
            Some(set) => sampler::draw_excluding(nicks, set, rng)?,
            None => sampler::draw(nicks, rng)?,
        };
        Ok(Some(name.to_string()))
    }
}
