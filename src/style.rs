//! Generator styles and per-call options

/// Size of the top-K sets used by the binary uniqueness policy.
pub const DEFAULT_TOP_K: usize = 100;

/// Which corpus family and generation strategy to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorStyle {
    /// Historical baseball players, nickname-heavy.
    Baseball,
    /// 1990 US Census distributions.
    Census,
    /// Census corpora filtered through sound/crude pattern matching.
    Funny,
}

impl GeneratorStyle {
    /// Chance of attaching a nickname when the corpus has one.
    ///
    /// The source data disagrees with itself on these constants across
    /// revisions, so callers can override via
    /// [`GenerateOptions::nickname_probability`].
    pub fn default_nickname_probability(self) -> f64 {
        match self {
            GeneratorStyle::Baseball => 0.7,
            GeneratorStyle::Census => 0.5,
            GeneratorStyle::Funny => 0.35,
        }
    }
}

/// How hard to push generated pairs away from common+common combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniquenessPolicy {
    /// Plain weighted draws, no pairing constraint.
    None,
    /// Never pair a top-K first name with a top-K last name.
    BinaryTopK { top_k: usize },
    /// Percentile-tier sampling with the tier-1 correlation rule.
    Tiered,
}

impl UniquenessPolicy {
    /// The binary policy with the standard top-100 sets.
    pub fn binary() -> Self {
        UniquenessPolicy::BinaryTopK {
            top_k: DEFAULT_TOP_K,
        }
    }
}

/// Per-call generation options.
#[derive(Debug, Clone, Copy)]
pub struct GenerateOptions {
    /// Attach a nickname when the style's corpus has one.
    pub use_nickname: bool,
    /// Override of the style's default nickname probability, in `[0, 1]`.
    pub nickname_probability: Option<f64>,
    pub uniqueness: UniquenessPolicy,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            use_nickname: true,
            nickname_probability: None,
            uniqueness: UniquenessPolicy::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let opts = GenerateOptions::default();
        assert!(opts.use_nickname);
        assert_eq!(opts.nickname_probability, None);
        assert_eq!(opts.uniqueness, UniquenessPolicy::None);
        assert_eq!(
            UniquenessPolicy::binary(),
            UniquenessPolicy::BinaryTopK { top_k: 100 }
        );
    }
}
