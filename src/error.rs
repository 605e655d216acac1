use miette::Diagnostic;
use thiserror::Error;

use crate::corpus::NameRole;

#[derive(Error, Diagnostic, Debug)]
pub enum MonikerError {
    /// The corpus has no entries, or every entry has zero weight.
    #[error("{0} name corpus has no drawable entries")]
    #[diagnostic(code(moniker::empty_corpus), url(docsrs))]
    EmptyCorpus(NameRole),

    /// A corpus entry carried a negative or non-finite weight.
    #[error("invalid weight {1} for {0} name {2:?}")]
    #[diagnostic(code(moniker::invalid_corpus), url(docsrs))]
    InvalidCorpus(NameRole, f64, String),

    /// A pattern table entry failed to compile.
    #[error("invalid pattern {0:?}: {1}")]
    #[diagnostic(code(moniker::invalid_pattern), url(docsrs))]
    InvalidPattern(String, regex::Error),
}

pub type MonikerResult<T> = Result<T, MonikerError>;
