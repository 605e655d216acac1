pub use error::{MonikerError, MonikerResult};

pub mod corpus;
pub mod engine;
pub mod error;
pub mod format;
pub mod patterns;
pub mod sampler;
pub mod style;
pub mod tiers;
