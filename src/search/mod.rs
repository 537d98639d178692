//! Search functionality: similarity scoring, sampling, and the cascade

pub mod cascade;
pub mod sampler;
pub mod similarity;

pub use cascade::{SearchCascade, SearchOutcome};
pub use sampler::Sampler;
