//! Similarity ranking over the problem and code corpora.
//!
//! [`SearchEngine`] is the entry point; the ranking passes are exposed
//! separately for callers that already know which one they need.

pub mod corpus;
pub mod engine;
pub mod math;
pub mod policy;
pub mod ranker;
pub mod resolver;

pub use corpus::Corpus;
pub use engine::SearchEngine;
pub use math::cosine_similarity;
pub use ranker::rank_by_vector;
pub use resolver::resolve_via_codes;
