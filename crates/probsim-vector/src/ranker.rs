use probsim_core::types::{Problem, ScoredResult};

use crate::math::similarity_or_zero;
use crate::policy::PROBLEM_POLICY;

/// Rank `problems` by cosine similarity between `query` and each problem's
/// `field` embedding.
///
/// Keeps scores in `(0.5, 0.9999)`, highest first, at most 15. Problems that
/// lack the field score zero and drop out.
pub fn rank_by_vector<'a>(query: &[f32], problems: &'a [Problem], field: &str) -> Vec<ScoredResult<'a>> {
    let scored = problems
        .iter()
        .map(|p| (p, similarity_or_zero(Some(query), p.embedding(field))));
    let ranked: Vec<ScoredResult<'a>> = PROBLEM_POLICY
        .select(scored)
        .into_iter()
        .map(|(problem, score)| ScoredResult { problem, score })
        .collect();
    tracing::debug!("field '{}': {} of {} problems ranked", field, ranked.len(), problems.len());
    ranked
}
