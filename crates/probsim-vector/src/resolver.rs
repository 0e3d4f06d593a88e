use std::collections::HashSet;

use probsim_core::types::{Code, ScoredResult};

use crate::corpus::Corpus;
use crate::math::similarity_or_zero;
use crate::policy::{CODE_CANDIDATE_POLICY, RESOLVED_LIMIT};

/// Rank problems through their linked codes.
///
/// Stage one scores every code against `query` and keeps the top 30 in
/// `(0.6, 0.9999)`. Stage two walks those candidates best first and emits the
/// owning problem with the code's score, once per problem id, until 15
/// problems are collected.
pub fn resolve_via_codes<'a>(query: &[f32], corpus: &'a Corpus) -> Vec<ScoredResult<'a>> {
    let candidates = rank_codes(query, corpus.codes());

    let mut seen: HashSet<&str> = HashSet::new();
    let mut results = Vec::with_capacity(RESOLVED_LIMIT);
    for (code, score) in &candidates {
        if results.len() >= RESOLVED_LIMIT {
            break;
        }
        let Some(problem) = corpus.problem_for_code(&code.filename) else {
            continue;
        };
        if seen.insert(problem.problem_id.as_str()) {
            results.push(ScoredResult { problem, score: *score });
        }
    }
    tracing::debug!("code mode: {} candidates mapped to {} problems", candidates.len(), results.len());
    results
}

/// Stage one on its own: the scored code candidates, best first.
pub fn rank_codes<'a>(query: &[f32], codes: &'a [Code]) -> Vec<(&'a Code, f32)> {
    let scored = codes
        .iter()
        .map(|c| (c, similarity_or_zero(Some(query), c.embedding.as_deref())));
    CODE_CANDIDATE_POLICY.select(scored)
}
