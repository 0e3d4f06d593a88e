//! Score window and pool sizes applied by the rankers.
//!
//! The upper bound doubles as self-exclusion: a query taken from a corpus
//! item scores ~1.0 against that item, and so does any near-duplicate.

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankPolicy {
    /// Exclusive lower bound.
    pub min_score: f32,
    /// Exclusive upper bound.
    pub max_score: f32,
    pub limit: usize,
}

/// Problem-to-problem ranking.
pub const PROBLEM_POLICY: RankPolicy = RankPolicy { min_score: 0.5, max_score: 0.9999, limit: 15 };

/// Candidate pool for the code stage; wider than the final list so that
/// collapsing codes onto problems still leaves enough results.
pub const CODE_CANDIDATE_POLICY: RankPolicy = RankPolicy { min_score: 0.6, max_score: 0.9999, limit: 30 };

/// Final length of a code-mode result list.
pub const RESOLVED_LIMIT: usize = 15;

impl RankPolicy {
    pub fn accepts(&self, score: f32) -> bool {
        score > self.min_score && score < self.max_score
    }

    /// Filter to the score window, sort descending and truncate. The sort is
    /// stable, so equal scores keep their input order.
    pub fn select<T>(&self, scored: impl IntoIterator<Item = (T, f32)>) -> Vec<(T, f32)> {
        let mut kept: Vec<(T, f32)> = scored.into_iter().filter(|(_, s)| self.accepts(*s)).collect();
        kept.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        kept.truncate(self.limit);
        kept
    }
}
