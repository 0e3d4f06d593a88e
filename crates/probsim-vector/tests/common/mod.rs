#![allow(dead_code)]

use probsim_core::types::{Code, Problem, ScoredResult};

pub const FIELD: &str = "embedding";

pub fn problem(id: &str, vector: &[f32]) -> Problem {
    Problem::new(id, format!("Problem {id}")).with_embedding(FIELD, vector.to_vec())
}

pub fn linked(id: &str, filename: &str) -> Problem {
    Problem::new(id, format!("Problem {id}")).with_code(filename)
}

pub fn code(filename: &str, vector: &[f32]) -> Code {
    Code::new(filename, vector.to_vec())
}

pub fn ids<'a>(results: &[ScoredResult<'a>]) -> Vec<&'a str> {
    results.iter().map(|r| r.problem.problem_id.as_str()).collect()
}

pub fn assert_descending(results: &[ScoredResult<'_>]) {
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score, "{} < {}", pair[0].score, pair[1].score);
    }
}
