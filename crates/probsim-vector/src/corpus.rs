//! Immutable problem and code collections with lookup indexes.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use probsim_core::loader::LoadedData;
use probsim_core::types::{Code, Problem};

/// Read-only snapshot of both corpora. Built once, then shared by any number
/// of concurrent searches.
#[derive(Debug, Default)]
pub struct Corpus {
    problems: Vec<Problem>,
    codes: Vec<Code>,
    problem_by_id: HashMap<String, usize>,
    problem_by_code: HashMap<String, usize>,
    code_by_filename: HashMap<String, usize>,
}

impl Corpus {
    pub fn new(problems: Vec<Problem>, codes: Vec<Code>) -> Self {
        let mut problem_by_id = HashMap::with_capacity(problems.len());
        let mut problem_by_code = HashMap::new();
        for (idx, p) in problems.iter().enumerate() {
            match problem_by_id.entry(p.problem_id.clone()) {
                Entry::Vacant(e) => {
                    e.insert(idx);
                }
                Entry::Occupied(_) => tracing::warn!("duplicate problem id {}; keeping the first", p.problem_id),
            }
            if let Some(filename) = &p.shortest_code_filename {
                match problem_by_code.entry(filename.clone()) {
                    Entry::Vacant(e) => {
                        e.insert(idx);
                    }
                    Entry::Occupied(e) => tracing::warn!(
                        "{} is linked from both {} and {}; using {}",
                        filename,
                        problems[*e.get()].problem_id,
                        p.problem_id,
                        problems[*e.get()].problem_id
                    ),
                }
            }
        }

        let mut code_by_filename = HashMap::with_capacity(codes.len());
        for (idx, c) in codes.iter().enumerate() {
            code_by_filename.entry(c.filename.clone()).or_insert(idx);
        }

        tracing::debug!(
            "corpus ready: {} problems, {} codes, {} code links",
            problems.len(),
            codes.len(),
            problem_by_code.len()
        );
        Self { problems, codes, problem_by_id, problem_by_code, code_by_filename }
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn codes(&self) -> &[Code] {
        &self.codes
    }

    pub fn problem(&self, problem_id: &str) -> Option<&Problem> {
        self.problem_by_id.get(problem_id).map(|&i| &self.problems[i])
    }

    pub fn code(&self, filename: &str) -> Option<&Code> {
        self.code_by_filename.get(filename).map(|&i| &self.codes[i])
    }

    /// The problem whose `shortest_code_filename` is `filename`. When several
    /// problems link the same file, the first in corpus order wins.
    pub fn problem_for_code(&self, filename: &str) -> Option<&Problem> {
        self.problem_by_code.get(filename).map(|&i| &self.problems[i])
    }

    pub fn linked_code(&self, problem: &Problem) -> Option<&Code> {
        problem.shortest_code_filename.as_deref().and_then(|f| self.code(f))
    }

    /// Case-insensitive substring match on id or title, in corpus order.
    /// Queries shorter than two characters match nothing.
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<&Problem> {
        if query.chars().count() < 2 {
            return Vec::new();
        }
        let needle = query.to_lowercase();
        self.problems
            .iter()
            .filter(|p| p.problem_id.to_lowercase().contains(&needle) || p.title.to_lowercase().contains(&needle))
            .take(limit)
            .collect()
    }
}

impl From<LoadedData> for Corpus {
    fn from(data: LoadedData) -> Self {
        Self::new(data.problems, data.codes)
    }
}
