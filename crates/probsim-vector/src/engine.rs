use probsim_core::error::{Error, Result};
use probsim_core::traits::Embedder;
use probsim_core::types::{Problem, ScoredResult, SearchMode};

use crate::corpus::Corpus;
use crate::ranker::rank_by_vector;
use crate::resolver::resolve_via_codes;

/// Free-text queries shorter than this are rejected before embedding.
pub const MIN_TEXT_QUERY_CHARS: usize = 10;

/// Single entry point over a corpus snapshot. Holds no per-query state, so one
/// engine can serve concurrent searches.
#[derive(Debug, Clone, Copy)]
pub struct SearchEngine<'c> {
    corpus: &'c Corpus,
}

impl<'c> SearchEngine<'c> {
    pub fn new(corpus: &'c Corpus) -> Self {
        Self { corpus }
    }

    pub fn corpus(&self) -> &'c Corpus {
        self.corpus
    }

    /// Rank problems against `query` in the space named by `mode`.
    ///
    /// `None` means the caller had nothing to compare with and yields
    /// `Error::MissingVector`; an empty `Ok` means nothing was similar enough.
    /// In code mode `query` must already be a code-space vector.
    pub fn search(&self, query: Option<&[f32]>, mode: &SearchMode) -> Result<Vec<ScoredResult<'c>>> {
        let query = query.ok_or_else(|| Error::MissingVector {
            item: "query".to_string(),
            kind: mode.to_string(),
        })?;
        let results = match mode {
            SearchMode::ViaCode => resolve_via_codes(query, self.corpus),
            SearchMode::Field(field) => rank_by_vector(query, self.corpus.problems(), field),
        };
        Ok(results)
    }

    /// The vector a search from `problem` starts with: its own embedding for a
    /// field mode, or its linked code's embedding in code mode.
    pub fn query_vector_for<'p>(&self, problem: &'p Problem, mode: &SearchMode) -> Result<&'p [f32]>
    where
        'c: 'p,
    {
        match mode {
            SearchMode::Field(field) => problem.embedding(field).ok_or_else(|| Error::MissingVector {
                item: problem.problem_id.clone(),
                kind: field.clone(),
            }),
            SearchMode::ViaCode => {
                let filename = problem
                    .shortest_code_filename
                    .as_deref()
                    .ok_or_else(|| Error::NoLinkedCode(problem.problem_id.clone()))?;
                self.corpus
                    .code(filename)
                    .and_then(|c| c.embedding.as_deref())
                    .ok_or_else(|| Error::MissingVector {
                        item: problem.problem_id.clone(),
                        kind: format!("code embedding ({})", filename),
                    })
            }
        }
    }

    /// Problems similar to an existing one.
    pub fn search_similar_to(&self, problem_id: &str, mode: &SearchMode) -> Result<Vec<ScoredResult<'c>>> {
        let problem = self
            .corpus
            .problem(problem_id)
            .ok_or_else(|| Error::UnknownProblem(problem_id.to_string()))?;
        let query = self.query_vector_for(problem, mode)?;
        self.search(Some(query), mode)
    }

    /// Embed `text` and rank problems on `field`.
    pub fn search_text(&self, text: &str, field: &str, embedder: &dyn Embedder) -> Result<Vec<ScoredResult<'c>>> {
        let text = text.trim();
        if text.chars().count() < MIN_TEXT_QUERY_CHARS {
            return Err(Error::QueryTooShort { min: MIN_TEXT_QUERY_CHARS });
        }
        let vector = embedder.embed_one(text).map_err(|e| Error::Embedding(e.to_string()))?;
        self.search(Some(vector.as_slice()), &SearchMode::field(field))
    }
}
