//! Domain types shared by the loader, the ranking engine and the CLI.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub type ProblemId = String;
pub type Embedding = Vec<f32>;

/// A contest problem as stored in the problem shards.
///
/// - `problem_id`: unique, stable identifier
/// - `title`/`url`: display data
/// - `tags`: topic labels, kept in display order
/// - `embeddings`: every numeric-array field of the record, keyed by its JSON
///   name (e.g. `embedding`, `title_embedding`)
/// - `shortest_code_filename`: back-reference to the canonical `Code`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "RawProblem")]
pub struct Problem {
    pub problem_id: ProblemId,
    pub title: String,
    pub url: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortest_code_filename: Option<String>,
    #[serde(skip_serializing)]
    pub embeddings: BTreeMap<String, Embedding>,
}

impl Problem {
    pub fn new(problem_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            problem_id: problem_id.into(),
            title: title.into(),
            url: String::new(),
            tags: Vec::new(),
            shortest_code_filename: None,
            embeddings: BTreeMap::new(),
        }
    }

    pub fn with_embedding(mut self, field: impl Into<String>, vector: Embedding) -> Self {
        self.embeddings.insert(field.into(), vector);
        self
    }

    pub fn with_code(mut self, filename: impl Into<String>) -> Self {
        self.shortest_code_filename = Some(filename.into());
        self
    }

    /// The stored vector for `field`, if this record carries one.
    pub fn embedding(&self, field: &str) -> Option<&[f32]> {
        self.embeddings.get(field).map(Vec::as_slice)
    }
}

/// Wire shape of a problem record. Unknown fields are collected so that any
/// embedding column can be addressed by name.
#[derive(Deserialize)]
struct RawProblem {
    problem_id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    shortest_code_filename: Option<String>,
    #[serde(flatten)]
    rest: BTreeMap<String, serde_json::Value>,
}

impl From<RawProblem> for Problem {
    fn from(raw: RawProblem) -> Self {
        let embeddings = raw
            .rest
            .into_iter()
            .filter_map(|(key, value)| as_vector(&value).map(|v| (key, v)))
            .collect();
        Self {
            problem_id: raw.problem_id,
            title: raw.title,
            url: raw.url,
            tags: raw.tags,
            shortest_code_filename: raw.shortest_code_filename.filter(|f| !f.is_empty()),
            embeddings,
        }
    }
}

fn as_vector(value: &serde_json::Value) -> Option<Embedding> {
    let items = value.as_array()?;
    items.iter().map(|x| x.as_f64().map(|f| f as f32)).collect()
}

/// A solution snippet. `filename` is what `Problem::shortest_code_filename`
/// points at; the code itself does not know its problem.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Code {
    pub filename: String,
    #[serde(default, skip_serializing)]
    pub embedding: Option<Embedding>,
}

impl Code {
    pub fn new(filename: impl Into<String>, embedding: Embedding) -> Self {
        Self { filename: filename.into(), embedding: Some(embedding) }
    }
}

/// Which embedding space a query is compared in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SearchMode {
    /// Compare against the problem embedding stored under this field name.
    Field(String),
    /// Compare against code embeddings and map the hits back to problems.
    ViaCode,
}

impl SearchMode {
    pub fn field(name: impl Into<String>) -> Self {
        SearchMode::Field(name.into())
    }
}

impl From<&str> for SearchMode {
    /// Any selector starting with `code` means code-space comparison.
    fn from(s: &str) -> Self {
        if s.starts_with("code") { SearchMode::ViaCode } else { SearchMode::Field(s.to_string()) }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Field(name) => f.write_str(name),
            SearchMode::ViaCode => f.write_str("code"),
        }
    }
}

/// One ranked problem. `score` is cosine similarity, higher is better; in
/// code mode it is the score of the linked code.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ScoredResult<'a> {
    pub problem: &'a Problem,
    pub score: f32,
}
