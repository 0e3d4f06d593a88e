use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("No comparable vector: {kind} is missing for {item}")]
    MissingVector { item: String, kind: String },

    #[error("Problem {0} has no linked code file")]
    NoLinkedCode(String),

    #[error("Unknown problem: {0}")]
    UnknownProblem(String),

    #[error("Query text too short: at least {min} characters required")]
    QueryTooShort { min: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load corpus: {0}")]
    Load(String),

    #[error("Embedding failed: {0}")]
    Embedding(String),
}

impl Error {
    /// True when the query could not be built at all, as opposed to a search
    /// that ran and found nothing.
    pub fn is_missing_vector(&self) -> bool {
        matches!(self, Error::MissingVector { .. } | Error::NoLinkedCode(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
