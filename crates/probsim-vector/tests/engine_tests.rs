mod common;

use common::{code, ids, linked, problem, FIELD};
use probsim_core::error::Error;
use probsim_core::traits::Embedder;
use probsim_core::types::{Problem, SearchMode};
use probsim_vector::{Corpus, SearchEngine};

struct FixedEmbedder(Vec<f32>);

impl Embedder for FixedEmbedder {
    fn dim(&self) -> usize {
        self.0.len()
    }
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|_| self.0.clone()).collect())
    }
}

fn sample_corpus() -> Corpus {
    let problems = vec![
        problem("abc001_a", &[1.0, 0.0]).with_code("abc001_a.cpp"),
        problem("abc002_a", &[0.9, 0.1]).with_code("abc002_a.cpp"),
        problem("abc003_a", &[0.0, 1.0]),
        linked("abc004_a", "missing.cpp"),
    ];
    let codes = vec![code("abc001_a.cpp", &[1.0, 0.0]), code("abc002_a.cpp", &[0.8, 0.6])];
    Corpus::new(problems, codes)
}

#[test]
fn field_mode_ranks_problems() {
    let corpus = sample_corpus();
    let engine = SearchEngine::new(&corpus);

    let results = engine.search(Some(&[1.0, 0.0]), &SearchMode::field(FIELD)).expect("search");
    assert_eq!(ids(&results), vec!["abc002_a"]);
}

#[test]
fn code_mode_maps_codes_to_problems() {
    let corpus = sample_corpus();
    let engine = SearchEngine::new(&corpus);

    let results = engine.search(Some(&[1.0, 0.0]), &SearchMode::ViaCode).expect("search");
    assert_eq!(ids(&results), vec!["abc002_a"]);
    assert!((results[0].score - 0.8).abs() < 1e-6);
}

#[test]
fn absent_query_is_missing_vector_not_empty() {
    let corpus = sample_corpus();
    let engine = SearchEngine::new(&corpus);

    let err = engine.search(None, &SearchMode::field(FIELD)).unwrap_err();
    assert!(err.is_missing_vector(), "got {err:?}");
}

#[test]
fn selected_problem_without_the_field_is_missing_vector() {
    let corpus = sample_corpus();
    let engine = SearchEngine::new(&corpus);

    let err = engine.search_similar_to("abc001_a", &SearchMode::field("title_embedding")).unwrap_err();
    assert!(matches!(err, Error::MissingVector { .. }), "got {err:?}");
}

#[test]
fn code_mode_without_linked_code() {
    let corpus = sample_corpus();
    let engine = SearchEngine::new(&corpus);

    let err = engine.search_similar_to("abc003_a", &SearchMode::ViaCode).unwrap_err();
    assert!(matches!(err, Error::NoLinkedCode(ref id) if id == "abc003_a"), "got {err:?}");

    let err = engine.search_similar_to("abc004_a", &SearchMode::ViaCode).unwrap_err();
    assert!(matches!(err, Error::MissingVector { .. }), "got {err:?}");
}

#[test]
fn similar_to_existing_problem_excludes_itself() {
    let corpus = sample_corpus();
    let engine = SearchEngine::new(&corpus);

    let by_field = engine.search_similar_to("abc001_a", &SearchMode::field(FIELD)).expect("field");
    assert_eq!(ids(&by_field), vec!["abc002_a"]);

    let by_code = engine.search_similar_to("abc001_a", &SearchMode::from("code_embedding")).expect("code");
    assert_eq!(ids(&by_code), vec!["abc002_a"]);
}

#[test]
fn nothing_similar_is_an_empty_ok() {
    let corpus = sample_corpus();
    let engine = SearchEngine::new(&corpus);

    let results = engine.search_similar_to("abc003_a", &SearchMode::field(FIELD)).expect("search");
    assert!(results.is_empty());
}

#[test]
fn unknown_problem_is_reported() {
    let corpus = sample_corpus();
    let engine = SearchEngine::new(&corpus);
    let err = engine.search_similar_to("zzz999_z", &SearchMode::field(FIELD)).unwrap_err();
    assert!(matches!(err, Error::UnknownProblem(_)));
}

#[test]
fn text_search_embeds_and_ranks() {
    let corpus = sample_corpus();
    let engine = SearchEngine::new(&corpus);
    let embedder = FixedEmbedder(vec![1.0, 0.0]);

    let results = engine
        .search_text("find the shortest path in a weighted graph", FIELD, &embedder)
        .expect("text search");
    assert_eq!(ids(&results), vec!["abc002_a"]);
}

#[test]
fn short_text_is_rejected() {
    let corpus = sample_corpus();
    let engine = SearchEngine::new(&corpus);
    let embedder = FixedEmbedder(vec![1.0, 0.0]);

    let err = engine.search_text("   graph   ", FIELD, &embedder).unwrap_err();
    assert!(matches!(err, Error::QueryTooShort { min: 10 }));
}

#[test]
fn suggestions_match_id_or_title() {
    let problems = vec![
        Problem::new("abc001_a", "Shortest Path"),
        Problem::new("abc002_b", "Knapsack"),
        Problem::new("arc010_c", "Longest path"),
    ];
    let corpus = Corpus::new(problems, vec![]);

    let by_title: Vec<&str> = corpus.suggest("PATH", 10).iter().map(|p| p.problem_id.as_str()).collect();
    assert_eq!(by_title, vec!["abc001_a", "arc010_c"]);

    assert_eq!(corpus.suggest("abc", 1).len(), 1);
    assert!(corpus.suggest("a", 10).is_empty(), "single character is too short");
}

#[test]
fn concurrent_searches_share_one_corpus() {
    let corpus = sample_corpus();
    let engine = SearchEngine::new(&corpus);
    let expected = engine.search(Some(&[1.0, 0.0]), &SearchMode::field(FIELD)).expect("search");

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| engine.search(Some(&[1.0, 0.0]), &SearchMode::field(FIELD)).expect("search")))
            .collect();
        for h in handles {
            assert_eq!(h.join().expect("thread"), expected);
        }
    });
}
