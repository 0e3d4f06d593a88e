use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use probsim_core::config::{Config, Settings};
use probsim_core::embed::get_default_embedder;
use probsim_core::error::Error;
use probsim_core::loader::CorpusLoader;
use probsim_core::types::{ScoredResult, SearchMode};
use probsim_vector::{Corpus, SearchEngine};

#[derive(Parser)]
#[command(name = "probsim", version, about = "Find similar contest problems by embedding similarity")]
struct Cli {
    /// Directory holding the manifests and shards (overrides `data.dir`)
    #[arg(long, global = true, env = "PROBSIM_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Problems similar to an existing problem
    Similar {
        problem_id: String,
        /// Embedding field to compare, or `code...` to compare solution code
        #[arg(long)]
        mode: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Problems similar to a free-text description
    Text {
        query: String,
        #[arg(long)]
        field: Option<String>,
        /// JSON array of floats produced by an external embedding provider
        #[arg(long)]
        vector: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Problems whose id or title contains the query
    Suggest {
        query: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Corpus statistics
    Stats,
}

#[derive(Serialize)]
struct JsonHit<'a> {
    rank: usize,
    score: f32,
    #[serde(flatten)]
    problem: &'a probsim_core::types::Problem,
}

fn init_logging(settings: &Settings) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(&settings.logging.level)
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_corpus(settings: &Settings, data_dir: Option<&Path>) -> anyhow::Result<Corpus> {
    let dir = match data_dir {
        Some(dir) => dir.to_path_buf(),
        None => settings.data_dir(Path::new(".")),
    };
    let data = CorpusLoader::new(&dir, settings.data.clone())
        .load()
        .with_context(|| format!("loading corpus from {}", dir.display()))?;
    Ok(Corpus::from(data))
}

fn read_vector(path: &Path) -> anyhow::Result<Vec<f32>> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not a JSON array of numbers", path.display()))
}

fn print_results(results: &[ScoredResult<'_>], json: bool) -> anyhow::Result<()> {
    if json {
        let hits: Vec<JsonHit<'_>> = results
            .iter()
            .enumerate()
            .map(|(i, r)| JsonHit { rank: i + 1, score: r.score, problem: r.problem })
            .collect();
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }
    if results.is_empty() {
        println!("No similar problems found.");
        return Ok(());
    }
    for (i, r) in results.iter().enumerate() {
        println!("\n  {}. score={:.4}  {}  {}", i + 1, r.score, r.problem.problem_id, r.problem.title);
        if !r.problem.url.is_empty() {
            println!("     🔗 {}", r.problem.url);
        }
        if !r.problem.tags.is_empty() {
            println!("     🏷️  {}", r.problem.tags.join(", "));
        }
    }
    Ok(())
}

/// Missing vectors get their own message so they are not mistaken for an
/// empty result.
fn report(result: probsim_core::error::Result<Vec<ScoredResult<'_>>>, json: bool) -> anyhow::Result<()> {
    match result {
        Ok(results) => print_results(&results, json),
        Err(Error::NoLinkedCode(id)) => {
            eprintln!("Problem {} has no linked code file; code comparison is unavailable.", id);
            std::process::exit(2);
        }
        Err(e) if e.is_missing_vector() => {
            eprintln!("No reference vector to compare with: {}", e);
            std::process::exit(2);
        }
        Err(e) => Err(e.into()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let settings = config.settings()?;
    init_logging(&settings);

    let corpus = load_corpus(&settings, cli.data_dir.as_deref())?;
    let engine = SearchEngine::new(&corpus);

    match cli.command {
        Command::Similar { problem_id, mode, json } => {
            let mode = SearchMode::from(mode.as_deref().unwrap_or(settings.search.default_mode.as_str()));
            tracing::info!("similar to {} by {}", problem_id, mode);
            report(engine.search_similar_to(&problem_id, &mode), json)?;
        }
        Command::Text { query, field, vector, json } => {
            let field = field.unwrap_or_else(|| settings.search.default_mode.clone());
            let result = match vector {
                Some(path) => {
                    let v = read_vector(&path)?;
                    engine.search(Some(v.as_slice()), &SearchMode::field(field))
                }
                None => {
                    let embedder = get_default_embedder(&settings)?;
                    engine.search_text(&query, &field, embedder.as_ref())
                }
            };
            report(result, json)?;
        }
        Command::Suggest { query, limit } => {
            let limit = limit.unwrap_or(settings.search.suggestion_limit);
            for p in corpus.suggest(&query, limit) {
                println!("[{}] {}", p.problem_id, p.title);
            }
        }
        Command::Stats => {
            let linked = corpus.problems().iter().filter(|p| corpus.linked_code(p).is_some()).count();
            println!("problems: {}", corpus.problems().len());
            println!("codes:    {}", corpus.codes().len());
            println!("problems with linked code: {}", linked);
        }
    }
    Ok(())
}
