//! Loads the sharded JSON corpora.
//!
//! A data directory holds one manifest per corpus: a JSON array of shard file
//! names, each shard being a JSON array of records. Shards are concatenated in
//! manifest order.

use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use crate::config::{resolve_with_base, DataSettings};
use crate::error::{Error, Result};
use crate::types::{Code, Problem};

#[derive(Debug, Clone, Default)]
pub struct LoadedData {
    pub problems: Vec<Problem>,
    pub codes: Vec<Code>,
}

pub struct CorpusLoader {
    data_dir: std::path::PathBuf,
    settings: DataSettings,
}

impl CorpusLoader {
    pub fn new(data_dir: &Path, settings: DataSettings) -> Self {
        Self { data_dir: data_dir.to_path_buf(), settings }
    }

    /// Problems are required. A missing codes manifest only disables code
    /// search.
    pub fn load(&self) -> Result<LoadedData> {
        let problems: Vec<Problem> = self.load_sharded(&self.settings.problems_manifest)?;
        tracing::info!("loaded {} problems from {}", problems.len(), self.data_dir.display());

        let codes_manifest = resolve_with_base(&self.data_dir, &self.settings.codes_manifest);
        let codes: Vec<Code> = if codes_manifest.is_file() {
            let codes = self.load_sharded(&self.settings.codes_manifest)?;
            tracing::info!("loaded {} code snippets", codes.len());
            codes
        } else {
            tracing::warn!(
                "could not find {}; code search will be disabled",
                codes_manifest.display()
            );
            Vec::new()
        };

        Ok(LoadedData { problems, codes })
    }

    fn load_sharded<T: DeserializeOwned>(&self, manifest: &str) -> Result<Vec<T>> {
        let manifest_path = resolve_with_base(&self.data_dir, manifest);
        let shards: Vec<String> = read_json(&manifest_path)?;
        let mut records = Vec::new();
        for shard in &shards {
            let mut part: Vec<T> = read_json(&self.data_dir.join(shard))?;
            tracing::debug!("shard {}: {} records", shard, part.len());
            records.append(&mut part);
        }
        Ok(records)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .map_err(|e| Error::Load(format!("Failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&text)
        .map_err(|e| Error::Load(format!("Failed to parse {}: {}", path.display(), e)))
}
