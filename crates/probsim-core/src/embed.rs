//! Deterministic token-hashing embedder.
//!
//! Stands in for a real model in tests and offline development. Enabled with
//! `APP_USE_FAKE_EMBEDDINGS=1` or `embedding.use_fake = true`.

use std::hash::{Hash, Hasher};
use twox_hash::XxHash64;

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::traits::Embedder;

pub struct HashEmbedder {
    dim: usize,
}

impl HashEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim: dim.max(1) }
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0f32; self.dim];
        for (i, token) in text.split_whitespace().enumerate() {
            let mut hasher = XxHash64::with_seed(0);
            token.to_lowercase().hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h as usize) % self.dim;
            let val = (((h >> 32) as u32) as f32) / (u32::MAX as f32);
            v[idx] += val + (i as f32 % 3.0) * 0.01;
        }
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt().max(1e-6);
        for x in &mut v {
            *x /= norm;
        }
        v
    }
}

impl Embedder for HashEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }
}

pub fn fake_embeddings_requested() -> bool {
    std::env::var("APP_USE_FAKE_EMBEDDINGS")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// The embedder selected by configuration. Real model inference lives outside
/// this workspace, so only the hash embedder can be constructed here.
pub fn get_default_embedder(settings: &Settings) -> Result<Box<dyn Embedder>> {
    if settings.embedding.use_fake || fake_embeddings_requested() {
        tracing::info!("using HashEmbedder (dim={})", settings.embedding.dim);
        return Ok(Box::new(HashEmbedder::new(settings.embedding.dim)));
    }
    Err(Error::Embedding(
        "no embedding provider configured; pass a precomputed vector or set APP_USE_FAKE_EMBEDDINGS=1".into(),
    ))
}
